//! Runtime conditions attached to permission records.
//!
//! A condition is a pluggable predicate consulted at decision time. A record
//! applies to a query only if every condition attached to it returns true;
//! a strict AND gate. A record with no conditions always passes.

use std::sync::Arc;

use crate::principal::Principal;
use crate::scope::Scope;

/// A predicate evaluated against the query being resolved.
///
/// Implementations must be pure functions of their inputs with no side
/// effects visible to the resolver; the engine may call them any number of
/// times, in any order, for the same query.
pub trait Condition: Send + Sync {
    /// Decide whether the guarded record applies to this query.
    ///
    /// `caller` is the principal the query was issued for, `action` the
    /// originally requested action (not an alias expansion), and `scope`
    /// the queried resource scope.
    fn evaluate(&self, caller: &Principal, action: &str, scope: &Scope) -> bool;
}

/// Shared handle so one condition can guard many records.
pub type SharedCondition = Arc<dyn Condition>;

/// Adapter turning a closure into a [`Condition`].
pub struct FnCondition<F>(pub F);

impl<F> Condition for FnCondition<F>
where
    F: Fn(&Principal, &str, &Scope) -> bool + Send + Sync,
{
    fn evaluate(&self, caller: &Principal, action: &str, scope: &Scope) -> bool {
        (self.0)(caller, action, scope)
    }
}

/// Wrap a closure into a [`SharedCondition`].
pub fn from_fn<F>(f: F) -> SharedCondition
where
    F: Fn(&Principal, &str, &Scope) -> bool + Send + Sync + 'static,
{
    Arc::new(FnCondition(f))
}
