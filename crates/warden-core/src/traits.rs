//! Core port definitions for the warden engine.
//!
//! `Store` is the single persistence contract: everything the resolver and
//! the mutation API need from a backend. Implementations can be static,
//! in-memory, or database-backed; `warden-store` ships the in-memory
//! reference implementation.

use warden_contracts::{error::WardenResult, principal::Principal, record::PermissionRecord};

/// A pluggable backend holding permission records per principal.
///
/// Implementations must preserve per-principal insertion order: the
/// resolver breaks specificity ties in favor of the most recently stored
/// record, and insertion order is what "most recently" means. The engine
/// assumes at least per-caller read-your-writes consistency and imposes no
/// ordering guarantee across different principals' concurrent mutations.
///
/// Any backend failure is surfaced as `WardenError::Storage` and propagated
/// unchanged through the query and mutation APIs.
pub trait Store: Send + Sync {
    /// All records owned by `principal`, in insertion order.
    fn records(&self, principal: &Principal) -> WardenResult<Vec<PermissionRecord>>;

    /// Append a record for `principal`.
    fn insert(&self, principal: &Principal, record: PermissionRecord) -> WardenResult<()>;

    /// Remove the record matching `record`'s (action, scope) signature.
    ///
    /// The allow flag and conditions are ignored. Removing a record that
    /// does not exist is a no-op, not an error.
    fn remove(&self, principal: &Principal, record: &PermissionRecord) -> WardenResult<()>;

    /// True when a record with `record`'s (action, scope) signature exists
    /// for `principal`.
    fn contains(&self, principal: &Principal, record: &PermissionRecord) -> WardenResult<bool>;
}
