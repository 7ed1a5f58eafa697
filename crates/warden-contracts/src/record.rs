//! Permission records: the atomic stored facts.

use std::fmt;

use crate::condition::SharedCondition;
use crate::scope::Scope;

/// Reserved action value matching any requested action.
///
/// Only meaningful in stored records. A query for the literal string "all"
/// is treated as an ordinary action name.
pub const WILDCARD_ACTION: &str = "all";

/// One stored allow/deny fact for a principal.
///
/// Identity is the (action, scope) signature; the allow flag and conditions
/// are payload. At most one record per signature exists for a principal at
/// a time; mutations remove the previous same-signature record before
/// inserting, so an allow and a deny for the same signature never coexist.
#[derive(Clone)]
pub struct PermissionRecord {
    /// true grants the action, false denies it.
    pub allow: bool,

    /// A concrete action, an alias name, or [`WILDCARD_ACTION`].
    pub action: String,

    /// The slice of the resource space this record applies to.
    pub scope: Scope,

    /// Conditions that must all hold for this record to apply.
    pub conditions: Vec<SharedCondition>,
}

impl PermissionRecord {
    /// Build an unconditional record.
    pub fn new(allow: bool, action: impl Into<String>, scope: Scope) -> Self {
        Self { allow, action: action.into(), scope, conditions: Vec::new() }
    }

    /// Attach conditions, replacing any already present.
    pub fn with_conditions(mut self, conditions: Vec<SharedCondition>) -> Self {
        self.conditions = conditions;
        self
    }

    /// True when `other` carries the same (action, scope) signature.
    ///
    /// The allow flag and conditions are ignored; removal and existence
    /// checks work purely on the signature.
    pub fn same_signature(&self, other: &PermissionRecord) -> bool {
        self.action == other.action && self.scope == other.scope
    }

    /// True when this record's action applies to any of the candidate
    /// actions (the queried action plus its alias expansions).
    pub fn matches_any(&self, candidates: &[String]) -> bool {
        self.action == WILDCARD_ACTION || candidates.iter().any(|c| *c == self.action)
    }
}

// Conditions are opaque trait objects; show how many there are rather than
// requiring Debug of every implementation.
impl fmt::Debug for PermissionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionRecord")
            .field("allow", &self.allow)
            .field("action", &self.action)
            .field("scope", &self.scope)
            .field("conditions", &self.conditions.len())
            .finish()
    }
}
