//! Error types for the warden engine.
//!
//! All fallible operations in the warden crates return `WardenResult<T>`.
//! Situations that are part of normal resolution (an unknown alias, an
//! unknown role, no matching record) are deliberately NOT errors; they
//! resolve to deny-by-default.

use thiserror::Error;

/// The unified error type for the warden crates.
#[derive(Debug, Error)]
pub enum WardenError {
    /// A query or mutation was given arguments it can never act on: an
    /// empty action set, or an instance id without a resource type.
    ///
    /// Surfaced immediately; no partial state change occurs.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// The storage backend failed during a read or write.
    ///
    /// Propagated unchanged to the API caller. The engine performs no
    /// retries; the backend's failure semantics (transient vs. permanent)
    /// are opaque to it.
    #[error("storage failure: {reason}")]
    Storage { reason: String },

    /// A role-inherits-role assignment would create a cycle.
    ///
    /// Rejected at assignment time; the role registry is left unchanged.
    #[error("role cycle detected: '{role}' is already reachable from '{parent}'")]
    CycleDetected { role: String, parent: String },
}

/// Convenience alias used throughout the warden crates.
pub type WardenResult<T> = Result<T, WardenError>;
