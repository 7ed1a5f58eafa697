//! Principal identities: callers and roles.
//!
//! Callers and roles share identical record-storage and resolution
//! behavior, so both are one tagged union rather than two parallel type
//! hierarchies. The resolver only distinguishes them when it walks role
//! fallback.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Anything that can own permission records.
///
/// A caller is identified by a stable type tag plus an identifier within
/// that tag (e.g. kind "user", id "1"); a role is identified solely by its
/// name. Equality and hashing cover the full identity, making `Principal`
/// usable as a storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Principal {
    /// An application-defined caller, e.g. a logged-in user.
    Caller { kind: String, id: String },

    /// A named role. Holds its own records, consulted only as a fallback
    /// when the caller's own records do not decide a query.
    Role { name: String },
}

impl Principal {
    /// Build a caller principal from its type tag and identifier.
    pub fn caller(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::Caller { kind: kind.into(), id: id.into() }
    }

    /// Build a role principal from its name.
    pub fn role(name: impl Into<String>) -> Self {
        Self::Role { name: name.into() }
    }

    /// Extract the principal identity of a host caller object.
    pub fn from_caller(caller: &(impl Caller + ?Sized)) -> Self {
        Self::caller(caller.caller_kind(), caller.caller_id())
    }

    /// True when this principal is a role.
    pub fn is_role(&self) -> bool {
        matches!(self, Self::Role { .. })
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Caller { kind, id } => write!(f, "{}/{}", kind, id),
            Self::Role { name } => write!(f, "role:{}", name),
        }
    }
}

/// Implemented by host application types that act as callers.
///
/// The engine never retains the implementing value; only its (kind, id)
/// identity is extracted. Roles held by a caller live in the role registry,
/// not on the caller itself.
pub trait Caller {
    /// Stable type tag shared by every caller of this kind, e.g. "user".
    fn caller_kind(&self) -> &str;

    /// Identifier unique within the kind.
    fn caller_id(&self) -> String;
}
