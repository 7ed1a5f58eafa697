//! Resource scopes and the specificity ranking.
//!
//! A scope restricts a permission or a query to a slice of the resource
//! space: everything, every instance of one type, or one exact instance.
//! Specificity orders these from broadest to narrowest; the resolver always
//! prefers the most specific applicable record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::WardenError;

/// The resource restriction attached to a permission record or a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// No resource restriction: an action-only permission or query.
    Any,

    /// Every instance of one resource type, and the bare type itself.
    Type(String),

    /// One exact instance of a resource type. An instance is always scoped
    /// to a type, which the variant shape enforces.
    Instance(String, String),
}

impl Scope {
    /// Scope covering every instance of `resource_type`.
    pub fn of(resource_type: impl Into<String>) -> Self {
        Self::Type(resource_type.into())
    }

    /// Scope covering exactly one instance of `resource_type`.
    pub fn item(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::Instance(resource_type.into(), id.into())
    }

    /// Build a scope from optional raw parts, as received from a host API.
    ///
    /// Returns `InvalidArgument` when an instance id is supplied without a
    /// resource type; an instance is always scoped to a type.
    pub fn from_parts(resource_type: Option<&str>, id: Option<&str>) -> Result<Self, WardenError> {
        match (resource_type, id) {
            (None, None) => Ok(Self::Any),
            (Some(t), None) => Ok(Self::of(t)),
            (Some(t), Some(i)) => Ok(Self::item(t, i)),
            (None, Some(i)) => Err(WardenError::InvalidArgument {
                reason: format!("instance id '{}' supplied without a resource type", i),
            }),
        }
    }

    /// Rank from broadest (0, action-only) to narrowest (2, exact instance).
    pub fn specificity(&self) -> u8 {
        match self {
            Self::Any => 0,
            Self::Type(_) => 1,
            Self::Instance(_, _) => 2,
        }
    }

    /// True when a record carrying this scope applies to a query for
    /// `query`.
    ///
    /// - `Any` applies to every query.
    /// - `Type(t)` applies to a bare-type query for `t` and to any instance
    ///   query within `t`, regardless of the queried id.
    /// - `Instance(t, i)` applies only to the identical instance query; in
    ///   particular it does NOT cover a bare-type query for `t`.
    pub fn covers(&self, query: &Scope) -> bool {
        match (self, query) {
            (Self::Any, _) => true,
            (Self::Type(t), Self::Type(qt)) => t == qt,
            (Self::Type(t), Self::Instance(qt, _)) => t == qt,
            (Self::Instance(t, i), Self::Instance(qt, qi)) => t == qt && i == qi,
            _ => false,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "*"),
            Self::Type(t) => write!(f, "{}", t),
            Self::Instance(t, i) => write!(f, "{}/{}", t, i),
        }
    }
}
