//! # warden-core
//!
//! Resolution engine and facade for the warden authorization engine.
//!
//! This crate provides:
//! - The [`Store`] port trait every storage backend implements
//! - The [`AliasRegistry`] and [`RoleRegistry`]
//! - The [`Resolver`] query engine
//! - The [`AccessManager`] / [`Gate`] facade
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use warden_contracts::scope::Scope;
//! use warden_core::AccessManager;
//! use warden_store::MemoryStore;
//!
//! let manager = AccessManager::new(Arc::new(MemoryStore::new()));
//! let gate = manager.caller("user", "1");
//!
//! gate.allow(&["create"], Scope::of("events"))?;
//! assert!(gate.can(&["create"], Scope::of("events"))?);
//! ```
//!
//! ## Decision rules
//!
//! Deny by default. A principal's own records outrank its roles' records;
//! roles fall back level by level through inheritance. Within a level the
//! most specific record wins, ties go to the earlier-assigned role and then
//! to the most recently stored record.

pub mod gate;
pub mod registry;
pub mod resolver;
pub mod traits;

pub use gate::{AccessManager, Gate};
pub use registry::{AliasRegistry, RoleRegistry};
pub use resolver::Resolver;
pub use traits::Store;
