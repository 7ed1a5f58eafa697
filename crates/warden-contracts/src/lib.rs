//! # warden-contracts
//!
//! Shared types and contracts for the warden authorization engine.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions, the condition contract, and error
//! types.

pub mod condition;
pub mod error;
pub mod principal;
pub mod record;
pub mod scope;
