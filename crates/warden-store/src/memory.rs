//! In-memory implementation of the `Store` port.
//!
//! `MemoryStore` is the reference backend: per-principal record lists in a
//! `HashMap` behind a single `Mutex`. Insertion order is preserved per
//! principal, which is what gives the resolver its most-recently-stored
//! tie-break. Suitable for tests, demos, and static in-process rule sets;
//! persistent backends implement the same four-method port.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use warden_contracts::{
    error::{WardenError, WardenResult},
    principal::Principal,
    record::PermissionRecord,
};
use warden_core::traits::Store;

type RecordMap = HashMap<Principal, Vec<PermissionRecord>>;

// ── Store ─────────────────────────────────────────────────────────────────────

/// An append-ordered, in-memory permission store.
///
/// # Thread safety
///
/// Every method acquires the single internal `Mutex`, so the store is safe
/// to share across threads behind an `Arc`. A poisoned lock surfaces as
/// `WardenError::Storage`, which the engine propagates unchanged.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<RecordMap>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> WardenResult<MutexGuard<'_, RecordMap>> {
        self.state.lock().map_err(|e| WardenError::Storage {
            reason: format!("store lock poisoned: {}", e),
        })
    }
}

impl Store for MemoryStore {
    /// All records owned by `principal`, in the order they were inserted.
    fn records(&self, principal: &Principal) -> WardenResult<Vec<PermissionRecord>> {
        Ok(self.locked()?.get(principal).cloned().unwrap_or_default())
    }

    /// Append a record for `principal`.
    fn insert(&self, principal: &Principal, record: PermissionRecord) -> WardenResult<()> {
        debug!(principal = %principal, action = %record.action, scope = %record.scope, "insert");
        self.locked()?.entry(principal.clone()).or_default().push(record);
        Ok(())
    }

    /// Drop the record matching `record`'s (action, scope) signature.
    ///
    /// The allow flag and conditions play no part in the match; removing an
    /// absent record is a no-op.
    fn remove(&self, principal: &Principal, record: &PermissionRecord) -> WardenResult<()> {
        if let Some(list) = self.locked()?.get_mut(principal) {
            list.retain(|r| !r.same_signature(record));
        }
        Ok(())
    }

    fn contains(&self, principal: &Principal, record: &PermissionRecord) -> WardenResult<bool> {
        Ok(self
            .locked()?
            .get(principal)
            .is_some_and(|list| list.iter().any(|r| r.same_signature(record))))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
