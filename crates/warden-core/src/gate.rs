//! The facade: `AccessManager` binds a store to its registries and mints
//! principal-bound `Gate`s.
//!
//! Mutations (allow/deny/toggle, alias and role edits) write through the
//! gate into the store and registries; queries (can/cannot) flow into the
//! resolver and come back as a boolean.

use std::sync::Arc;

use tracing::debug;

use warden_contracts::{
    condition::SharedCondition,
    error::{WardenError, WardenResult},
    principal::{Caller, Principal},
    record::PermissionRecord,
    scope::Scope,
};

use crate::registry::{AliasRegistry, RoleRegistry};
use crate::resolver::Resolver;
use crate::traits::Store;

// ── Manager ───────────────────────────────────────────────────────────────────

/// Binds a storage backend to one alias registry and one role registry, and
/// mints principal-bound gates.
///
/// Registries are per-manager state: two managers are two independent
/// authorization contexts even when they share a store.
pub struct AccessManager {
    store: Arc<dyn Store>,
    aliases: Arc<AliasRegistry>,
    roles: Arc<RoleRegistry>,
}

impl AccessManager {
    /// Create a manager over `store` with fresh, empty registries.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            aliases: Arc::new(AliasRegistry::new()),
            roles: Arc::new(RoleRegistry::new()),
        }
    }

    /// A gate bound to the caller identified by `(kind, id)`.
    pub fn caller(&self, kind: &str, id: &str) -> Gate {
        self.gate(Principal::caller(kind, id))
    }

    /// A gate bound to a host caller object.
    pub fn gate_for(&self, caller: &(impl Caller + ?Sized)) -> Gate {
        self.gate(Principal::from_caller(caller))
    }

    /// A gate bound to the named role.
    ///
    /// Mutations through it edit the role's own record set; `set_role` on
    /// it declares role-to-role inheritance.
    pub fn role(&self, name: &str) -> Gate {
        self.gate(Principal::role(name))
    }

    /// Register or overwrite an alias, manager-wide.
    pub fn alias(&self, name: &str, actions: &[&str]) {
        self.aliases.define(name, actions);
    }

    fn gate(&self, principal: Principal) -> Gate {
        Gate {
            principal,
            store: Arc::clone(&self.store),
            aliases: Arc::clone(&self.aliases),
            roles: Arc::clone(&self.roles),
        }
    }
}

// ── Gate ──────────────────────────────────────────────────────────────────────

/// A principal-bound facade over the engine.
///
/// Cloneable and shareable across threads; every method takes `&self`.
/// Queries are read-only and safe to run concurrently. Toggle is
/// read-then-write and not atomic by contract; hosts that mutate one
/// principal from several threads must serialize those mutations
/// themselves.
#[derive(Clone)]
pub struct Gate {
    principal: Principal,
    store: Arc<dyn Store>,
    aliases: Arc<AliasRegistry>,
    roles: Arc<RoleRegistry>,
}

impl Gate {
    /// The principal this gate acts for.
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    /// True only if every action in `actions` resolves to allow for this
    /// principal at `scope`.
    pub fn can(&self, actions: &[&str], scope: Scope) -> WardenResult<bool> {
        self.resolver().can(&self.principal, actions, &scope)
    }

    /// Logical negation of [`Gate::can`].
    pub fn cannot(&self, actions: &[&str], scope: Scope) -> WardenResult<bool> {
        Ok(!self.can(actions, scope)?)
    }

    // ── Mutations ────────────────────────────────────────────────────────────

    /// Store an allow record per action, replacing any record with the same
    /// (action, scope) signature.
    pub fn allow(&self, actions: &[&str], scope: Scope) -> WardenResult<()> {
        self.allow_when(actions, scope, Vec::new())
    }

    /// [`Gate::allow`] with conditions attached to every stored record.
    pub fn allow_when(
        &self,
        actions: &[&str],
        scope: Scope,
        conditions: Vec<SharedCondition>,
    ) -> WardenResult<()> {
        self.put(actions, scope, conditions, true)
    }

    /// Store a deny record per action, replacing any record with the same
    /// (action, scope) signature.
    pub fn deny(&self, actions: &[&str], scope: Scope) -> WardenResult<()> {
        self.deny_when(actions, scope, Vec::new())
    }

    /// [`Gate::deny`] with conditions attached to every stored record.
    pub fn deny_when(
        &self,
        actions: &[&str],
        scope: Scope,
        conditions: Vec<SharedCondition>,
    ) -> WardenResult<()> {
        self.put(actions, scope, conditions, false)
    }

    /// Flip each action's current resolved decision.
    ///
    /// The current decision is computed by the full resolution algorithm
    /// (roles, aliases and conditions included) and its opposite is stored
    /// as a fresh record for exactly (action, scope).
    pub fn toggle(&self, actions: &[&str], scope: Scope) -> WardenResult<()> {
        self.toggle_when(actions, scope, Vec::new())
    }

    /// [`Gate::toggle`] with conditions attached to every stored record.
    pub fn toggle_when(
        &self,
        actions: &[&str],
        scope: Scope,
        conditions: Vec<SharedCondition>,
    ) -> WardenResult<()> {
        Self::ensure_actions(actions)?;

        for action in actions {
            let allowed = self.resolver().resolve(&self.principal, action, &scope)?;
            let record = PermissionRecord::new(!allowed, *action, scope.clone())
                .with_conditions(conditions.clone());
            self.replace(record)?;
        }
        Ok(())
    }

    /// Remove every record this principal owns.
    pub fn clear(&self) -> WardenResult<()> {
        for record in self.store.records(&self.principal)? {
            self.store.remove(&self.principal, &record)?;
        }
        Ok(())
    }

    // ── Registry edits ───────────────────────────────────────────────────────

    /// Register or overwrite an alias, manager-wide.
    pub fn alias(&self, name: &str, actions: &[&str]) {
        self.aliases.define(name, actions);
    }

    /// Assign roles to this principal, in order.
    ///
    /// On a caller gate this is role assignment; on a role gate it declares
    /// inheritance and is rejected with `CycleDetected` when it would make
    /// the role reachable from itself. Unknown role names are registered
    /// implicitly.
    pub fn set_role(&self, roles: &[&str]) -> WardenResult<()> {
        self.roles.assign(&self.principal, roles)
    }

    // ── Internals ────────────────────────────────────────────────────────────

    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self.store.as_ref(), &self.aliases, &self.roles)
    }

    fn put(
        &self,
        actions: &[&str],
        scope: Scope,
        conditions: Vec<SharedCondition>,
        allow: bool,
    ) -> WardenResult<()> {
        Self::ensure_actions(actions)?;

        for action in actions {
            let record = PermissionRecord::new(allow, *action, scope.clone())
                .with_conditions(conditions.clone());
            self.replace(record)?;
        }
        Ok(())
    }

    /// Remove-then-insert so at most one record per signature exists.
    fn replace(&self, record: PermissionRecord) -> WardenResult<()> {
        debug!(
            principal = %self.principal,
            action = %record.action,
            scope = %record.scope,
            allow = record.allow,
            "storing record"
        );

        self.store.remove(&self.principal, &record)?;
        self.store.insert(&self.principal, record)
    }

    fn ensure_actions(actions: &[&str]) -> WardenResult<()> {
        if actions.is_empty() {
            return Err(WardenError::InvalidArgument {
                reason: "empty action set".to_string(),
            });
        }
        Ok(())
    }
}
