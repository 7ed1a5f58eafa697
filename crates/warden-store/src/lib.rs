//! # warden-store
//!
//! In-memory storage backend for the warden authorization engine.
//!
//! ## Overview
//!
//! This crate provides [`MemoryStore`], the reference implementation of the
//! [`Store`](warden_core::traits::Store) port: per-principal record lists
//! behind one mutex, preserving insertion order. It also hosts the
//! behavioral test suite that exercises the whole engine (facade, resolver,
//! registries) through this backend.
//!
//! ## Quick start
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
//! gate.allow(&["delete"], Scope::of("events"))?;
//! assert!(gate.can(&["delete"], Scope::of("events"))?);
//! assert!(gate.cannot(&["delete"], Scope::of("pages"))?);
//! ```

pub mod memory;

pub use memory::MemoryStore;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use warden_contracts::{
        condition::{from_fn, SharedCondition},
        error::WardenError,
        principal::{Caller, Principal},
        record::PermissionRecord,
        scope::Scope,
    };
    use warden_core::{AccessManager, Gate, Store};

    use crate::MemoryStore;

    // ── Helpers ──────────────────────────────────────────────────────────────

    fn manager() -> AccessManager {
        AccessManager::new(Arc::new(MemoryStore::new()))
    }

    /// A manager plus a gate for the default caller, user/1.
    fn fixture() -> (AccessManager, Gate) {
        let manager = manager();
        let gate = manager.caller("user", "1");
        (manager, gate)
    }

    fn always() -> SharedCondition {
        from_fn(|_, _, _| true)
    }

    fn never() -> SharedCondition {
        from_fn(|_, _, _| false)
    }

    // ── Plain allow/deny ─────────────────────────────────────────────────────

    #[test]
    fn a_caller_with_no_records_can_do_nothing() {
        let (_manager, gate) = fixture();

        assert!(!gate.can(&["create"], Scope::Any).unwrap());
        assert!(!gate.can(&["edit"], Scope::of("events")).unwrap());
        assert!(!gate.can(&["read"], Scope::item("events", "1")).unwrap());
        assert!(gate.cannot(&["update"], Scope::Any).unwrap());
    }

    #[test]
    fn an_allowed_action_succeeds() {
        let (_manager, gate) = fixture();
        gate.allow(&["create"], Scope::Any).unwrap();

        assert!(gate.can(&["create"], Scope::Any).unwrap());
        assert!(!gate.can(&["edit"], Scope::Any).unwrap());
    }

    #[test]
    fn a_later_deny_overrides_an_allow() {
        let (_manager, gate) = fixture();
        gate.allow(&["update"], Scope::Any).unwrap();
        gate.deny(&["update"], Scope::Any).unwrap();

        assert!(!gate.can(&["update"], Scope::Any).unwrap());
    }

    #[test]
    fn a_later_allow_overrides_a_deny() {
        let (_manager, gate) = fixture();
        gate.deny(&["export"], Scope::of("events")).unwrap();
        gate.allow(&["export"], Scope::of("events")).unwrap();

        assert!(gate.can(&["export"], Scope::of("events")).unwrap());
    }

    #[test]
    fn replacement_leaves_one_record_per_signature() {
        let store = Arc::new(MemoryStore::new());
        let manager = AccessManager::new(Arc::clone(&store) as Arc<dyn Store>);
        let gate = manager.caller("user", "1");

        gate.allow(&["update"], Scope::of("events")).unwrap();
        gate.deny(&["update"], Scope::of("events")).unwrap();

        let records = store.records(&Principal::caller("user", "1")).unwrap();
        assert_eq!(records.len(), 1);
        assert!(!records[0].allow);
    }

    // ── Resource scoping ─────────────────────────────────────────────────────

    #[test]
    fn a_type_permission_stays_inside_its_type() {
        let (_manager, gate) = fixture();
        gate.allow(&["delete"], Scope::of("events")).unwrap();

        assert!(gate.can(&["delete"], Scope::of("events")).unwrap());
        assert!(gate.can(&["delete"], Scope::item("events", "3")).unwrap());
        assert!(!gate.can(&["delete"], Scope::of("pages")).unwrap());
        // A typed permission never answers an action-only query.
        assert!(!gate.can(&["delete"], Scope::Any).unwrap());
    }

    #[test]
    fn an_instance_permission_covers_only_that_instance() {
        let (_manager, gate) = fixture();
        gate.allow(&["read"], Scope::item("events", "1")).unwrap();

        assert!(gate.can(&["read"], Scope::item("events", "1")).unwrap());
        assert!(!gate.can(&["read"], Scope::item("events", "2")).unwrap());
        // Holding one instance does not grant the whole type.
        assert!(!gate.can(&["read"], Scope::of("events")).unwrap());
    }

    #[test]
    fn an_instance_allow_overrides_an_action_level_deny() {
        let (_manager, gate) = fixture();
        gate.deny(&["update"], Scope::Any).unwrap();
        gate.allow(&["update"], Scope::item("events", "1")).unwrap();

        assert!(gate.can(&["update"], Scope::item("events", "1")).unwrap());
        // A bare-type query is not covered by the instance record, so the
        // action-level deny still decides it.
        assert!(!gate.can(&["update"], Scope::of("events")).unwrap());
        assert!(!gate.can(&["update"], Scope::Any).unwrap());
    }

    // ── Wildcard action ──────────────────────────────────────────────────────

    #[test]
    fn the_wildcard_action_grants_everything_in_its_scope() {
        let (_manager, gate) = fixture();
        gate.allow(&["all"], Scope::of("posts")).unwrap();

        assert!(gate.can(&["create"], Scope::of("posts")).unwrap());
        assert!(gate.can(&["update"], Scope::of("posts")).unwrap());
        assert!(gate.can(&["delete"], Scope::of("posts")).unwrap());

        // The wildcard is bound to its resource scope.
        assert!(!gate.can(&["create"], Scope::of("events")).unwrap());
    }

    #[test]
    fn a_specific_deny_narrows_a_wildcard_allow() {
        let (_manager, gate) = fixture();
        gate.allow(&["all"], Scope::of("posts")).unwrap();
        gate.deny(&["delete"], Scope::item("posts", "1")).unwrap();

        assert!(gate.can(&["delete"], Scope::of("posts")).unwrap());
        assert!(!gate.can(&["delete"], Scope::item("posts", "1")).unwrap());
        assert!(gate.can(&["delete"], Scope::item("posts", "2")).unwrap());
    }

    // ── Aliases ──────────────────────────────────────────────────────────────

    #[test]
    fn an_alias_permission_answers_its_member_actions() {
        let (_manager, gate) = fixture();
        gate.alias("manage", &["create", "read", "update", "delete"]);
        gate.allow(&["manage"], Scope::of("accounts")).unwrap();

        // The alias permission is resource-scoped: no resource, no match.
        assert!(!gate.can(&["manage"], Scope::Any).unwrap());
        assert!(gate.can(&["manage"], Scope::of("accounts")).unwrap());
        assert!(gate.can(&["manage"], Scope::item("accounts", "1")).unwrap());
        assert!(!gate.can(&["manage"], Scope::of("events")).unwrap());
        assert!(gate.can(&["read"], Scope::of("accounts")).unwrap());
        assert!(gate.can(&["read", "update"], Scope::of("accounts")).unwrap());
    }

    #[test]
    fn an_unknown_alias_contributes_nothing() {
        let (_manager, gate) = fixture();
        gate.allow(&["manage"], Scope::of("accounts")).unwrap();

        // Without a definition "manage" is just an action name; its members
        // resolve on their own (lack of) records.
        assert!(gate.can(&["manage"], Scope::of("accounts")).unwrap());
        assert!(!gate.can(&["read"], Scope::of("accounts")).unwrap());
    }

    #[test]
    fn aliases_are_manager_wide() {
        let (manager, gate) = fixture();
        manager.alias("manage", &["read"]);
        gate.allow(&["manage"], Scope::of("accounts")).unwrap();

        assert!(gate.can(&["read"], Scope::of("accounts")).unwrap());

        // A second manager shares nothing with the first.
        let other = self::manager();
        let other_gate = other.caller("user", "1");
        other_gate.allow(&["manage"], Scope::of("accounts")).unwrap();
        assert!(!other_gate.can(&["read"], Scope::of("accounts")).unwrap());
    }

    // ── Roles ────────────────────────────────────────────────────────────────

    #[test]
    fn role_records_answer_for_their_holders() {
        let (manager, gate) = fixture();
        gate.set_role(&["user"]).unwrap();
        manager.role("user").set_role(&["editor", "admin"]).unwrap();

        manager.role("user").allow(&["create"], Scope::of("pages")).unwrap();
        manager.role("editor").allow(&["publish"], Scope::of("pages")).unwrap();
        manager.role("admin").allow(&["publish"], Scope::of("pages")).unwrap();
        manager.role("admin").allow(&["delete"], Scope::of("pages")).unwrap();

        assert!(gate.can(&["create", "publish"], Scope::of("pages")).unwrap());
        // Inheritance is transitive: "delete" reaches the caller through
        // user → admin.
        assert!(gate.can(&["delete"], Scope::of("pages")).unwrap());
    }

    #[test]
    fn an_own_deny_overrides_a_role_allow() {
        let (manager, gate) = fixture();
        gate.set_role(&["user"]).unwrap();
        manager.role("user").set_role(&["editor", "admin"]).unwrap();

        manager.role("user").allow(&["create"], Scope::of("pages")).unwrap();
        manager.role("editor").allow(&["publish"], Scope::of("pages")).unwrap();
        manager.role("admin").allow(&["publish"], Scope::of("pages")).unwrap();

        assert!(gate.can(&["create", "publish"], Scope::of("pages")).unwrap());

        // Denying the caller directly invalidates what its roles allow,
        // even at a broader scope.
        gate.deny(&["publish"], Scope::Any).unwrap();
        assert!(!gate.can(&["create", "publish"], Scope::of("pages")).unwrap());
        assert!(gate.can(&["create"], Scope::of("pages")).unwrap());
    }

    #[test]
    fn earlier_assigned_roles_win_ties() {
        let (manager, gate) = fixture();
        gate.set_role(&["moderator", "member"]).unwrap();

        manager.role("moderator").deny(&["comment"], Scope::of("threads")).unwrap();
        manager.role("member").allow(&["comment"], Scope::of("threads")).unwrap();

        assert!(!gate.can(&["comment"], Scope::of("threads")).unwrap());
    }

    #[test]
    fn a_later_role_wins_with_a_more_specific_record() {
        let (manager, gate) = fixture();
        gate.set_role(&["moderator", "member"]).unwrap();

        manager.role("moderator").deny(&["comment"], Scope::of("threads")).unwrap();
        manager.role("member").allow(&["comment"], Scope::item("threads", "42")).unwrap();

        assert!(gate.can(&["comment"], Scope::item("threads", "42")).unwrap());
        assert!(!gate.can(&["comment"], Scope::item("threads", "7")).unwrap());
    }

    #[test]
    fn a_role_gate_resolves_its_own_inheritance() {
        let (manager, _gate) = fixture();
        manager.role("user").set_role(&["editor"]).unwrap();
        manager.role("editor").allow(&["publish"], Scope::of("pages")).unwrap();

        // A role queried directly is resolved like a caller holding its
        // inherited roles.
        assert!(manager.role("user").can(&["publish"], Scope::of("pages")).unwrap());
        assert!(!manager.role("user").can(&["delete"], Scope::of("pages")).unwrap());
    }

    #[test]
    fn an_unassigned_role_grants_nothing() {
        let (manager, gate) = fixture();
        manager.role("admin").allow(&["delete"], Scope::of("pages")).unwrap();

        // The caller never received the role.
        assert!(!gate.can(&["delete"], Scope::of("pages")).unwrap());
    }

    #[test]
    fn inheritance_cycles_are_rejected() {
        let (manager, _gate) = fixture();
        manager.role("a").set_role(&["b"]).unwrap();
        manager.role("b").set_role(&["c"]).unwrap();

        let err = manager.role("c").set_role(&["a"]).unwrap_err();
        assert!(matches!(err, WardenError::CycleDetected { .. }));

        // The registry is unchanged: a legal assignment still works and
        // resolution through the chain is unaffected.
        manager.role("c").set_role(&["d"]).unwrap();
        manager.role("c").allow(&["view"], Scope::Any).unwrap();
        assert!(manager.role("a").can(&["view"], Scope::Any).unwrap());
    }

    // ── Toggle ───────────────────────────────────────────────────────────────

    #[test]
    fn toggle_flips_and_flips_back() {
        let (_manager, gate) = fixture();
        assert!(!gate.can(&["edit"], Scope::of("events")).unwrap());

        gate.toggle(&["edit"], Scope::of("events")).unwrap();
        assert!(gate.can(&["edit"], Scope::of("events")).unwrap());

        gate.toggle(&["edit"], Scope::of("events")).unwrap();
        assert!(!gate.can(&["edit"], Scope::of("events")).unwrap());
    }

    #[test]
    fn toggle_handles_several_actions_at_once() {
        let (_manager, gate) = fixture();
        gate.allow(&["create", "delete"], Scope::of("comments")).unwrap();

        gate.toggle(&["create", "delete"], Scope::of("comments")).unwrap();
        assert!(!gate.can(&["create", "delete"], Scope::of("comments")).unwrap());
        assert!(!gate.can(&["create"], Scope::of("comments")).unwrap());
        assert!(!gate.can(&["delete"], Scope::of("comments")).unwrap());

        gate.toggle(&["create", "delete"], Scope::of("comments")).unwrap();
        assert!(gate.can(&["create", "delete"], Scope::of("comments")).unwrap());
    }

    #[test]
    fn toggle_consults_role_fallback() {
        let (manager, gate) = fixture();
        gate.set_role(&["admin"]).unwrap();
        manager.role("admin").allow(&["delete"], Scope::of("pages")).unwrap();

        // The current decision is allow (via the role), so toggle stores a
        // deny on the caller itself.
        gate.toggle(&["delete"], Scope::of("pages")).unwrap();
        assert!(!gate.can(&["delete"], Scope::of("pages")).unwrap());
    }

    // ── Multi-action queries ─────────────────────────────────────────────────

    #[test]
    fn multi_action_checks_are_conjunctive() {
        let (_manager, gate) = fixture();
        gate.allow(&["create", "delete"], Scope::of("comments")).unwrap();

        assert!(gate.can(&["create", "delete"], Scope::of("comments")).unwrap());
        assert!(!gate.can(&["create", "edit"], Scope::of("comments")).unwrap());
        assert!(gate.cannot(&["create", "edit"], Scope::of("comments")).unwrap());
    }

    #[test]
    fn empty_action_sets_are_invalid_everywhere() {
        let (_manager, gate) = fixture();

        assert!(matches!(
            gate.can(&[], Scope::Any).unwrap_err(),
            WardenError::InvalidArgument { .. }
        ));
        assert!(matches!(
            gate.allow(&[], Scope::Any).unwrap_err(),
            WardenError::InvalidArgument { .. }
        ));
        assert!(matches!(
            gate.deny(&[], Scope::of("events")).unwrap_err(),
            WardenError::InvalidArgument { .. }
        ));
        assert!(matches!(
            gate.toggle(&[], Scope::Any).unwrap_err(),
            WardenError::InvalidArgument { .. }
        ));

        // The failed mutations changed nothing.
        assert!(!gate.can(&["create"], Scope::Any).unwrap());
    }

    // ── Conditions ───────────────────────────────────────────────────────────

    #[test]
    fn conditions_gate_a_record() {
        let (_manager, gate) = fixture();
        gate.allow_when(&["upload"], Scope::of("files"), vec![always()]).unwrap();
        gate.allow_when(&["upload"], Scope::of("photos"), vec![never()]).unwrap();

        assert!(gate.can(&["upload"], Scope::of("files")).unwrap());
        assert!(!gate.can(&["upload"], Scope::of("photos")).unwrap());
    }

    #[test]
    fn every_condition_on_a_record_must_hold() {
        let (_manager, gate) = fixture();
        gate.allow_when(&["upload"], Scope::of("files"), vec![always(), never()]).unwrap();

        assert!(!gate.can(&["upload"], Scope::of("files")).unwrap());
    }

    #[test]
    fn a_failed_condition_falls_through_to_a_broader_record() {
        let (_manager, gate) = fixture();
        gate.allow(&["update"], Scope::Any).unwrap();
        gate.deny_when(&["update"], Scope::of("events"), vec![never()]).unwrap();

        // The conditioned deny is invisible, so the action-level allow
        // decides; without it the same query would default to deny.
        assert!(gate.can(&["update"], Scope::of("events")).unwrap());
    }

    #[test]
    fn conditions_see_the_queried_instance() {
        let (_manager, gate) = fixture();
        let drafts_only = from_fn(|_caller: &Principal, _action: &str, scope: &Scope| {
            matches!(scope, Scope::Instance(_, id) if id.starts_with("draft-"))
        });
        gate.allow_when(&["edit"], Scope::of("articles"), vec![drafts_only]).unwrap();

        assert!(gate.can(&["edit"], Scope::item("articles", "draft-7")).unwrap());
        assert!(!gate.can(&["edit"], Scope::item("articles", "published-7")).unwrap());
    }

    // ── Host callers and housekeeping ────────────────────────────────────────

    #[test]
    fn a_host_caller_type_can_mint_its_own_gate() {
        struct User(u32);

        impl Caller for User {
            fn caller_kind(&self) -> &str {
                "user"
            }

            fn caller_id(&self) -> String {
                self.0.to_string()
            }
        }

        let manager = manager();
        let gate = manager.gate_for(&User(1));
        gate.allow(&["create"], Scope::Any).unwrap();

        // The identity is (kind, id): the same user seen through the plain
        // constructor resolves the same records.
        assert!(manager.caller("user", "1").can(&["create"], Scope::Any).unwrap());
        assert!(!manager.caller("user", "2").can(&["create"], Scope::Any).unwrap());
    }

    #[test]
    fn clear_removes_every_record_of_the_principal() {
        let (manager, gate) = fixture();
        gate.allow(&["create"], Scope::Any).unwrap();
        gate.allow(&["update"], Scope::of("events")).unwrap();
        gate.deny(&["delete"], Scope::item("events", "1")).unwrap();
        manager.role("admin").allow(&["delete"], Scope::Any).unwrap();

        gate.clear().unwrap();

        assert!(!gate.can(&["create"], Scope::Any).unwrap());
        assert!(!gate.can(&["update"], Scope::of("events")).unwrap());
        // Other principals keep their records.
        assert!(manager.role("admin").can(&["delete"], Scope::Any).unwrap());
    }

    #[test]
    fn gates_share_state_through_the_manager() {
        let store = Arc::new(MemoryStore::new());
        let manager = AccessManager::new(store);

        manager.caller("user", "1").allow(&["create"], Scope::Any).unwrap();

        // A second gate for the same principal sees the records.
        assert!(manager.caller("user", "1").can(&["create"], Scope::Any).unwrap());
    }

    #[test]
    fn records_survive_via_the_store_not_the_gate() {
        let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());

        {
            let manager = AccessManager::new(Arc::clone(&store) as Arc<dyn Store>);
            manager.caller("user", "1").allow(&["create"], Scope::Any).unwrap();
        }

        // The record is in the store by signature, and a fresh manager over
        // the same store resolves it; aliases and roles, by contrast, live
        // with the manager.
        let signature = PermissionRecord::new(false, "create", Scope::Any);
        assert!(store.contains(&Principal::caller("user", "1"), &signature).unwrap());

        let manager = AccessManager::new(store);
        assert!(manager.caller("user", "1").can(&["create"], Scope::Any).unwrap());
    }
}
