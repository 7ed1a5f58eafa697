//! The resolution engine: one query, one deterministic decision.
//!
//! Resolution for a single action walks outward from the principal:
//!
//!   own records → assigned roles → the roles those roles inherit → …
//!
//! The first level holding an applicable record decides; later levels are
//! never consulted. Within a level the most specific record wins, equal
//! specificity goes to the earlier-assigned role, and within one principal
//! to the most recently stored record. A caller's own action-level deny
//! therefore outranks a role's instance-level allow. If no level decides,
//! the answer is deny.

use std::collections::HashSet;

use tracing::debug;

use warden_contracts::{
    error::{WardenError, WardenResult},
    principal::Principal,
    scope::Scope,
};

use crate::registry::{AliasRegistry, RoleRegistry};
use crate::traits::Store;

/// The decision engine.
///
/// Borrows the store and registries from the facade; it is free to
/// construct, holds no state of its own, and every query is a pure
/// synchronous computation over what the store returns.
pub struct Resolver<'a> {
    store: &'a dyn Store,
    aliases: &'a AliasRegistry,
    roles: &'a RoleRegistry,
}

impl<'a> Resolver<'a> {
    pub fn new(store: &'a dyn Store, aliases: &'a AliasRegistry, roles: &'a RoleRegistry) -> Self {
        Self { store, aliases, roles }
    }

    /// True only if every action in `actions` individually resolves to
    /// allow; a multi-action query is conjunctive.
    pub fn can(&self, principal: &Principal, actions: &[&str], scope: &Scope) -> WardenResult<bool> {
        if actions.is_empty() {
            return Err(WardenError::InvalidArgument {
                reason: "cannot resolve an empty action set".to_string(),
            });
        }

        for action in actions {
            if !self.resolve(principal, action, scope)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Resolve a single action against a resource scope.
    ///
    /// 1. Expand the action into its candidate set: the action itself plus
    ///    every alias whose action set contains it (one level deep).
    /// 2. Let the principal's own surviving records decide.
    /// 3. Otherwise descend the role graph level by level (assigned roles
    ///    first, then the roles those inherit), one pooled selection per
    ///    level.
    /// 4. Nothing decided: deny by default.
    pub fn resolve(&self, principal: &Principal, action: &str, scope: &Scope) -> WardenResult<bool> {
        let candidates = self.aliases.candidates_for(action);

        debug!(principal = %principal, action, scope = %scope, "resolving");

        let mut level = vec![principal.clone()];
        // Cycles are rejected at assignment time; the visited set only
        // guards against a registry fed by a backend with stale edges.
        let mut visited: HashSet<Principal> = level.iter().cloned().collect();

        while !level.is_empty() {
            if let Some(allow) = self.decide_level(&level, &candidates, principal, action, scope)? {
                debug!(principal = %principal, action, allow, "record decided");
                return Ok(allow);
            }
            level = self.next_level(&level, &mut visited);
        }

        debug!(principal = %principal, action, "no record matched; denying by default");
        Ok(false)
    }

    /// One pooled selection over every principal in a fallback level.
    ///
    /// Returns the allow flag of the winning surviving record, or `None`
    /// when the level holds no applicable record. A record survives when
    /// its action matches the candidate set, its scope covers the query,
    /// and all of its conditions evaluate true.
    fn decide_level(
        &self,
        level: &[Principal],
        candidates: &[String],
        caller: &Principal,
        action: &str,
        scope: &Scope,
    ) -> WardenResult<Option<bool>> {
        // Winner so far: (specificity, owner index in the level, allow).
        let mut best: Option<(u8, usize, bool)> = None;

        for (idx, owner) in level.iter().enumerate() {
            for record in self.store.records(owner)? {
                if !record.matches_any(candidates) || !record.scope.covers(scope) {
                    continue;
                }
                if !record.conditions.iter().all(|c| c.evaluate(caller, action, scope)) {
                    continue;
                }

                let specificity = record.scope.specificity();
                let wins = match best {
                    None => true,
                    // Strictly more specific always wins, wherever it lives.
                    Some((s, _, _)) if specificity > s => true,
                    // Equal specificity: a later record of the same owner is
                    // more recent and wins; a record of a later owner in the
                    // level does not.
                    Some((s, i, _)) if specificity == s && i == idx => true,
                    _ => false,
                };
                if wins {
                    best = Some((specificity, idx, record.allow));
                }
            }
        }

        Ok(best.map(|(_, _, allow)| allow))
    }

    /// The next fallback level: the roles each principal in the current
    /// level holds, in assignment order, skipping any already visited.
    fn next_level(&self, level: &[Principal], visited: &mut HashSet<Principal>) -> Vec<Principal> {
        let mut next = Vec::new();
        for principal in level {
            for name in self.roles.roles_of(principal) {
                let role = Principal::role(name);
                if visited.insert(role.clone()) {
                    next.push(role);
                }
            }
        }
        next
    }
}
