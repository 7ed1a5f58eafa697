//! Process-scoped alias and role registries.
//!
//! Both registries are dependency-injected state owned by an
//! `AccessManager`, never ambient globals, so multiple independent
//! authorization contexts can coexist in one process.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use tracing::{debug, warn};
use warden_contracts::{
    error::{WardenError, WardenResult},
    principal::Principal,
};

/// Maps a symbolic group action to the concrete actions it represents.
///
/// An alias name lives in the same namespace as concrete actions and can be
/// stored in a permission record like any action. Expansion is one level
/// deep; aliases never nest.
#[derive(Default)]
pub struct AliasRegistry {
    aliases: Mutex<HashMap<String, Vec<String>>>,
}

impl AliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or overwrite an alias.
    ///
    /// Duplicate actions are dropped; first occurrence wins, order is
    /// preserved.
    pub fn define(&self, name: &str, actions: &[&str]) {
        let mut set = Vec::with_capacity(actions.len());
        for action in actions {
            if !set.iter().any(|a: &String| a == action) {
                set.push((*action).to_string());
            }
        }

        debug!(alias = name, actions = set.len(), "alias defined");
        self.locked().insert(name.to_string(), set);
    }

    /// The candidate actions for a query: the action itself plus every
    /// alias whose action set contains it.
    ///
    /// An unknown action simply expands to itself; unknown aliases never
    /// contribute and never error.
    pub fn candidates_for(&self, action: &str) -> Vec<String> {
        let aliases = self.locked();

        let mut candidates = vec![action.to_string()];
        for (name, actions) in aliases.iter() {
            if actions.iter().any(|a| a == action) {
                candidates.push(name.clone());
            }
        }
        candidates
    }

    fn locked(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<String>>> {
        self.aliases.lock().expect("alias registry lock poisoned")
    }
}

/// Maps principals to the roles they hold.
///
/// One edge table serves both caller→role assignment and role→role
/// inheritance. Role→role edges are checked for cycles at assignment time,
/// so the resolver's fallback traversal terminates without per-query cycle
/// guards. Role names are registered implicitly by the first edge that
/// mentions them.
#[derive(Default)]
pub struct RoleRegistry {
    edges: Mutex<HashMap<Principal, Vec<String>>>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `roles` to `principal`, preserving assignment order.
    ///
    /// Already-assigned names are dropped. When `principal` is itself a
    /// role the new edges are inheritance edges; if any of them would make
    /// the role reachable from itself the whole call is rejected with
    /// `CycleDetected` and no edge is kept.
    pub fn assign(&self, principal: &Principal, roles: &[&str]) -> WardenResult<()> {
        let mut edges = self.locked();

        if let Principal::Role { name } = principal {
            for parent in roles {
                if *parent == name || reaches(&edges, parent, name) {
                    warn!(role = %name, parent, "rejecting role inheritance cycle");
                    return Err(WardenError::CycleDetected {
                        role: name.clone(),
                        parent: (*parent).to_string(),
                    });
                }
            }
        }

        let held = edges.entry(principal.clone()).or_default();
        for role in roles {
            if !held.iter().any(|r| r == role) {
                held.push((*role).to_string());
            }
        }

        debug!(principal = %principal, roles = held.len(), "roles assigned");
        Ok(())
    }

    /// The roles held by `principal`, in assignment order.
    pub fn roles_of(&self, principal: &Principal) -> Vec<String> {
        self.locked().get(principal).cloned().unwrap_or_default()
    }

    fn locked(&self) -> std::sync::MutexGuard<'_, HashMap<Principal, Vec<String>>> {
        self.edges.lock().expect("role registry lock poisoned")
    }
}

/// True when `target` is reachable from the role named `from` by following
/// inheritance edges.
fn reaches(edges: &HashMap<Principal, Vec<String>>, from: &str, target: &str) -> bool {
    let mut stack = vec![from.to_string()];
    let mut seen = HashSet::new();

    while let Some(role) = stack.pop() {
        if role == target {
            return true;
        }
        if !seen.insert(role.clone()) {
            continue;
        }
        if let Some(parents) = edges.get(&Principal::role(role)) {
            stack.extend(parents.iter().cloned());
        }
    }
    false
}
