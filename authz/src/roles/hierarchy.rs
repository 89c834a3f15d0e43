//! Hierarchy-based management authority.
//!
//! A role may manage another role only if its level is strictly lower
//! (lower number = higher authority). Equal levels never manage each other,
//! which makes the relation irreflexive, antisymmetric and transitive.

use pt_common::Role;

use super::catalog::RoleCatalog;

/// Whether `manager` may administer users holding `target`.
pub fn can_manage(roles: &RoleCatalog, manager: Role, target: Role) -> bool {
    roles.entry(manager).level < roles.entry(target).level
}

/// Roles `manager` may administer, most authoritative first.
pub fn manageable_roles(roles: &RoleCatalog, manager: Role) -> Vec<Role> {
    roles
        .ordered()
        .into_iter()
        .filter(|entry| can_manage(roles, manager, entry.role))
        .map(|entry| entry.role)
        .collect()
}
