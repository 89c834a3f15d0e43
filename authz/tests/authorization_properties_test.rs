//! Property tests of the merged authorization catalog.
//!
//! Run with: `cargo test -p pt-authz --test authorization_properties_test`

use std::collections::BTreeSet;

use pt_authz::permissions::{modules, BaseCatalog};
use pt_authz::Authorizer;
use pt_common::Role;

fn authz() -> Authorizer {
    Authorizer::standard().expect("standard catalog builds")
}

#[test]
fn test_employee_clock_in_allowed_global_management_denied() {
    let authz = authz();
    assert!(authz.has_permission("employee", "pointage.self"));
    assert!(!authz.has_permission("employee", "admin.global_management"));
}

#[test]
fn test_superadmin_manages_employee_not_the_reverse() {
    let authz = authz();
    assert!(authz.can_manage_role("superadmin", "employee"));
    assert!(!authz.can_manage_role("employee", "superadmin"));
}

#[test]
fn test_manager_approves_team_leave_through_module() {
    let authz = authz();
    assert!(authz.has_permission("manager", "leave.approve_team"));

    let base_only = Authorizer::build(&BaseCatalog::standard().unwrap(), &[]).unwrap();
    assert!(!base_only.has_permission("manager", "leave.approve_team"));
}

#[test]
fn test_employee_leave_permissions_are_exactly_request() {
    let leave: Vec<String> = authz()
        .role_permissions("employee")
        .into_iter()
        .filter(|p| p.id.domain() == "leave")
        .map(|p| p.id.to_string())
        .collect();
    assert_eq!(leave, vec!["leave.request"]);
}

#[test]
fn test_unknown_inputs_fail_closed() {
    let authz = authz();
    let bogus_roles = ["", "root", "Admin", "admin ", "super_admin", "hr.manager"];
    let bogus_permissions = ["", "*", "pointage", "pointage.*", "POINTAGE.SELF", "x.y"];

    for role in bogus_roles {
        assert!(authz.role_permissions(role).is_empty(), "'{role}'");
        for permission in authz.catalog().iter() {
            assert!(!authz.has_permission(role, permission.id.as_str()));
        }
        for target in Role::all() {
            assert!(!authz.can_manage_role(role, target.as_str()));
            assert!(!authz.can_manage_role(target.as_str(), role));
        }
    }

    for role in Role::all() {
        for permission in bogus_permissions {
            assert!(!authz.has_permission(role.as_str(), permission), "{role} / '{permission}'");
        }
    }
}

#[test]
fn test_management_is_irreflexive() {
    let authz = authz();
    for role in Role::all() {
        assert!(!authz.can_manage(*role, *role), "{role}");
    }
}

#[test]
fn test_management_is_antisymmetric() {
    let authz = authz();
    for a in Role::all() {
        for b in Role::all() {
            assert!(
                !(authz.can_manage(*a, *b) && authz.can_manage(*b, *a)),
                "{a} <-> {b}"
            );
        }
    }
}

#[test]
fn test_management_is_transitive() {
    let authz = authz();
    for a in Role::all() {
        for b in Role::all() {
            for c in Role::all() {
                if authz.can_manage(*a, *b) && authz.can_manage(*b, *c) {
                    assert!(authz.can_manage(*a, *c), "{a} > {b} > {c}");
                }
            }
        }
    }
}

#[test]
fn test_management_follows_levels() {
    let authz = authz();
    for a in Role::all() {
        for b in Role::all() {
            assert_eq!(
                authz.can_manage_role(a.as_str(), b.as_str()),
                a.level() < b.level(),
                "{a} / {b}"
            );
        }
    }
}

#[test]
fn test_effective_grants_are_base_union_modules() {
    let base = BaseCatalog::standard().unwrap();
    let modules = modules::builtin().unwrap();
    let authz = Authorizer::build(&base, &modules).unwrap();

    for role in Role::all() {
        let mut expected: BTreeSet<&str> = base.grants_for(*role).collect();
        for module in &modules {
            expected.extend(module.grants_for(role.as_str()));
        }

        let actual: BTreeSet<&str> = authz
            .role_permissions(role.as_str())
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();

        assert_eq!(actual, expected, "{role}");
    }
}

#[test]
fn test_modules_do_not_leak_into_unmentioned_roles() {
    let authz = authz();
    assert!(authz
        .permissions_of(Role::Employee)
        .iter()
        .all(|p| p.id.domain() != "analytics"));
}

#[test]
fn test_every_permission_is_held_by_someone() {
    let authz = authz();
    for permission in authz.catalog().iter() {
        assert!(
            Role::all()
                .iter()
                .any(|role| authz.role_has(*role, permission.id.as_str())),
            "{} is unreachable",
            permission.id
        );
    }
}

#[test]
fn test_merge_is_order_independent_for_grants() {
    let base = BaseCatalog::standard().unwrap();
    let forward = modules::builtin().unwrap();
    let mut reversed = forward.clone();
    reversed.reverse();

    let a = Authorizer::build(&base, &forward).unwrap();
    let b = Authorizer::build(&base, &reversed).unwrap();

    for role in Role::all() {
        let left: BTreeSet<&str> = a.permissions_of(*role).iter().map(|p| p.id.as_str()).collect();
        let right: BTreeSet<&str> = b.permissions_of(*role).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(left, right, "{role}");
    }
}
