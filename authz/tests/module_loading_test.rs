//! Declarative extension modules merged through the public API.

use pt_authz::permissions::{modules, BaseCatalog, ExtensionModule};
use pt_authz::{Authorizer, CatalogError, SharedAuthorizer};

const OVERTIME: &str = r#"{
    "name": "overtime",
    "namespace": "overtime",
    "permissions": [
        { "id": "overtime.declare", "name": "Declare overtime", "description": "Declare extra hours worked.", "category": "attendance" },
        { "id": "overtime.approve", "name": "Approve overtime", "description": "Approve declared extra hours.", "category": "attendance" }
    ],
    "grants": {
        "employee": ["overtime.declare"],
        "manager": ["overtime.declare", "overtime.approve"],
        "hr": ["overtime.approve"]
    }
}"#;

fn build_with(extra: &str) -> Result<Authorizer, CatalogError> {
    let mut modules = modules::builtin()?;
    modules.push(ExtensionModule::from_json(extra)?);
    Authorizer::build(&BaseCatalog::standard()?, &modules)
}

#[test]
fn test_json_module_grants_are_merged() {
    let authz = build_with(OVERTIME).unwrap();

    assert!(authz.has_permission("employee", "overtime.declare"));
    assert!(!authz.has_permission("employee", "overtime.approve"));
    assert!(authz.has_permission("hr", "overtime.approve"));
    assert!(!authz.has_permission("auditor", "overtime.declare"));
    assert_eq!(authz.modules().last().map(String::as_str), Some("overtime"));
}

#[test]
fn test_json_module_appears_in_matrix() {
    let authz = build_with(OVERTIME).unwrap();
    let matrix = authz.matrix();
    assert_eq!(
        matrix.is_granted(pt_common::Role::Manager, "overtime.approve"),
        Some(true)
    );
    assert_eq!(matrix.row_count(), authz.catalog().len());
}

#[test]
fn test_rejects_unknown_role() {
    let json = OVERTIME.replace("\"hr\":", "\"payroll_clerk\":");
    assert_eq!(
        build_with(&json).unwrap_err(),
        CatalogError::UnknownRole {
            module: "overtime".to_string(),
            role: "payroll_clerk".to_string(),
        }
    );
}

#[test]
fn test_rejects_base_namespace() {
    let json = OVERTIME.replace("overtime", "pointage");
    assert!(matches!(
        build_with(&json),
        Err(CatalogError::NamespaceCollision { .. })
    ));
}

#[test]
fn test_rejects_builtin_module_namespace() {
    let json = r#"{
        "name": "leave_v2",
        "namespace": "leave",
        "permissions": [{ "id": "leave.cancel", "name": "Cancel", "description": "Cancel leave.", "category": "leave" }]
    }"#;
    assert!(matches!(
        build_with(json),
        Err(CatalogError::NamespaceCollision { .. })
    ));
}

#[test]
fn test_rejects_duplicate_module_name() {
    let json = r#"{
        "name": "leave",
        "namespace": "leave_extra",
        "permissions": [{ "id": "leave_extra.cancel", "name": "Cancel", "description": "Cancel leave.", "category": "leave" }]
    }"#;
    assert_eq!(
        build_with(json).unwrap_err(),
        CatalogError::DuplicateModule {
            module: "leave".to_string()
        }
    );
}

#[test]
fn test_rejects_permission_outside_namespace() {
    let json = r#"{
        "name": "expenses",
        "namespace": "expenses",
        "permissions": [{ "id": "payroll.view", "name": "Payroll", "description": "View payroll.", "category": "reporting" }]
    }"#;
    assert!(matches!(
        build_with(json),
        Err(CatalogError::OutsideNamespace { .. })
    ));
}

#[test]
fn test_rejects_foreign_grant() {
    let json = r#"{
        "name": "expenses",
        "namespace": "expenses",
        "permissions": [{ "id": "expenses.submit", "name": "Submit", "description": "Submit claims.", "category": "reporting" }],
        "grants": { "employee": ["expenses.submit", "admin.billing"] }
    }"#;
    assert_eq!(
        build_with(json).unwrap_err(),
        CatalogError::ForeignPermission {
            module: "expenses".to_string(),
            id: "admin.billing".to_string(),
        }
    );
}

#[test]
fn test_rejects_duplicate_permission_in_module() {
    let json = r#"{
        "name": "expenses",
        "namespace": "expenses",
        "permissions": [
            { "id": "expenses.submit", "name": "Submit", "description": "Submit claims.", "category": "reporting" },
            { "id": "expenses.submit", "name": "Submit again", "description": "Submit claims.", "category": "reporting" }
        ]
    }"#;
    assert!(matches!(
        build_with(json),
        Err(CatalogError::DuplicatePermission { .. })
    ));
}

#[test]
fn test_shared_reload_with_directory_modules() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("overtime.json"), OVERTIME).unwrap();
    std::fs::write(dir.path().join("README.txt"), "not a module").unwrap();

    let shared = SharedAuthorizer::new(Authorizer::standard().unwrap());
    assert!(!shared.snapshot().has_permission("employee", "overtime.declare"));

    let mut modules = modules::builtin().unwrap();
    modules.extend(ExtensionModule::load_dir(dir.path()).unwrap());
    shared
        .reload(&BaseCatalog::standard().unwrap(), &modules)
        .unwrap();

    assert!(shared.snapshot().has_permission("employee", "overtime.declare"));
}
