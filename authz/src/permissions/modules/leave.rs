//! Leave management.

use crate::permissions::catalog::PermissionDef;
use crate::permissions::error::CatalogError;
use crate::permissions::extension::ExtensionModule;
use crate::permissions::id::Category;

pub const NAME: &str = "leave";

const PERMISSIONS: &[PermissionDef] = &[
    ("leave.request", "Request leave", "Submit a leave request.", Category::Leave),
    (
        "leave.view_own",
        "View own leave",
        "Consult one's own leave balance and history.",
        Category::Leave,
    ),
    (
        "leave.approve_team",
        "Approve team leave",
        "Approve or reject leave requests from team members.",
        Category::Leave,
    ),
    (
        "leave.view_all",
        "View all leave",
        "Consult leave across the whole company.",
        Category::Leave,
    ),
    (
        "leave.manage_policies",
        "Leave policies",
        "Configure leave types and accrual rules.",
        Category::Leave,
    ),
];

const GRANTS: &[(&str, &[&str])] = &[
    (
        "superadmin",
        &[
            "leave.request",
            "leave.view_own",
            "leave.approve_team",
            "leave.view_all",
            "leave.manage_policies",
        ],
    ),
    (
        "admin",
        &[
            "leave.request",
            "leave.view_own",
            "leave.approve_team",
            "leave.view_all",
            "leave.manage_policies",
        ],
    ),
    (
        "hr",
        &[
            "leave.request",
            "leave.view_own",
            "leave.approve_team",
            "leave.view_all",
            "leave.manage_policies",
        ],
    ),
    (
        "manager",
        &["leave.request", "leave.view_own", "leave.approve_team"],
    ),
    ("auditor", &["leave.view_all"]),
    ("employee", &["leave.request"]),
];

pub fn module() -> Result<ExtensionModule, CatalogError> {
    ExtensionModule::from_defs(NAME, "leave", PERMISSIONS, GRANTS)
}
