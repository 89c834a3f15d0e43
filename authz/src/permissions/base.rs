//! Base permission catalog.
//!
//! Core attendance, team, mission, reporting, administration and audit
//! permissions, and the hand-curated grant of each role. Grants are not
//! required to nest by level: the auditor only reads and reports.

use pt_common::Role;

use super::catalog::{Permission, PermissionDef};
use super::error::CatalogError;
use super::id::Category;

const PERMISSIONS: &[PermissionDef] = &[
    // === Attendance ===
    (
        "pointage.self",
        "Clock in/out",
        "Record one's own check-in and check-out.",
        Category::Attendance,
    ),
    (
        "pointage.view_own",
        "View own attendance",
        "Consult one's own attendance history.",
        Category::Attendance,
    ),
    (
        "pointage.view_team",
        "View team attendance",
        "Consult the attendance of one's team members.",
        Category::Attendance,
    ),
    (
        "pointage.view_all",
        "View all attendance",
        "Consult the attendance of every employee of the company.",
        Category::Attendance,
    ),
    (
        "pointage.validate",
        "Validate attendance",
        "Approve attendance records submitted by employees.",
        Category::Attendance,
    ),
    (
        "pointage.edit",
        "Edit attendance",
        "Correct attendance records after submission.",
        Category::Attendance,
    ),
    // === Team management ===
    ("team.view", "View teams", "See team composition and members.", Category::TeamManagement),
    ("team.manage", "Manage teams", "Create, rename and archive teams.", Category::TeamManagement),
    (
        "team.assign_members",
        "Assign members",
        "Add employees to teams or remove them.",
        Category::TeamManagement,
    ),
    // === Missions ===
    (
        "missions.view_own",
        "View own missions",
        "See the missions assigned to oneself.",
        Category::Missions,
    ),
    (
        "missions.view_all",
        "View all missions",
        "See every mission of the company.",
        Category::Missions,
    ),
    ("missions.create", "Create missions", "Create field missions.", Category::Missions),
    ("missions.assign", "Assign missions", "Assign missions to employees.", Category::Missions),
    (
        "missions.validate",
        "Validate missions",
        "Mark completed missions as validated.",
        Category::Missions,
    ),
    // === Reporting ===
    (
        "reports.view_team",
        "Team reports",
        "View attendance reports for one's team.",
        Category::Reporting,
    ),
    (
        "reports.view_all",
        "Company reports",
        "View company-wide attendance reports.",
        Category::Reporting,
    ),
    ("reports.export", "Export reports", "Export reports as CSV or PDF.", Category::Reporting),
    // === Administration ===
    (
        "admin.global_management",
        "Global management",
        "Manage every company hosted on the platform.",
        Category::Administration,
    ),
    (
        "admin.company_settings",
        "Company settings",
        "Edit company-wide settings.",
        Category::Administration,
    ),
    (
        "admin.user_management",
        "User management",
        "Create, edit and deactivate user accounts.",
        Category::Administration,
    ),
    (
        "admin.role_management",
        "Role management",
        "Change the role granted to users.",
        Category::Administration,
    ),
    ("admin.billing", "Billing", "Manage the subscription and invoices.", Category::Administration),
    (
        "admin.offices",
        "Offices",
        "Manage offices and their check-in zones.",
        Category::Administration,
    ),
    // === Audit ===
    ("audit.view_logs", "View audit logs", "Consult the audit trail.", Category::Audit),
    (
        "audit.export_logs",
        "Export audit logs",
        "Export the audit trail for compliance review.",
        Category::Audit,
    ),
];

const GRANTS: &[(Role, &[&str])] = &[
    (
        Role::Superadmin,
        &[
            "pointage.self",
            "pointage.view_own",
            "pointage.view_team",
            "pointage.view_all",
            "pointage.validate",
            "pointage.edit",
            "team.view",
            "team.manage",
            "team.assign_members",
            "missions.view_own",
            "missions.view_all",
            "missions.create",
            "missions.assign",
            "missions.validate",
            "reports.view_team",
            "reports.view_all",
            "reports.export",
            "admin.global_management",
            "admin.company_settings",
            "admin.user_management",
            "admin.role_management",
            "admin.billing",
            "admin.offices",
            "audit.view_logs",
            "audit.export_logs",
        ],
    ),
    (
        Role::Admin,
        &[
            "pointage.self",
            "pointage.view_own",
            "pointage.view_team",
            "pointage.view_all",
            "pointage.validate",
            "pointage.edit",
            "team.view",
            "team.manage",
            "team.assign_members",
            "missions.view_own",
            "missions.view_all",
            "missions.create",
            "missions.assign",
            "missions.validate",
            "reports.view_team",
            "reports.view_all",
            "reports.export",
            "admin.company_settings",
            "admin.user_management",
            "admin.role_management",
            "admin.billing",
            "admin.offices",
            "audit.view_logs",
        ],
    ),
    (
        Role::Hr,
        &[
            "pointage.self",
            "pointage.view_own",
            "pointage.view_all",
            "pointage.validate",
            "pointage.edit",
            "team.view",
            "team.assign_members",
            "missions.view_own",
            "missions.view_all",
            "reports.view_all",
            "reports.export",
            "admin.user_management",
            "audit.view_logs",
        ],
    ),
    (
        Role::Manager,
        &[
            "pointage.self",
            "pointage.view_own",
            "pointage.view_team",
            "pointage.validate",
            "team.view",
            "missions.view_own",
            "missions.create",
            "missions.assign",
            "missions.validate",
            "reports.view_team",
            "reports.export",
        ],
    ),
    (
        Role::Auditor,
        &[
            "pointage.view_all",
            "reports.view_all",
            "reports.export",
            "audit.view_logs",
            "audit.export_logs",
        ],
    ),
    (
        Role::Employee,
        &[
            "pointage.self",
            "pointage.view_own",
            "team.view",
            "missions.view_own",
        ],
    ),
];

/// Base catalog: permission definitions plus each role's base grant.
///
/// Grants are kept as raw ids; they are resolved against the merged catalog
/// when the role catalog is built, which is where dangling references fail.
#[derive(Debug, Clone)]
pub struct BaseCatalog {
    pub(crate) permissions: Vec<Permission>,
    pub(crate) grants: Vec<(Role, Vec<String>)>,
}

impl BaseCatalog {
    /// Builds a base catalog from static tables.
    pub fn from_defs(
        permissions: &[PermissionDef],
        grants: &[(Role, &[&str])],
    ) -> Result<Self, CatalogError> {
        let permissions = permissions
            .iter()
            .map(|(id, name, description, category)| {
                Permission::new(id, *name, *description, *category)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let grants = grants
            .iter()
            .map(|(role, ids)| (*role, ids.iter().map(|id| (*id).to_string()).collect()))
            .collect();
        Ok(Self {
            permissions,
            grants,
        })
    }

    /// The product's built-in base catalog.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::from_defs(PERMISSIONS, GRANTS)
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Permission ids granted to `role` by the base catalog alone.
    pub fn grants_for(&self, role: Role) -> impl Iterator<Item = &str> {
        self.grants
            .iter()
            .filter(move |(r, _)| *r == role)
            .flat_map(|(_, ids)| ids.iter().map(String::as_str))
    }
}
