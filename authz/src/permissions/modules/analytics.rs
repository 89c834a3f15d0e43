//! Analytics dashboards. Employees get nothing from this module.

use crate::permissions::catalog::PermissionDef;
use crate::permissions::error::CatalogError;
use crate::permissions::extension::ExtensionModule;
use crate::permissions::id::Category;

pub const NAME: &str = "analytics";

const PERMISSIONS: &[PermissionDef] = &[
    (
        "analytics.view_dashboard",
        "Analytics dashboard",
        "Open the analytics dashboard.",
        Category::Analytics,
    ),
    (
        "analytics.view_team_kpis",
        "Team KPIs",
        "View punctuality and presence indicators for one's team.",
        Category::Analytics,
    ),
    (
        "analytics.view_company_kpis",
        "Company KPIs",
        "View company-wide attendance indicators.",
        Category::Analytics,
    ),
    ("analytics.export", "Export analytics", "Export analytics datasets.", Category::Analytics),
];

const GRANTS: &[(&str, &[&str])] = &[
    (
        "superadmin",
        &[
            "analytics.view_dashboard",
            "analytics.view_team_kpis",
            "analytics.view_company_kpis",
            "analytics.export",
        ],
    ),
    (
        "admin",
        &[
            "analytics.view_dashboard",
            "analytics.view_team_kpis",
            "analytics.view_company_kpis",
            "analytics.export",
        ],
    ),
    (
        "hr",
        &[
            "analytics.view_dashboard",
            "analytics.view_company_kpis",
            "analytics.export",
        ],
    ),
    (
        "manager",
        &["analytics.view_dashboard", "analytics.view_team_kpis"],
    ),
    (
        "auditor",
        &[
            "analytics.view_dashboard",
            "analytics.view_company_kpis",
            "analytics.export",
        ],
    ),
];

pub fn module() -> Result<ExtensionModule, CatalogError> {
    ExtensionModule::from_defs(NAME, "analytics", PERMISSIONS, GRANTS)
}
