//! Attendance and team operations.

use crate::permissions::catalog::PermissionDef;
use crate::permissions::error::CatalogError;
use crate::permissions::extension::ExtensionModule;
use crate::permissions::id::Category;

pub const NAME: &str = "team_ops";

const PERMISSIONS: &[PermissionDef] = &[
    (
        "team_ops.live_presence",
        "Live presence",
        "See which team members are currently checked in.",
        Category::TeamOperations,
    ),
    (
        "team_ops.schedule_shifts",
        "Schedule shifts",
        "Plan shifts and working hours for a team.",
        Category::TeamOperations,
    ),
    (
        "team_ops.geofence_override",
        "Geofence override",
        "Accept a check-in recorded outside the office zone.",
        Category::TeamOperations,
    ),
    (
        "team_ops.request_correction",
        "Request correction",
        "Ask for a correction of one's own attendance record.",
        Category::TeamOperations,
    ),
];

const GRANTS: &[(&str, &[&str])] = &[
    (
        "superadmin",
        &[
            "team_ops.live_presence",
            "team_ops.schedule_shifts",
            "team_ops.geofence_override",
            "team_ops.request_correction",
        ],
    ),
    (
        "admin",
        &[
            "team_ops.live_presence",
            "team_ops.schedule_shifts",
            "team_ops.geofence_override",
            "team_ops.request_correction",
        ],
    ),
    (
        "hr",
        &[
            "team_ops.live_presence",
            "team_ops.schedule_shifts",
            "team_ops.request_correction",
        ],
    ),
    (
        "manager",
        &[
            "team_ops.live_presence",
            "team_ops.schedule_shifts",
            "team_ops.geofence_override",
            "team_ops.request_correction",
        ],
    ),
    ("employee", &["team_ops.request_correction"]),
];

pub fn module() -> Result<ExtensionModule, CatalogError> {
    ExtensionModule::from_defs(NAME, "team_ops", PERMISSIONS, GRANTS)
}
