//! Presentation metadata for roles.
//!
//! Colors and icons are a UI concern keyed by role id. Nothing in the
//! decision path reads them.

use pt_common::Role;
use serde::Serialize;

/// Badge style used by the console and the mobile app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleStyle {
    /// Hex color (`#RRGGBB`)
    pub color: &'static str,
    /// Icon name from the shared icon set
    pub icon: &'static str,
}

#[must_use]
pub const fn style(role: Role) -> RoleStyle {
    match role {
        Role::Superadmin => RoleStyle { color: "#7C3AED", icon: "shield-crown" },
        Role::Admin => RoleStyle { color: "#DC2626", icon: "shield" },
        Role::Hr => RoleStyle { color: "#DB2777", icon: "users-cog" },
        Role::Manager => RoleStyle { color: "#2563EB", icon: "user-tie" },
        Role::Auditor => RoleStyle { color: "#0D9488", icon: "clipboard-check" },
        Role::Employee => RoleStyle { color: "#6B7280", icon: "user" },
    }
}
