//! Permission identifiers and categories.

use std::borrow::Borrow;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::error::CatalogError;

static PERMISSION_ID: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[a-z][a-z0-9_]*\.[a-z][a-z0-9_]*$").expect("valid regex")
});

/// Permission identifier of the form `domain.action` (e.g. `pointage.validate`).
///
/// Permission ids stay open-ended because extension modules add new ones, so
/// they are validated once when the catalog is built rather than at each call
/// site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionId(SmolStr);

impl PermissionId {
    /// Parses and validates an identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use pt_authz::permissions::PermissionId;
    ///
    /// let id = PermissionId::parse("leave.approve_team").unwrap();
    /// assert_eq!(id.domain(), "leave");
    /// assert!(PermissionId::parse("LeaveApprove").is_err());
    /// ```
    pub fn parse(id: &str) -> Result<Self, CatalogError> {
        if PERMISSION_ID.is_match(id) {
            Ok(Self(SmolStr::new(id)))
        } else {
            Err(CatalogError::InvalidPermissionId { id: id.to_string() })
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Namespace part before the dot.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('.').map_or(self.as_str(), |(domain, _)| domain)
    }

    /// Action part after the dot.
    #[must_use]
    pub fn action(&self) -> &str {
        self.0.split_once('.').map_or("", |(_, action)| action)
    }
}

impl Borrow<str> for PermissionId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PermissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Functional category of a permission, used to group the permission matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Check-in/check-out and attendance records
    Attendance,
    /// Team composition
    TeamManagement,
    /// Field missions
    Missions,
    /// Reports and exports
    Reporting,
    /// Company and platform administration
    Administration,
    /// Audit trail
    Audit,
    /// Live team operations (extension module)
    TeamOperations,
    /// Leave management (extension module)
    Leave,
    /// Analytics dashboards (extension module)
    Analytics,
}

impl Category {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Attendance => "attendance",
            Self::TeamManagement => "team_management",
            Self::Missions => "missions",
            Self::Reporting => "reporting",
            Self::Administration => "administration",
            Self::Audit => "audit",
            Self::TeamOperations => "team_operations",
            Self::Leave => "leave",
            Self::Analytics => "analytics",
        }
    }

    /// Heading shown above the category in the permission matrix.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Attendance => "Attendance",
            Self::TeamManagement => "Team management",
            Self::Missions => "Missions",
            Self::Reporting => "Reporting",
            Self::Administration => "Administration",
            Self::Audit => "Audit",
            Self::TeamOperations => "Team operations",
            Self::Leave => "Leave",
            Self::Analytics => "Analytics",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Attendance,
            Self::TeamManagement,
            Self::Missions,
            Self::Reporting,
            Self::Administration,
            Self::Audit,
            Self::TeamOperations,
            Self::Leave,
            Self::Analytics,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_ids() {
        for id in ["pointage.self", "leave.approve_team", "team_ops.live_presence", "a1.b2"] {
            let parsed = PermissionId::parse(id).unwrap();
            assert_eq!(parsed.as_str(), id);
        }
    }

    #[test]
    fn test_parse_rejects_malformed_ids() {
        for id in [
            "",
            "pointage",
            "pointage.",
            ".self",
            "Pointage.self",
            "pointage.self.extra",
            "pointage self",
            "1pointage.self",
            "pointage-self.x",
        ] {
            assert!(
                matches!(
                    PermissionId::parse(id),
                    Err(CatalogError::InvalidPermissionId { .. })
                ),
                "'{id}' should be rejected"
            );
        }
    }

    #[test]
    fn test_domain_and_action() {
        let id = PermissionId::parse("missions.validate").unwrap();
        assert_eq!(id.domain(), "missions");
        assert_eq!(id.action(), "validate");
    }

    #[test]
    fn test_borrow_allows_str_lookup() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(PermissionId::parse("audit.view_logs").unwrap(), 7);
        assert_eq!(map.get("audit.view_logs"), Some(&7));
        assert_eq!(map.get("audit.export_logs"), None);
    }

    #[test]
    fn test_category_serde_matches_as_str() {
        for category in Category::all() {
            let json = serde_json::to_string(category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }
}
