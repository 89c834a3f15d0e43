//! User Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Role;

/// Account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Account can sign in.
    #[default]
    Active,
    /// Account disabled by an administrator.
    Suspended,
}

/// Authenticated user record, as returned by `/auth/me` and kept in the
/// session store.
///
/// The authorization engine only ever looks at [`CurrentUser::role`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User ID.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Role granted to the user.
    pub role: Role,
    /// Company the user belongs to. `None` for platform operators.
    pub company_id: Option<Uuid>,
    /// Account status.
    #[serde(default)]
    pub status: UserStatus,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl CurrentUser {
    /// Whether the account is allowed to act at all.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, UserStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_default_status() {
        let json = r#"{
            "id": "0191d9a0-0000-7000-8000-000000000001",
            "email": "lea@example.com",
            "display_name": "Léa",
            "role": "manager",
            "company_id": null,
            "created_at": "2024-05-01T08:00:00Z"
        }"#;
        let user: CurrentUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::Manager);
        assert_eq!(user.status, UserStatus::Active);
        assert!(user.is_active());
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let json = r#"{
            "id": "0191d9a0-0000-7000-8000-000000000001",
            "email": "x@example.com",
            "display_name": "X",
            "role": "owner",
            "company_id": null,
            "created_at": "2024-05-01T08:00:00Z"
        }"#;
        assert!(serde_json::from_str::<CurrentUser>(json).is_err());
    }
}
