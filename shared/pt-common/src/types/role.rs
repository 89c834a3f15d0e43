//! Platform roles.
//!
//! The role set is closed: it is fixed at build time and not extensible at
//! runtime. Identifiers coming from sessions or configuration are parsed into
//! [`Role`] and anything outside the enumeration is rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Role held by a user of the platform.
///
/// Declared from most to least authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform operator, manages every company
    Superadmin,
    /// Administrator of a single company
    Admin,
    /// Human resources officer
    Hr,
    /// Team manager
    Manager,
    /// Read-only compliance auditor
    Auditor,
    /// Regular employee using the check-in app
    Employee,
}

impl Role {
    /// Returns the stable identifier used in sessions and catalogs.
    ///
    /// # Examples
    ///
    /// ```
    /// use pt_common::Role;
    ///
    /// assert_eq!(Role::Superadmin.as_str(), "superadmin");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Superadmin => "superadmin",
            Self::Admin => "admin",
            Self::Hr => "hr",
            Self::Manager => "manager",
            Self::Auditor => "auditor",
            Self::Employee => "employee",
        }
    }

    /// Hierarchy level. 1 is the highest authority; larger means less.
    #[must_use]
    pub const fn level(&self) -> u8 {
        match self {
            Self::Superadmin => 1,
            Self::Admin => 2,
            Self::Hr => 3,
            Self::Manager => 4,
            Self::Auditor => 5,
            Self::Employee => 6,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Superadmin => "Super Administrator",
            Self::Admin => "Company Administrator",
            Self::Hr => "HR Officer",
            Self::Manager => "Manager",
            Self::Auditor => "Auditor",
            Self::Employee => "Employee",
        }
    }

    /// Human-readable description of the role.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Superadmin => "Operates the platform and manages every company",
            Self::Admin => "Administers one company, its offices, users and billing",
            Self::Hr => "Manages employees, attendance records and leave policies",
            Self::Manager => "Leads a team, validates attendance and assigns missions",
            Self::Auditor => "Consults reports and the audit trail without changing data",
            Self::Employee => "Checks in and out and follows personal attendance",
        }
    }

    /// Returns all roles as a slice, most authoritative first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Superadmin,
            Self::Admin,
            Self::Hr,
            Self::Manager,
            Self::Auditor,
            Self::Employee,
        ]
    }

    /// Parses a role identifier. Unknown identifiers yield `None`.
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|role| role.as_str() == id)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::UnknownRole(s.to_string()))
    }
}
