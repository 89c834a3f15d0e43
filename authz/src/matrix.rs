//! Permission matrix for the admin console.
//!
//! Columns are roles ordered by level; rows are permissions grouped by
//! category in catalog order. The matrix is a snapshot: it is rebuilt from
//! the engine, never edited.

use pt_common::Role;
use serde::Serialize;

use crate::permissions::{Category, PermissionCatalog, PermissionId};
use crate::roles::{style, RoleCatalog, RoleStyle};

/// Column header.
#[derive(Debug, Clone, Serialize)]
pub struct MatrixRole {
    pub id: Role,
    pub name: &'static str,
    pub level: u8,
    pub style: RoleStyle,
}

/// One permission row; `granted[i]` belongs to `roles[i]`.
#[derive(Debug, Clone, Serialize)]
pub struct MatrixRow {
    pub id: PermissionId,
    pub name: String,
    pub description: String,
    pub granted: Vec<bool>,
}

/// Rows of one category.
#[derive(Debug, Clone, Serialize)]
pub struct MatrixCategory {
    pub id: Category,
    pub label: &'static str,
    pub rows: Vec<MatrixRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PermissionMatrix {
    pub roles: Vec<MatrixRole>,
    pub categories: Vec<MatrixCategory>,
}

impl PermissionMatrix {
    pub(crate) fn build(permissions: &PermissionCatalog, roles: &RoleCatalog) -> Self {
        let ordered = roles.ordered();

        let categories = permissions
            .categories()
            .into_iter()
            .map(|category| MatrixCategory {
                id: category,
                label: category.label(),
                rows: permissions
                    .by_category(category)
                    .filter_map(|permission| {
                        let index = permissions.index_of(permission.id.as_str())?;
                        Some(MatrixRow {
                            id: permission.id.clone(),
                            name: permission.name.clone(),
                            description: permission.description.clone(),
                            granted: ordered
                                .iter()
                                .map(|entry| entry.permissions().contains(index))
                                .collect(),
                        })
                    })
                    .collect(),
            })
            .collect();

        let roles = ordered
            .iter()
            .map(|entry| MatrixRole {
                id: entry.role,
                name: entry.role.name(),
                level: entry.level,
                style: style(entry.role),
            })
            .collect();

        Self { roles, categories }
    }

    /// Cell lookup. `None` if the permission is not in the matrix.
    #[must_use]
    pub fn is_granted(&self, role: Role, permission: &str) -> Option<bool> {
        let column = self.roles.iter().position(|r| r.id == role)?;
        self.categories
            .iter()
            .flat_map(|c| &c.rows)
            .find(|row| row.id.as_str() == permission)
            .and_then(|row| row.granted.get(column).copied())
    }

    /// Number of permission rows across all categories.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.categories.iter().map(|c| c.rows.len()).sum()
    }
}
