//! Permission catalog.
//!
//! Immutable mapping from permission id to definition. Each permission is
//! interned into a dense index in insertion order; role grants are stored as
//! [`PermissionSet`](super::PermissionSet)s over those indices.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::CatalogError;
use super::id::{Category, PermissionId};

/// Atomic capability that can be granted to a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Unique `domain.action` identifier
    pub id: PermissionId,
    /// Short display label
    pub name: String,
    /// One-sentence explanation of the capability
    pub description: String,
    /// Functional category
    pub category: Category,
}

impl Permission {
    /// Builds a definition, validating the identifier.
    pub fn new(
        id: &str,
        name: impl Into<String>,
        description: impl Into<String>,
        category: Category,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            id: PermissionId::parse(id)?,
            name: name.into(),
            description: description.into(),
            category,
        })
    }
}

/// Static permission definition: `(id, name, description, category)`.
pub type PermissionDef = (&'static str, &'static str, &'static str, Category);

/// Read-only permission catalog.
#[derive(Debug, Clone, Default)]
pub struct PermissionCatalog {
    entries: Vec<Permission>,
    index: HashMap<PermissionId, usize>,
}

impl PermissionCatalog {
    /// Builds a catalog, failing on the first duplicate id.
    pub fn new(permissions: impl IntoIterator<Item = Permission>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for permission in permissions {
            catalog.insert(permission)?;
        }
        Ok(catalog)
    }

    /// Builds a catalog from static definitions.
    pub fn from_defs(defs: &[PermissionDef]) -> Result<Self, CatalogError> {
        let permissions = defs
            .iter()
            .map(|(id, name, description, category)| {
                Permission::new(id, *name, *description, *category)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(permissions)
    }

    /// Appends a definition and returns its index.
    pub(crate) fn insert(&mut self, permission: Permission) -> Result<usize, CatalogError> {
        if self.index.contains_key(&permission.id) {
            return Err(CatalogError::DuplicatePermission {
                id: permission.id.to_string(),
            });
        }
        let position = self.entries.len();
        self.index.insert(permission.id.clone(), position);
        self.entries.push(permission);
        Ok(position)
    }

    /// Looks up a definition. Unknown ids yield `None`, never a default.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Permission> {
        self.index_of(id).map(|i| &self.entries[i])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Interned index of a permission.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    #[must_use]
    pub fn by_index(&self, index: usize) -> Option<&Permission> {
        self.entries.get(index)
    }

    /// All definitions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.entries.iter()
    }

    /// Definitions of one category, in insertion order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Permission> {
        self.entries.iter().filter(move |p| p.category == category)
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for permission in &self.entries {
            if !seen.contains(&permission.category) {
                seen.push(permission.category);
            }
        }
        seen
    }

    /// Whether any definition lives under `domain.`.
    #[must_use]
    pub fn has_domain(&self, domain: &str) -> bool {
        self.entries.iter().any(|p| p.id.domain() == domain)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
