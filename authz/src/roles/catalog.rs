//! Role catalog and the catalog merge.
//!
//! Merge order:
//! 1. Base permission definitions are interned
//! 2. Base grants are resolved (dangling ids fail)
//! 3. Each extension module is folded in: namespace checked, definitions
//!    appended, grants resolved and unioned into the role's set

use std::collections::HashSet;

use pt_common::Role;
use tracing::debug;

use crate::permissions::{
    BaseCatalog, CatalogError, ExtensionModule, PermissionCatalog, PermissionSet,
};

/// One role with its level and merged permission set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleEntry {
    pub role: Role,
    pub level: u8,
    permissions: PermissionSet,
}

impl RoleEntry {
    fn new(role: Role) -> Self {
        Self {
            role,
            level: role.level(),
            permissions: PermissionSet::new(),
        }
    }

    /// Merged permission set, as catalog indices.
    #[must_use]
    pub const fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }
}

/// Immutable per-role view of the merged grants.
#[derive(Debug, Clone)]
pub struct RoleCatalog {
    // Same order as `Role::all()`.
    entries: Vec<RoleEntry>,
}

impl RoleCatalog {
    /// Entry for a role. Every role of the closed enumeration has one.
    #[must_use]
    pub fn entry(&self, role: Role) -> &RoleEntry {
        &self.entries[Self::slot(role)]
    }

    /// Entries ordered by level, most authoritative first.
    ///
    /// Roles sharing a level keep their declaration order.
    #[must_use]
    pub fn ordered(&self) -> Vec<&RoleEntry> {
        let mut ordered: Vec<&RoleEntry> = self.entries.iter().collect();
        ordered.sort_by_key(|entry| entry.level);
        ordered
    }

    // Must follow `Role::all()` order.
    const fn slot(role: Role) -> usize {
        match role {
            Role::Superadmin => 0,
            Role::Admin => 1,
            Role::Hr => 2,
            Role::Manager => 3,
            Role::Auditor => 4,
            Role::Employee => 5,
        }
    }
}

/// State threaded through the merge fold.
struct MergeState {
    permissions: PermissionCatalog,
    entries: Vec<RoleEntry>,
    namespaces: HashSet<String>,
    module_names: HashSet<String>,
}

impl MergeState {
    fn from_base(base: &BaseCatalog) -> Result<Self, CatalogError> {
        let permissions = PermissionCatalog::new(base.permissions.iter().cloned())?;
        let mut entries: Vec<RoleEntry> = Role::all().iter().map(|r| RoleEntry::new(*r)).collect();

        for (role, ids) in &base.grants {
            let entry = &mut entries[RoleCatalog::slot(*role)];
            for id in ids {
                let index =
                    permissions
                        .index_of(id)
                        .ok_or_else(|| CatalogError::DanglingPermission {
                            role: role.to_string(),
                            id: id.clone(),
                        })?;
                entry.permissions.insert(index);
            }
        }

        Ok(Self {
            permissions,
            entries,
            namespaces: HashSet::new(),
            module_names: HashSet::new(),
        })
    }

    fn apply(mut self, module: &ExtensionModule) -> Result<Self, CatalogError> {
        let name = module.name();
        let namespace = module.namespace();

        if !self.module_names.insert(name.to_string()) {
            return Err(CatalogError::DuplicateModule {
                module: name.to_string(),
            });
        }

        if self.namespaces.contains(namespace) {
            return Err(CatalogError::NamespaceCollision {
                module: name.to_string(),
                namespace: namespace.to_string(),
                owner: "another extension module".to_string(),
            });
        }
        if self.permissions.has_domain(namespace) {
            return Err(CatalogError::NamespaceCollision {
                module: name.to_string(),
                namespace: namespace.to_string(),
                owner: "the base catalog".to_string(),
            });
        }
        self.namespaces.insert(namespace.to_string());

        for permission in module.permissions() {
            if permission.id.domain() != namespace {
                return Err(CatalogError::OutsideNamespace {
                    module: name.to_string(),
                    namespace: namespace.to_string(),
                    id: permission.id.to_string(),
                });
            }
            self.permissions.insert(permission.clone())?;
        }

        for (role_id, ids) in module.grants() {
            let role = Role::parse(role_id).ok_or_else(|| CatalogError::UnknownRole {
                module: name.to_string(),
                role: role_id.to_string(),
            })?;
            let entry = &mut self.entries[RoleCatalog::slot(role)];
            for id in ids {
                if !module.defines(id) {
                    return Err(CatalogError::ForeignPermission {
                        module: name.to_string(),
                        id: id.clone(),
                    });
                }
                let index = self.permissions.index_of(id).ok_or_else(|| {
                    CatalogError::DanglingPermission {
                        role: role.to_string(),
                        id: id.clone(),
                    }
                })?;
                entry.permissions.insert(index);
            }
        }

        debug!(
            module = name,
            namespace,
            permissions = module.permissions().len(),
            "Merged extension module"
        );
        Ok(self)
    }
}

/// Builds the merged permission catalog and role catalog.
///
/// Pure function of its inputs: a fold of `modules` over the base catalog.
/// Any configuration error aborts the whole merge.
pub fn merge(
    base: &BaseCatalog,
    modules: &[ExtensionModule],
) -> Result<(PermissionCatalog, RoleCatalog), CatalogError> {
    let state = modules
        .iter()
        .try_fold(MergeState::from_base(base)?, MergeState::apply)?;
    Ok((
        state.permissions,
        RoleCatalog {
            entries: state.entries,
        },
    ))
}
