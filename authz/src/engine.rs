//! Authorization query engine.
//!
//! [`Authorizer`] owns the merged permission and role catalogs and answers
//! every authorization question with plain reads. It is built once, never
//! mutated, and is `Send + Sync`, so it can be shared behind an `Arc`.
//!
//! All string-keyed queries fail closed: an unknown role or permission id
//! yields `false` or an empty list, never an error and never a grant.

use pt_common::Role;
use tracing::{info, trace};

use crate::matrix::PermissionMatrix;
use crate::permissions::{
    modules, BaseCatalog, CatalogError, Category, ExtensionModule, Permission, PermissionCatalog,
};
use crate::roles::{self, RoleCatalog};

/// Immutable authorization engine.
#[derive(Debug, Clone)]
pub struct Authorizer {
    permissions: PermissionCatalog,
    roles: RoleCatalog,
    modules: Vec<String>,
}

impl Authorizer {
    /// Merges `modules` over `base` and builds the engine.
    pub fn build(base: &BaseCatalog, modules: &[ExtensionModule]) -> Result<Self, CatalogError> {
        let (permissions, roles) = roles::merge(base, modules)?;
        let modules: Vec<String> = modules.iter().map(|m| m.name().to_string()).collect();

        info!(
            permissions = permissions.len(),
            modules = ?modules,
            "Authorization catalog built"
        );

        Ok(Self {
            permissions,
            roles,
            modules,
        })
    }

    /// Standard base catalog with every built-in extension module.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::build(&BaseCatalog::standard()?, &modules::builtin()?)
    }

    // === Permission queries ===

    /// Whether the role with id `role` holds `permission`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pt_authz::Authorizer;
    ///
    /// let authz = Authorizer::standard().unwrap();
    /// assert!(authz.has_permission("employee", "pointage.self"));
    /// assert!(!authz.has_permission("employee", "admin.global_management"));
    /// assert!(!authz.has_permission("not_a_role", "pointage.self"));
    /// ```
    #[must_use]
    pub fn has_permission(&self, role: &str, permission: &str) -> bool {
        match Role::parse(role) {
            Some(role) => self.role_has(role, permission),
            None => {
                trace!(role, permission, "Denied: unknown role");
                false
            }
        }
    }

    /// Typed variant of [`Self::has_permission`].
    #[must_use]
    pub fn role_has(&self, role: Role, permission: &str) -> bool {
        match self.permissions.index_of(permission) {
            Some(index) => self.roles.entry(role).permissions().contains(index),
            None => {
                trace!(%role, permission, "Denied: unknown permission");
                false
            }
        }
    }

    /// Full definitions granted to the role with id `role`, in catalog order.
    /// Unknown roles get an empty list.
    #[must_use]
    pub fn role_permissions(&self, role: &str) -> Vec<&Permission> {
        Role::parse(role).map_or_else(Vec::new, |role| self.permissions_of(role))
    }

    /// Typed variant of [`Self::role_permissions`].
    #[must_use]
    pub fn permissions_of(&self, role: Role) -> Vec<&Permission> {
        self.roles
            .entry(role)
            .permissions()
            .iter()
            .filter_map(|index| self.permissions.by_index(index))
            .collect()
    }

    /// Definition lookup.
    #[must_use]
    pub fn permission(&self, id: &str) -> Option<&Permission> {
        self.permissions.get(id)
    }

    #[must_use]
    pub fn permissions_by_category(&self, category: Category) -> Vec<&Permission> {
        self.permissions.by_category(category).collect()
    }

    // === Hierarchy queries ===

    /// Whether `manager` may administer users holding `target`.
    /// Unknown role ids on either side yield `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pt_authz::Authorizer;
    ///
    /// let authz = Authorizer::standard().unwrap();
    /// assert!(authz.can_manage_role("superadmin", "employee"));
    /// assert!(!authz.can_manage_role("employee", "superadmin"));
    /// assert!(!authz.can_manage_role("admin", "admin"));
    /// ```
    #[must_use]
    pub fn can_manage_role(&self, manager: &str, target: &str) -> bool {
        match (Role::parse(manager), Role::parse(target)) {
            (Some(manager), Some(target)) => self.can_manage(manager, target),
            _ => {
                trace!(manager, target, "Denied: unknown role");
                false
            }
        }
    }

    /// Typed variant of [`Self::can_manage_role`].
    #[must_use]
    pub fn can_manage(&self, manager: Role, target: Role) -> bool {
        roles::can_manage(&self.roles, manager, target)
    }

    /// Roles `manager` may administer, most authoritative first.
    #[must_use]
    pub fn manageable_roles(&self, manager: Role) -> Vec<Role> {
        roles::manageable_roles(&self.roles, manager)
    }

    /// Hierarchy level of the role with id `role`.
    #[must_use]
    pub fn level(&self, role: &str) -> Option<u8> {
        Role::parse(role).map(|role| self.roles.entry(role).level)
    }

    // === Catalog access ===

    #[must_use]
    pub const fn catalog(&self) -> &PermissionCatalog {
        &self.permissions
    }

    #[must_use]
    pub const fn roles(&self) -> &RoleCatalog {
        &self.roles
    }

    /// Names of the merged extension modules, in load order.
    #[must_use]
    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    /// Roles × categorized permissions grid for the console.
    #[must_use]
    pub fn matrix(&self) -> PermissionMatrix {
        PermissionMatrix::build(&self.permissions, &self.roles)
    }
}
