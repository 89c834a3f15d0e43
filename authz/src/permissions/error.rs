//! Catalog construction errors.
//!
//! Every variant aborts construction. A catalog that fails validation is
//! never published, so callers never observe a partially merged catalog.

use thiserror::Error;

/// Configuration error detected while building the permission and role
/// catalogs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two definitions share the same permission id.
    #[error("Duplicate permission id: {id}")]
    DuplicatePermission { id: String },

    /// Permission id is not of the form `domain.action`.
    #[error("Invalid permission id '{id}': expected lowercase 'domain.action'")]
    InvalidPermissionId { id: String },

    /// A role assignment references a permission that is not in the catalog.
    #[error("Role '{role}' references unknown permission '{id}'")]
    DanglingPermission { role: String, id: String },

    /// An extension module references a role outside the closed enumeration.
    #[error("Module '{module}' references unknown role '{role}'")]
    UnknownRole { module: String, role: String },

    /// An extension module assigns a permission it does not define.
    #[error("Module '{module}' assigns permission '{id}' that it does not define")]
    ForeignPermission { module: String, id: String },

    /// An extension module defines a permission outside its namespace.
    #[error("Module '{module}' defines '{id}' outside its namespace '{namespace}'")]
    OutsideNamespace {
        module: String,
        namespace: String,
        id: String,
    },

    /// An extension module claims a namespace already in use.
    #[error("Module '{module}' claims namespace '{namespace}' already used by {owner}")]
    NamespaceCollision {
        module: String,
        namespace: String,
        owner: String,
    },

    /// Two extension modules share the same name.
    #[error("Duplicate extension module: {module}")]
    DuplicateModule { module: String },

    /// A declarative module definition could not be parsed.
    #[error("Invalid module definition: {0}")]
    InvalidDefinition(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let dup = CatalogError::DuplicatePermission {
            id: "leave.request".to_string(),
        };
        assert!(dup.to_string().contains("leave.request"));

        let role = CatalogError::UnknownRole {
            module: "leave".to_string(),
            role: "intern".to_string(),
        };
        assert!(role.to_string().contains("intern"));
        assert!(role.to_string().contains("leave"));

        let collision = CatalogError::NamespaceCollision {
            module: "extra".to_string(),
            namespace: "pointage".to_string(),
            owner: "the base catalog".to_string(),
        };
        assert!(collision.to_string().contains("pointage"));
    }
}
