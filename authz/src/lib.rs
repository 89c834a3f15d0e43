//! Pointage Authorization Engine
//!
//! Hierarchical, multi-domain RBAC for the attendance/HR platform: a base
//! permission catalog, independently defined extension modules merged on top
//! of it, and pure queries over the result.

pub mod config;
pub mod engine;
pub mod matrix;
pub mod observability;
pub mod permissions;
pub mod roles;
pub mod shared;

pub use engine::Authorizer;
pub use matrix::PermissionMatrix;
pub use permissions::CatalogError;
pub use shared::SharedAuthorizer;
