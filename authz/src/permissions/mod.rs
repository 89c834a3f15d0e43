//! Permission catalog and extension modules.
//!
//! - Base catalog: core attendance, team, mission, reporting, administration
//!   and audit permissions
//! - Extension modules: independently defined domains (team operations,
//!   leave, analytics, or JSON-defined ones) merged on top of the base

pub mod base;
pub mod catalog;
pub mod error;
pub mod extension;
pub mod id;
pub mod modules;
pub mod set;

pub use base::BaseCatalog;
pub use catalog::{Permission, PermissionCatalog, PermissionDef};
pub use error::CatalogError;
pub use extension::ExtensionModule;
pub use id::{Category, PermissionId};
pub use set::PermissionSet;
