//! Role catalog, hierarchy authority and presentation lookup.

pub mod catalog;
pub mod hierarchy;
pub mod presentation;

pub use catalog::{merge, RoleCatalog, RoleEntry};
pub use hierarchy::{can_manage, manageable_roles};
pub use presentation::{style, RoleStyle};
