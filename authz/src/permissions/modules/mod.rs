//! Built-in extension modules.

mod analytics;
mod leave;
mod team_ops;

use super::error::CatalogError;
use super::extension::ExtensionModule;

/// Names of the built-in modules, in load order.
pub const BUILTIN_MODULES: &[&str] = &[team_ops::NAME, leave::NAME, analytics::NAME];

/// All built-in modules, in load order.
pub fn builtin() -> Result<Vec<ExtensionModule>, CatalogError> {
    Ok(vec![team_ops::module()?, leave::module()?, analytics::module()?])
}

/// Built-in modules except the ones named in `disabled`.
pub fn builtin_except(disabled: &[String]) -> Result<Vec<ExtensionModule>, CatalogError> {
    Ok(builtin()?
        .into_iter()
        .filter(|m| !disabled.iter().any(|name| name == m.name()))
        .collect())
}
