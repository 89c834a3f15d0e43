//! Engine Configuration
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Result};

use crate::permissions::{modules, CatalogError, ExtensionModule};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => bail!("AUTHZ_LOG_FORMAT must be 'json' or 'pretty', got '{other}'"),
        }
    }
}

/// Engine configuration loaded from environment variables.
#[derive(Debug, Clone, Default)]
pub struct AuthzConfig {
    /// Log output format (default: json)
    pub log_format: LogFormat,

    /// Built-in extension modules to leave out (comma-separated names)
    pub disabled_modules: Vec<String>,

    /// Directory of JSON module definitions merged after the built-ins (optional)
    pub module_dir: Option<PathBuf>,
}

impl AuthzConfig {
    /// Load configuration from environment variables.
    ///
    /// - `AUTHZ_LOG_FORMAT`: `json` or `pretty`
    /// - `AUTHZ_DISABLED_MODULES`: e.g. `analytics,leave`
    /// - `AUTHZ_MODULE_DIR`: directory scanned for `*.json` modules
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            log_format: env::var("AUTHZ_LOG_FORMAT")
                .ok()
                .map(|v| v.parse::<LogFormat>())
                .transpose()?
                .unwrap_or_default(),
            disabled_modules: env::var("AUTHZ_DISABLED_MODULES")
                .map(|s| {
                    s.split(',')
                        .map(|m| m.trim().to_string())
                        .filter(|m| !m.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            module_dir: env::var("AUTHZ_MODULE_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// Extension modules to merge: enabled built-ins, then the module
    /// directory in file name order.
    pub fn modules(&self) -> Result<Vec<ExtensionModule>, CatalogError> {
        let mut modules = modules::builtin_except(&self.disabled_modules)?;
        if let Some(dir) = &self.module_dir {
            modules.extend(ExtensionModule::load_dir(dir)?);
        }
        Ok(modules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &["AUTHZ_LOG_FORMAT", "AUTHZ_DISABLED_MODULES", "AUTHZ_MODULE_DIR"];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = AuthzConfig::from_env().unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.disabled_modules.is_empty());
        assert!(config.module_dir.is_none());
        assert_eq!(config.modules().unwrap().len(), modules::BUILTIN_MODULES.len());
    }

    #[test]
    #[serial]
    fn test_disabled_modules() {
        clear_env();
        env::set_var("AUTHZ_DISABLED_MODULES", " analytics, ,leave ");
        let config = AuthzConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.disabled_modules, vec!["analytics", "leave"]);
        let names: Vec<String> = config
            .modules()
            .unwrap()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        assert_eq!(names, vec!["team_ops"]);
    }

    #[test]
    #[serial]
    fn test_log_format() {
        clear_env();
        env::set_var("AUTHZ_LOG_FORMAT", "Pretty");
        let pretty = AuthzConfig::from_env().unwrap();
        env::set_var("AUTHZ_LOG_FORMAT", "xml");
        let invalid = AuthzConfig::from_env();
        clear_env();

        assert_eq!(pretty.log_format, LogFormat::Pretty);
        assert!(invalid.is_err());
    }

    #[test]
    #[serial]
    fn test_module_dir_is_merged_after_builtins() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("overtime.json"),
            r#"{
                "name": "overtime",
                "namespace": "overtime",
                "permissions": [
                    { "id": "overtime.declare", "name": "Declare overtime", "description": "Declare extra hours.", "category": "attendance" }
                ],
                "grants": { "employee": ["overtime.declare"] }
            }"#,
        )
        .unwrap();

        env::set_var("AUTHZ_MODULE_DIR", dir.path());
        let config = AuthzConfig::from_env().unwrap();
        clear_env();

        let modules = config.modules().unwrap();
        assert_eq!(modules.last().unwrap().name(), "overtime");
        assert_eq!(modules.len(), modules::BUILTIN_MODULES.len() + 1);
    }
}
