//! Permission extension modules.
//!
//! A module is a self-contained pair of (permission definitions, role grants)
//! for one functional domain. Modules never reference each other and never
//! edit the base catalog; they are merged by a fold when the role catalog is
//! built (see [`crate::roles::merge`]).
//!
//! Grants name roles by their string id so that a module shipped as data can
//! be checked against the closed role enumeration at load time.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::catalog::{Permission, PermissionDef};
use super::error::CatalogError;
use super::id::Category;

/// Independently defined permission sub-catalog.
#[derive(Debug, Clone)]
pub struct ExtensionModule {
    pub(crate) name: String,
    pub(crate) namespace: String,
    pub(crate) permissions: Vec<Permission>,
    pub(crate) grants: Vec<(String, Vec<String>)>,
}

impl ExtensionModule {
    /// Builds a module from static tables.
    pub fn from_defs(
        name: &str,
        namespace: &str,
        permissions: &[PermissionDef],
        grants: &[(&str, &[&str])],
    ) -> Result<Self, CatalogError> {
        let permissions = permissions
            .iter()
            .map(|(id, label, description, category)| {
                Permission::new(id, *label, *description, *category)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let grants = grants
            .iter()
            .map(|(role, ids)| {
                (
                    (*role).to_string(),
                    ids.iter().map(|id| (*id).to_string()).collect(),
                )
            })
            .collect();
        Ok(Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
            permissions,
            grants,
        })
    }

    /// Parses a declarative module definition.
    ///
    /// ```json
    /// {
    ///   "name": "expenses",
    ///   "namespace": "expenses",
    ///   "permissions": [
    ///     { "id": "expenses.submit", "name": "Submit", "description": "Submit expense claims.", "category": "reporting" }
    ///   ],
    ///   "grants": { "employee": ["expenses.submit"] }
    /// }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let definition: ModuleDefinition = serde_json::from_str(json)
            .map_err(|e| CatalogError::InvalidDefinition(e.to_string()))?;
        definition.try_into()
    }

    /// Loads every `*.json` definition in `dir`, sorted by file name.
    pub fn load_dir(dir: &Path) -> Result<Vec<Self>, CatalogError> {
        let entries = std::fs::read_dir(dir).map_err(|e| {
            CatalogError::InvalidDefinition(format!("{}: {e}", dir.display()))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| CatalogError::InvalidDefinition(format!("{}: {e}", dir.display())))?
                .path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        paths
            .iter()
            .map(|path| {
                let json = std::fs::read_to_string(path).map_err(|e| {
                    CatalogError::InvalidDefinition(format!("{}: {e}", path.display()))
                })?;
                Self::from_json(&json)
            })
            .collect()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Whether this module defines `id`.
    #[must_use]
    pub fn defines(&self, id: &str) -> bool {
        self.permissions.iter().any(|p| p.id.as_str() == id)
    }

    /// Permission ids this module grants to the role with id `role`.
    /// Roles the module does not mention get nothing.
    pub fn grants_for<'a>(&'a self, role: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.grants
            .iter()
            .filter(move |(r, _)| r == role)
            .flat_map(|(_, ids)| ids.iter().map(String::as_str))
    }

    /// Every `(role id, permission ids)` grant in declaration order.
    pub fn grants(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.grants.iter().map(|(r, ids)| (r.as_str(), ids.as_slice()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModuleDefinition {
    name: String,
    namespace: String,
    permissions: Vec<PermissionDefinition>,
    #[serde(default, deserialize_with = "unique_grants")]
    grants: Vec<(String, Vec<String>)>,
}

/// Grants object in declaration order. A role key listed twice is an error
/// rather than last-one-wins.
fn unique_grants<'de, D>(deserializer: D) -> Result<Vec<(String, Vec<String>)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct GrantsVisitor;

    impl<'de> Visitor<'de> for GrantsVisitor {
        type Value = Vec<(String, Vec<String>)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object mapping role ids to permission id lists")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut seen = HashSet::new();
            let mut grants = Vec::new();
            while let Some((role, ids)) = map.next_entry::<String, Vec<String>>()? {
                if !seen.insert(role.clone()) {
                    return Err(de::Error::custom(format!(
                        "duplicate grant entry for role '{role}'"
                    )));
                }
                grants.push((role, ids));
            }
            Ok(grants)
        }
    }

    deserializer.deserialize_map(GrantsVisitor)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PermissionDefinition {
    id: String,
    name: String,
    description: String,
    category: Category,
}

impl TryFrom<ModuleDefinition> for ExtensionModule {
    type Error = CatalogError;

    fn try_from(definition: ModuleDefinition) -> Result<Self, Self::Error> {
        let permissions = definition
            .permissions
            .into_iter()
            .map(|p| Permission::new(&p.id, p.name, p.description, p.category))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: definition.name,
            namespace: definition.namespace,
            permissions,
            grants: definition.grants,
        })
    }
}
