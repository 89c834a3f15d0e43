//! Process-wide authorizer handle with atomic reload.
//!
//! Readers take a snapshot (`Arc<Authorizer>`) without locking. A reload
//! builds the new catalog completely before publishing it with one atomic
//! store, so no reader can observe a partially merged catalog. A failed
//! reload leaves the current catalog in place.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{info, warn};

use crate::engine::Authorizer;
use crate::permissions::{BaseCatalog, CatalogError, ExtensionModule};

pub struct SharedAuthorizer {
    current: ArcSwap<Authorizer>,
}

impl SharedAuthorizer {
    #[must_use]
    pub fn new(authorizer: Authorizer) -> Self {
        Self {
            current: ArcSwap::from_pointee(authorizer),
        }
    }

    /// Current catalog. Keep the snapshot for the duration of one request so
    /// every check in it sees the same catalog.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Authorizer> {
        self.current.load_full()
    }

    /// Rebuilds from `base` and `modules` and publishes the result.
    pub fn reload(
        &self,
        base: &BaseCatalog,
        modules: &[ExtensionModule],
    ) -> Result<(), CatalogError> {
        match Authorizer::build(base, modules) {
            Ok(next) => {
                self.current.store(Arc::new(next));
                info!(modules = modules.len(), "Authorization catalog reloaded");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Rejected authorization catalog reload");
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for SharedAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedAuthorizer")
            .field("modules", &self.current.load().modules())
            .finish()
    }
}
