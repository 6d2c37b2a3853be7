//! Copy-and-swap holder for the current catalogue.
//!
//! A refresh builds a complete [`Catalogue`] off to the side and publishes
//! it with a single pointer swap. Readers clone the `Arc` they find and
//! never see a partially built mapping.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use super::errors::CatalogueError;
use super::source::CatalogueSource;
use super::types::{Catalogue, CatalogueEntry};

type Shared = Arc<RwLock<Arc<Catalogue>>>;

/// Sole writer of the catalogue. Owned by the refresh scheduler.
#[derive(Debug)]
pub struct CatalogueStore<C> {
    source: C,
    current: Shared,
}

impl<C: CatalogueSource> CatalogueStore<C> {
    /// Create a store that starts out empty.
    pub fn new(source: C) -> Self {
        Self {
            source,
            current: Arc::new(RwLock::new(Arc::new(Catalogue::default()))),
        }
    }

    /// Read-only view for scanners and status summaries.
    pub fn handle(&self) -> CatalogueHandle {
        CatalogueHandle {
            current: Arc::clone(&self.current),
        }
    }

    /// Fetch a new catalogue and publish it.
    ///
    /// On failure the current catalogue is left untouched. Returns the
    /// size of the published catalogue.
    pub async fn refresh(&self) -> Result<usize, CatalogueError> {
        let fresh = match self.source.fetch().await {
            Ok(catalogue) => catalogue,
            Err(e) => {
                warn!(
                    event = "core.catalogue.refresh_failed",
                    error = %e,
                    retained_entries = self.size(),
                );
                return Err(e);
            }
        };

        let size = fresh.len();
        self.publish(fresh);

        info!(event = "core.catalogue.refresh_completed", entries = size);
        Ok(size)
    }

    pub fn size(&self) -> usize {
        self.handle().size()
    }

    fn publish(&self, catalogue: Catalogue) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(catalogue);
    }
}

/// Cheap, cloneable read access to the current catalogue.
#[derive(Debug, Clone)]
pub struct CatalogueHandle {
    current: Shared,
}

impl CatalogueHandle {
    /// The catalogue as of now. Stays valid (and unchanged) even if a
    /// refresh publishes a newer one while it is in use.
    pub fn snapshot(&self) -> Arc<Catalogue> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    pub fn lookup(&self, name: &str) -> Option<CatalogueEntry> {
        self.snapshot().lookup(name)
    }

    pub fn size(&self) -> usize {
        self.snapshot().len()
    }
}
