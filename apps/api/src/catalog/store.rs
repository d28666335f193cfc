//! Holds the active catalog snapshot and swaps it on reload.
//!
//! Requests clone the current `Arc<Catalog>` and compute on it without holding
//! the lock, so a reload never changes the catalog under an in-flight request.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info};

use crate::catalog::provider::{CatalogLoadError, CatalogProvider};
use crate::recommend::career::Catalog;

#[derive(Clone)]
pub struct CatalogStore {
    current: Arc<RwLock<Arc<Catalog>>>,
    provider: Arc<dyn CatalogProvider>,
}

impl CatalogStore {
    /// Performs the initial load. An invalid catalog is fatal here.
    pub async fn load(provider: Arc<dyn CatalogProvider>) -> Result<Self, CatalogLoadError> {
        let catalog = fetch(provider.as_ref()).await?;
        Ok(Self {
            current: Arc::new(RwLock::new(Arc::new(catalog))),
            provider,
        })
    }

    /// The catalog version to use for one computation.
    pub async fn snapshot(&self) -> Arc<Catalog> {
        self.current.read().await.clone()
    }

    /// Reloads from the provider and swaps the snapshot. On failure the previous
    /// snapshot stays active and the error is returned.
    pub async fn reload(&self) -> Result<Arc<Catalog>, CatalogLoadError> {
        let catalog = Arc::new(fetch(self.provider.as_ref()).await?);
        *self.current.write().await = catalog.clone();
        Ok(catalog)
    }
}

async fn fetch(provider: &dyn CatalogProvider) -> Result<Catalog, CatalogLoadError> {
    match provider.load_catalog().await {
        Ok(catalog) => {
            info!(
                "Loaded catalog from {}: {} careers, {} resources",
                provider.backend(),
                catalog.career_count(),
                catalog.resource_count()
            );
            Ok(catalog)
        }
        Err(e) => {
            error!("Catalog load from {} failed: {e}", provider.backend());
            Err(e)
        }
    }
}
