use std::sync::Arc;

use storage::repository::Storage;

use crate::aggregator::ProgressAggregator;
use crate::catalog_service::{CatalogService, CatalogSource};
use crate::error::AppServicesError;
use crate::progress_store::ProgressStore;

/// Assembles app-facing services around one shared `ProgressStore`.
#[derive(Clone)]
pub struct AppServices {
    progress_store: Arc<ProgressStore>,
    aggregator: Arc<ProgressAggregator>,
    catalog: Arc<CatalogService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or catalog loading fails.
    pub async fn new_sqlite(
        db_url: &str,
        catalog_source: &CatalogSource,
    ) -> Result<Self, AppServicesError> {
        let catalog = CatalogService::load(catalog_source)?;
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, catalog))
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, catalog: CatalogService) -> Self {
        let progress_store = Arc::new(ProgressStore::new(Arc::clone(&storage.kv)));
        let aggregator = Arc::new(ProgressAggregator::new(Arc::clone(&progress_store)));
        Self {
            progress_store,
            aggregator,
            catalog: Arc::new(catalog),
        }
    }

    #[must_use]
    pub fn progress_store(&self) -> Arc<ProgressStore> {
        Arc::clone(&self.progress_store)
    }

    #[must_use]
    pub fn aggregator(&self) -> Arc<ProgressAggregator> {
        Arc::clone(&self.aggregator)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }
}
