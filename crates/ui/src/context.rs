use std::sync::Arc;

use services::{CatalogService, ProgressAggregator, ProgressStore};

/// Services the UI needs, supplied by the composition root (`crates/app`).
pub trait UiApp: Send + Sync {
    fn progress_store(&self) -> Arc<ProgressStore>;
    fn aggregator(&self) -> Arc<ProgressAggregator>;
    fn catalog(&self) -> Arc<CatalogService>;
}

/// Shared handles injected into every view through Dioxus context.
///
/// Views never talk to storage directly; all progress writes go through
/// the one `ProgressStore` held here.
#[derive(Clone)]
pub struct AppContext {
    progress_store: Arc<ProgressStore>,
    aggregator: Arc<ProgressAggregator>,
    catalog: Arc<CatalogService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            progress_store: app.progress_store(),
            aggregator: app.aggregator(),
            catalog: app.catalog(),
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

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
