#![forbid(unsafe_code)]

pub mod aggregator;
pub mod app_services;
pub mod catalog_service;
pub mod error;
pub mod progress_store;

pub use aggregator::{CourseProgress, ProgressAggregator};
pub use app_services::AppServices;
pub use catalog_service::{CatalogService, CatalogSource};
pub use error::{AppServicesError, CatalogServiceError};
pub use progress_store::{COMPLETED_LESSONS_KEY, LoadStatus, ProgressStore};
