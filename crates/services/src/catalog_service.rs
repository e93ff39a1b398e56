use std::path::{Path, PathBuf};
use std::sync::Arc;

use course_core::model::{Catalog, Course, CourseId};
use tracing::info;

use crate::error::CatalogServiceError;

const BUNDLED_CATALOG: &str = include_str!("../assets/catalog.json");

/// Where the course catalog is read from at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogSource {
    #[default]
    Bundled,
    File(PathBuf),
}

/// Read-only access to the course catalog.
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<Catalog>,
}

impl CatalogService {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Load the catalog shipped with the app.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Catalog` if the bundled document is invalid.
    pub fn bundled() -> Result<Self, CatalogServiceError> {
        Ok(Self::new(Catalog::from_json(BUNDLED_CATALOG)?))
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Io` if the file cannot be read and
    /// `CatalogServiceError::Catalog` if its content is invalid.
    pub fn from_path(path: &Path) -> Result<Self, CatalogServiceError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogServiceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(Catalog::from_json(&raw)?))
    }

    /// Load from the given source.
    ///
    /// # Errors
    ///
    /// See [`CatalogService::bundled`] and [`CatalogService::from_path`].
    pub fn load(source: &CatalogSource) -> Result<Self, CatalogServiceError> {
        let service = match source {
            CatalogSource::Bundled => Self::bundled()?,
            CatalogSource::File(path) => Self::from_path(path)?,
        };
        info!(
            source = ?source,
            courses = service.catalog.courses().len(),
            "course catalog loaded"
        );
        Ok(service)
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn courses(&self) -> &[Course] {
        self.catalog.courses()
    }

    #[must_use]
    pub fn course(&self, id: &CourseId) -> Option<&Course> {
        self.catalog.course(id)
    }

    /// Look up a course from a raw route segment.
    #[must_use]
    pub fn course_by_str(&self, id: &str) -> Option<&Course> {
        CourseId::new(id).ok().and_then(|id| self.catalog.course(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogServiceError;

    #[test]
    fn bundled_catalog_is_valid() {
        let service = CatalogService::bundled().unwrap();
        assert!(!service.courses().is_empty());
        let course = service.course_by_str("web-foundations").unwrap();
        assert_eq!(course.modules()[0].id().as_str(), "html-basics");
        assert!(course.lesson_count() > 0);
    }

    #[test]
    fn unknown_course_is_none() {
        let service = CatalogService::bundled().unwrap();
        assert!(service.course_by_str("nope").is_none());
        assert!(service.course_by_str("").is_none());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = CatalogService::from_path(Path::new("/definitely/not/here.json"))
            .err()
            .unwrap();
        assert!(matches!(err, CatalogServiceError::Io { .. }));
    }
}
