use std::sync::Arc;

use course_core::ProgressSnapshot;
use course_core::model::{CompletionSet, Course, Module, ModuleId};
use course_core::progress::{course_progress, module_progress};
use serde::Serialize;

use crate::progress_store::ProgressStore;

/// Course snapshot plus one snapshot per module, all taken from a single read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseProgress {
    pub course: ProgressSnapshot,
    pub modules: Vec<(ModuleId, ProgressSnapshot)>,
}

impl CourseProgress {
    /// Derives every snapshot of `course` from one completion set.
    #[must_use]
    pub fn from_completed(course: &Course, completed: &CompletionSet) -> Self {
        Self {
            course: course_progress(completed, course.modules()),
            modules: course
                .modules()
                .iter()
                .map(|module| (module.id().clone(), module_progress(completed, module)))
                .collect(),
        }
    }

    #[must_use]
    pub fn module(&self, id: &ModuleId) -> ProgressSnapshot {
        self.modules
            .iter()
            .find(|(module_id, _)| module_id == id)
            .map(|(_, snapshot)| *snapshot)
            .unwrap_or_default()
    }
}

/// Stateless derivation of progress snapshots from the store's current set.
#[derive(Clone)]
pub struct ProgressAggregator {
    store: Arc<ProgressStore>,
}

impl ProgressAggregator {
    #[must_use]
    pub fn new(store: Arc<ProgressStore>) -> Self {
        Self { store }
    }

    pub async fn module_progress(&self, module: &Module) -> ProgressSnapshot {
        let completed = self.store.get_all_completed().await;
        module_progress(&completed, module)
    }

    pub async fn course_progress(&self, modules: &[Module]) -> ProgressSnapshot {
        let completed = self.store.get_all_completed().await;
        course_progress(&completed, modules)
    }

    pub async fn course_overview(&self, course: &Course) -> CourseProgress {
        let completed = self.store.get_all_completed().await;
        CourseProgress::from_completed(course, &completed)
    }
}
