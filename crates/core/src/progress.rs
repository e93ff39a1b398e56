//! Completion counts and percentages derived from a `CompletionSet`.
//!
//! Snapshots are computed on demand and never stored.

use serde::Serialize;

use crate::model::{CompletionSet, Module};

/// Derived `{completed, total, percentage}` triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
}

impl ProgressSnapshot {
    /// Builds a snapshot from raw counts.
    ///
    /// `completed` is clamped to `total`.
    #[must_use]
    pub fn from_counts(completed: usize, total: usize) -> Self {
        let completed = completed.min(total);
        Self {
            completed,
            total,
            percentage: percentage(completed, total),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// `round(100 * completed / total)` with halves rounded up, `0` when `total == 0`.
#[must_use]
pub fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    let rounded = (200 * completed + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}

fn completed_in(completed: &CompletionSet, module: &Module) -> usize {
    module
        .lessons()
        .iter()
        .filter(|lesson| completed.contains(&module.lesson_ref(lesson)))
        .count()
}

#[must_use]
pub fn module_progress(completed: &CompletionSet, module: &Module) -> ProgressSnapshot {
    ProgressSnapshot::from_counts(completed_in(completed, module), module.lessons().len())
}

/// Lesson-weighted progress across modules: counts are summed before the
/// single percentage is taken, so small modules do not skew the result.
#[must_use]
pub fn course_progress(completed: &CompletionSet, modules: &[Module]) -> ProgressSnapshot {
    let (done, total) = modules.iter().fold((0, 0), |(done, total), module| {
        (
            done + completed_in(completed, module),
            total + module.lessons().len(),
        )
    });
    ProgressSnapshot::from_counts(done, total)
}
