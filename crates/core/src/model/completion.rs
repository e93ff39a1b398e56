use std::collections::BTreeSet;

use thiserror::Error;

use crate::model::lesson_ref::{LessonRef, LessonRefError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompletionSetError {
    #[error("persisted completion value is not a JSON array of strings: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result of decoding a persisted completion value.
///
/// Entries that are not valid lesson references are reported in `skipped`
/// instead of failing the whole decode.
#[derive(Debug)]
pub struct DecodedCompletionSet {
    pub set: CompletionSet,
    pub skipped: Vec<(String, LessonRefError)>,
}

/// Deduplicated set of completed lessons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSet {
    lessons: BTreeSet<LessonRef>,
}

impl CompletionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a lesson. Returns `true` if it was not already present.
    pub fn insert(&mut self, lesson: LessonRef) -> bool {
        self.lessons.insert(lesson)
    }

    /// Removes a lesson. Returns `true` if it was present.
    pub fn remove(&mut self, lesson: &LessonRef) -> bool {
        self.lessons.remove(lesson)
    }

    #[must_use]
    pub fn contains(&self, lesson: &LessonRef) -> bool {
        self.lessons.contains(lesson)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LessonRef> {
        self.lessons.iter()
    }

    /// Serializes to the persisted shape: a JSON array of `module:lesson` strings.
    #[must_use]
    pub fn to_json(&self) -> String {
        let keys: Vec<String> = self.lessons.iter().map(ToString::to_string).collect();
        // A Vec<String> always serializes.
        serde_json::to_string(&keys).unwrap_or_else(|_| "[]".to_string())
    }

    /// Decodes the persisted shape.
    ///
    /// # Errors
    ///
    /// Returns `CompletionSetError::Malformed` if `raw` is not a JSON array of strings.
    pub fn from_json(raw: &str) -> Result<DecodedCompletionSet, CompletionSetError> {
        let keys: Vec<String> = serde_json::from_str(raw)?;
        let mut set = Self::new();
        let mut skipped = Vec::new();
        for key in keys {
            match key.parse::<LessonRef>() {
                Ok(lesson) => {
                    set.insert(lesson);
                }
                Err(err) => skipped.push((key, err)),
            }
        }
        Ok(DecodedCompletionSet { set, skipped })
    }
}

impl FromIterator<LessonRef> for CompletionSet {
    fn from_iter<T: IntoIterator<Item = LessonRef>>(iter: T) -> Self {
        Self {
            lessons: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CompletionSet {
    type Item = &'a LessonRef;
    type IntoIter = std::collections::btree_set::Iter<'a, LessonRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.lessons.iter()
    }
}
