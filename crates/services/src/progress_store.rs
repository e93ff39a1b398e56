use std::sync::Arc;

use course_core::model::{CompletionSet, LessonRef};
use storage::repository::KeyValueStore;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Well-known key holding the JSON array of `module:lesson` strings.
pub const COMPLETED_LESSONS_KEY: &str = "completedLessons";

/// What the store found the last time it read the persisted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing persisted yet (new profile, or after a reset).
    Fresh,
    /// A valid value was read or written.
    Loaded,
    /// The persisted value could not be decoded and is read as empty.
    Corrupted,
    /// The backing store could not be read.
    Unavailable,
}

#[derive(Debug)]
struct Loaded {
    set: CompletionSet,
    status: LoadStatus,
}

/// Single source of truth for completed lessons.
///
/// Nothing is cached between calls: every operation reads the persisted
/// value, so a reset made by another handle on the same storage is never
/// undone by a later write. Failures never escape: they are logged and
/// reported as `false`, and a corrupted persisted value reads as the empty
/// set.
pub struct ProgressStore {
    kv: Arc<dyn KeyValueStore>,
    key: String,
    // Read-modify-write cycles are serialized so in-process updates are never lost.
    write_lock: Mutex<()>,
}

impl ProgressStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(kv, COMPLETED_LESSONS_KEY)
    }

    #[must_use]
    pub fn with_key(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Mark a lesson complete from raw ids.
    ///
    /// Returns `false` (and logs) if an id is invalid or the write fails.
    pub async fn mark_complete(&self, module_id: &str, lesson_id: &str) -> bool {
        match LessonRef::parse_parts(module_id, lesson_id) {
            Ok(lesson) => self.mark_lesson_complete(&lesson).await,
            Err(err) => {
                warn!(module_id, lesson_id, error = %err, "rejected invalid lesson reference");
                false
            }
        }
    }

    /// Mark a lesson complete. Idempotent.
    ///
    /// The persisted set is re-read under the write lock, so the value written
    /// back is always the current one plus `lesson`.
    pub async fn mark_lesson_complete(&self, lesson: &LessonRef) -> bool {
        let _guard = self.write_lock.lock().await;
        let Some(mut loaded) = self.read_persisted().await else {
            warn!(%lesson, "progress storage unavailable; lesson not marked complete");
            return false;
        };

        if loaded.status == LoadStatus::Corrupted {
            warn!(%lesson, "persisted progress is corrupted; reset progress before marking lessons");
            return false;
        }

        if !loaded.set.insert(lesson.clone()) {
            debug!(%lesson, "lesson already complete");
            return true;
        }

        match self.kv.set(&self.key, &loaded.set.to_json()).await {
            Ok(()) => {
                info!(%lesson, completed = loaded.set.len(), "lesson marked complete");
                true
            }
            Err(err) => {
                warn!(%lesson, error = %err, "failed to persist completed lesson");
                false
            }
        }
    }

    /// Whether a lesson is complete. Never fails: invalid ids and unreadable
    /// storage both read as "not complete".
    pub async fn is_completed(&self, module_id: &str, lesson_id: &str) -> bool {
        match LessonRef::parse_parts(module_id, lesson_id) {
            Ok(lesson) => self.is_lesson_completed(&lesson).await,
            Err(_) => false,
        }
    }

    pub async fn is_lesson_completed(&self, lesson: &LessonRef) -> bool {
        self.read_persisted()
            .await
            .is_some_and(|loaded| loaded.set.contains(lesson))
    }

    /// Every completed lesson, as currently persisted.
    pub async fn get_all_completed(&self) -> CompletionSet {
        self.read_persisted()
            .await
            .map(|loaded| loaded.set)
            .unwrap_or_default()
    }

    /// Clear all progress. Returns `false` if the delete fails.
    pub async fn reset(&self) -> bool {
        let _guard = self.write_lock.lock().await;
        match self.kv.remove(&self.key).await {
            Ok(()) => {
                info!("progress reset");
                true
            }
            Err(err) => {
                warn!(error = %err, "failed to reset progress");
                false
            }
        }
    }

    pub async fn load_status(&self) -> LoadStatus {
        self.read_persisted()
            .await
            .map_or(LoadStatus::Unavailable, |loaded| loaded.status)
    }

    // `None` means the store could not be read.
    async fn read_persisted(&self) -> Option<Loaded> {
        let raw = match self.kv.get(&self.key).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to read persisted progress");
                return None;
            }
        };

        let Some(raw) = raw else {
            debug!(key = %self.key, "no persisted progress; starting empty");
            return Some(Loaded {
                set: CompletionSet::new(),
                status: LoadStatus::Fresh,
            });
        };

        match CompletionSet::from_json(&raw) {
            Ok(decoded) => {
                for (entry, err) in &decoded.skipped {
                    warn!(entry = %entry, error = %err, "skipping invalid persisted lesson reference");
                }
                debug!(completed = decoded.set.len(), "loaded persisted progress");
                Some(Loaded {
                    set: decoded.set,
                    status: LoadStatus::Loaded,
                })
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "persisted progress is corrupted; treating as empty");
                Some(Loaded {
                    set: CompletionSet::new(),
                    status: LoadStatus::Corrupted,
                })
            }
        }
    }
}
