use course_core::model::{CompletionSet, Course, LessonRef, LessonStep};
use services::{CourseProgress, ProgressStore};

use super::content_vm::lesson_body_html;
use super::progress_vm::{ModuleNavVm, ProgressBarVm, map_module_nav};

/// Link target for the previous/next buttons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LessonLinkVm {
    Lesson { module_id: String, lesson_id: String },
    CourseComplete,
}

impl From<&LessonRef> for LessonLinkVm {
    fn from(lesson: &LessonRef) -> Self {
        Self::Lesson {
            module_id: lesson.module_id().to_string(),
            lesson_id: lesson.lesson_id().to_string(),
        }
    }
}

impl From<LessonStep> for LessonLinkVm {
    fn from(step: LessonStep) -> Self {
        match step {
            LessonStep::Lesson(lesson) => Self::from(&lesson),
            LessonStep::CourseComplete => Self::CourseComplete,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonPageVm {
    pub course_id: String,
    pub course_title: String,
    pub module_title: String,
    pub module_position_label: String,
    pub lesson: LessonRef,
    pub title: String,
    pub duration: Option<String>,
    pub body_html: Option<String>,
    pub is_completed: bool,
    pub previous: Option<LessonLinkVm>,
    pub next: LessonLinkVm,
    pub course_progress: ProgressBarVm,
    pub modules: Vec<ModuleNavVm>,
}

/// Builds the lesson page, or `None` if the lesson is not part of `course`.
#[must_use]
pub fn map_lesson_page(
    course: &Course,
    lesson: &LessonRef,
    progress: &CourseProgress,
    completed: &CompletionSet,
) -> Option<LessonPageVm> {
    let (module, found) = course.lesson(lesson)?;
    let position = course.module_position(module.id())?;
    let next = course.next_lesson(lesson)?;

    Some(LessonPageVm {
        course_id: course.id().to_string(),
        course_title: course.title().to_owned(),
        module_title: module.title().to_owned(),
        module_position_label: format!("Module {} of {}", position + 1, course.modules().len()),
        lesson: lesson.clone(),
        title: found.title().to_owned(),
        duration: found.duration().map(str::to_owned),
        body_html: lesson_body_html(found),
        is_completed: completed.contains(lesson),
        previous: course.previous_lesson(lesson).as_ref().map(LessonLinkVm::from),
        next: next.into(),
        course_progress: progress.course.into(),
        modules: map_module_nav(course, progress, completed, Some(lesson)),
    })
}

/// Result of a "Mark as Complete" click, as confirmed by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    Completed,
    NotSaved,
}

impl MarkOutcome {
    #[must_use]
    pub fn warning(self) -> Option<&'static str> {
        match self {
            Self::Completed => None,
            Self::NotSaved => Some("Your progress could not be saved. Please try again."),
        }
    }
}

/// Non-blocking warning shown on the lesson page.
///
/// Each `show` hands out a ticket; `expire` only clears the warning the
/// ticket was issued for, so an older timer never hides a newer warning.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WarningToast {
    ticket: u64,
    message: Option<&'static str>,
}

impl WarningToast {
    pub fn show(&mut self, message: &'static str) -> u64 {
        self.ticket += 1;
        self.message = Some(message);
        self.ticket
    }

    pub fn expire(&mut self, ticket: u64) {
        if self.ticket == ticket {
            self.message = None;
        }
    }

    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        self.message
    }
}

/// Marks a lesson and re-reads the store instead of trusting the return value.
pub async fn mark_and_confirm(store: &ProgressStore, lesson: &LessonRef) -> MarkOutcome {
    let saved = store.mark_lesson_complete(lesson).await;
    if saved && store.is_lesson_completed(lesson).await {
        MarkOutcome::Completed
    } else {
        MarkOutcome::NotSaved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use course_core::model::{CourseId, Lesson, LessonId, Module, ModuleId};
    use services::COMPLETED_LESSONS_KEY;
    use storage::repository::{InMemoryRepository, KeyValueStore};

    fn course() -> Course {
        let module = |id: &str, title: &str, lessons: &[&str]| {
            Module::new(
                ModuleId::new(id).unwrap(),
                title,
                lessons
                    .iter()
                    .map(|l| Lesson::new(LessonId::new(*l).unwrap(), l.to_uppercase()))
                    .collect(),
            )
        };
        Course::new(
            CourseId::new("web").unwrap(),
            "Web",
            None,
            vec![
                module("html", "HTML Basics", &["a", "b"]),
                module("css", "CSS Basics", &["c"]),
            ],
        )
    }

    fn progress(course: &Course, set: &CompletionSet) -> CourseProgress {
        CourseProgress::from_completed(course, set)
    }

    fn lesson(m: &str, l: &str) -> LessonRef {
        LessonRef::parse_parts(m, l).unwrap()
    }

    #[test]
    fn first_lesson_has_no_previous() {
        let course = course();
        let set = CompletionSet::new();
        let page =
            map_lesson_page(&course, &lesson("html", "a"), &progress(&course, &set), &set).unwrap();

        assert_eq!(page.module_position_label, "Module 1 of 2");
        assert_eq!(page.previous, None);
        assert_eq!(page.next, LessonLinkVm::from(&lesson("html", "b")));
        assert!(!page.is_completed);
    }

    #[test]
    fn last_lesson_leads_to_course_complete() {
        let course = course();
        let set: CompletionSet = [lesson("css", "c")].into_iter().collect();
        let page =
            map_lesson_page(&course, &lesson("css", "c"), &progress(&course, &set), &set).unwrap();

        assert_eq!(page.module_title, "CSS Basics");
        assert_eq!(page.module_position_label, "Module 2 of 2");
        assert_eq!(page.previous, Some(LessonLinkVm::from(&lesson("html", "b"))));
        assert_eq!(page.next, LessonLinkVm::CourseComplete);
        assert!(page.is_completed);
        assert_eq!(page.course_progress.label, "1 of 3 completed");
    }

    #[test]
    fn unknown_lesson_has_no_page() {
        let course = course();
        let set = CompletionSet::new();
        assert!(
            map_lesson_page(&course, &lesson("html", "zzz"), &progress(&course, &set), &set)
                .is_none()
        );
    }

    #[test]
    fn stale_toast_timer_keeps_newer_warning() {
        let mut toast = WarningToast::default();
        let first = toast.show("first");
        let second = toast.show("second");

        toast.expire(first);
        assert_eq!(toast.message(), Some("second"));

        toast.expire(second);
        assert_eq!(toast.message(), None);
    }

    #[tokio::test]
    async fn mark_and_confirm_reports_saved_lessons() {
        let store = ProgressStore::new(Arc::new(InMemoryRepository::new()));
        let outcome = mark_and_confirm(&store, &lesson("html", "a")).await;
        assert_eq!(outcome, MarkOutcome::Completed);
        assert_eq!(outcome.warning(), None);
    }

    #[tokio::test]
    async fn mark_and_confirm_reports_unsaved_lessons() {
        let repo = InMemoryRepository::new();
        repo.set(COMPLETED_LESSONS_KEY, "not json").await.unwrap();
        let store = ProgressStore::new(Arc::new(repo));

        let outcome = mark_and_confirm(&store, &lesson("html", "a")).await;
        assert_eq!(outcome, MarkOutcome::NotSaved);
        assert!(outcome.warning().is_some());
    }
}
