use course_core::ProgressSnapshot;
use course_core::model::{CompletionSet, Course, LessonRef};
use services::CourseProgress;

/// Display data for a progress bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressBarVm {
    pub percentage: u8,
    pub label: String,
    pub width_style: String,
    pub complete: bool,
}

impl From<ProgressSnapshot> for ProgressBarVm {
    fn from(snapshot: ProgressSnapshot) -> Self {
        Self {
            percentage: snapshot.percentage,
            label: completed_label(snapshot),
            width_style: format!("width: {}%", snapshot.percentage),
            complete: snapshot.is_complete(),
        }
    }
}

#[must_use]
pub fn completed_label(snapshot: ProgressSnapshot) -> String {
    format!("{} of {} completed", snapshot.completed, snapshot.total)
}

/// One entry on the course overview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseCardVm {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub lesson_count_label: String,
    pub progress: ProgressBarVm,
}

#[must_use]
pub fn map_course_card(course: &Course, progress: &CourseProgress) -> CourseCardVm {
    let count = course.lesson_count();
    let lesson_count_label = match count {
        1 => "1 lesson".to_owned(),
        n => format!("{n} lessons"),
    };
    CourseCardVm {
        id: course.id().to_string(),
        title: course.title().to_owned(),
        description: course.description().map(str::to_owned),
        lesson_count_label,
        progress: progress.course.into(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonNavItemVm {
    pub module_id: String,
    pub lesson_id: String,
    pub title: String,
    pub duration: Option<String>,
    pub completed: bool,
    pub active: bool,
}

/// A module as shown in the course page and the lesson sidebar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleNavVm {
    pub id: String,
    pub title: String,
    pub progress_label: String,
    pub completed: bool,
    pub contains_active: bool,
    pub lessons: Vec<LessonNavItemVm>,
}

#[must_use]
pub fn map_module_nav(
    course: &Course,
    progress: &CourseProgress,
    completed: &CompletionSet,
    active: Option<&LessonRef>,
) -> Vec<ModuleNavVm> {
    course
        .modules()
        .iter()
        .map(|module| {
            let snapshot = progress.module(module.id());
            let lessons: Vec<LessonNavItemVm> = module
                .lessons()
                .iter()
                .map(|lesson| {
                    let lesson_ref = module.lesson_ref(lesson);
                    LessonNavItemVm {
                        module_id: module.id().to_string(),
                        lesson_id: lesson.id().to_string(),
                        title: lesson.title().to_owned(),
                        duration: lesson.duration().map(str::to_owned),
                        completed: completed.contains(&lesson_ref),
                        active: active == Some(&lesson_ref),
                    }
                })
                .collect();
            ModuleNavVm {
                id: module.id().to_string(),
                title: module.title().to_owned(),
                progress_label: completed_label(snapshot),
                completed: snapshot.is_complete(),
                contains_active: lessons.iter().any(|lesson| lesson.active),
                lessons,
            }
        })
        .collect()
}

/// Whether a sidebar module is open. An explicit toggle wins; otherwise
/// only the module holding the current lesson starts expanded.
#[must_use]
pub fn nav_expanded(module: &ModuleNavVm, toggled: Option<bool>) -> bool {
    toggled.unwrap_or(module.contains_active)
}

/// Where "Start"/"Continue" should lead: the first lesson not yet completed.
///
/// Falls back to the first lesson when everything is done, and `None` for a
/// course without lessons.
#[must_use]
pub fn resume_lesson(course: &Course, completed: &CompletionSet) -> Option<LessonRef> {
    course
        .modules()
        .iter()
        .flat_map(|module| module.lessons().iter().map(|l| module.lesson_ref(l)))
        .find(|lesson| !completed.contains(lesson))
        .or_else(|| course.first_lesson())
}
