mod content_vm;
mod lesson_vm;
mod progress_vm;

pub use content_vm::{lesson_body_html, markdown_to_html, sanitize_html};
pub use lesson_vm::{
    LessonLinkVm, LessonPageVm, MarkOutcome, WarningToast, map_lesson_page, mark_and_confirm,
};
pub use progress_vm::{
    CourseCardVm, LessonNavItemVm, ModuleNavVm, ProgressBarVm, completed_label, map_course_card,
    map_module_nav, nav_expanded, resume_lesson,
};
