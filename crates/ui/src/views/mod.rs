mod complete;
mod course;
mod courses;
mod lesson;
mod state;
#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
mod widgets;

pub use complete::CourseCompleteView;
pub use course::CourseView;
pub use courses::CoursesView;
pub use lesson::LessonView;
pub use state::{ViewError, ViewState, view_state_from_resource};
