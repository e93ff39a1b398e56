mod catalog;
mod completion;
mod ids;
mod lesson_ref;

pub use catalog::{Catalog, CatalogError, ContentFormat, Course, Lesson, LessonStep, Module};
pub use completion::{CompletionSet, CompletionSetError, DecodedCompletionSet};
pub use ids::{CourseId, IdError, LESSON_REF_SEPARATOR, LessonId, ModuleId};
pub use lesson_ref::{LessonRef, LessonRefError};
