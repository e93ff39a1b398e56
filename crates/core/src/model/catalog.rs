use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{CourseId, LessonId, ModuleId};
use crate::model::lesson_ref::LessonRef;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate course id `{0}`")]
    DuplicateCourse(CourseId),

    #[error("module id `{module}` in course `{course}` is already used")]
    DuplicateModule { course: CourseId, module: ModuleId },

    #[error("duplicate lesson id `{lesson}` in module `{module}`")]
    DuplicateLesson { module: ModuleId, lesson: LessonId },
}

//
// ─── LESSONS & MODULES ─────────────────────────────────────────────────────────
//

/// How a lesson body is authored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    #[default]
    Html,
    Markdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    id: LessonId,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default)]
    format: ContentFormat,
}

impl Lesson {
    #[must_use]
    pub fn new(id: LessonId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            duration: None,
            content: None,
            format: ContentFormat::Html,
        }
    }

    #[must_use]
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    #[must_use]
    pub fn with_content(mut self, format: ContentFormat, content: impl Into<String>) -> Self {
        self.format = format;
        self.content = Some(content.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> &LessonId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-form reading time label, e.g. `15 min`.
    #[must_use]
    pub fn duration(&self) -> Option<&str> {
        self.duration.as_deref()
    }

    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    #[must_use]
    pub fn format(&self) -> ContentFormat {
        self.format
    }
}

/// Ordered group of lessons. A module without a `lessons` field has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    id: ModuleId,
    title: String,
    #[serde(default)]
    lessons: Vec<Lesson>,
}

impl Module {
    #[must_use]
    pub fn new(id: ModuleId, title: impl Into<String>, lessons: Vec<Lesson>) -> Self {
        Self {
            id,
            title: title.into(),
            lessons,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn lesson(&self, id: &LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| lesson.id() == id)
    }

    /// The persisted reference for one of this module's lessons.
    #[must_use]
    pub fn lesson_ref(&self, lesson: &Lesson) -> LessonRef {
        LessonRef::new(self.id.clone(), lesson.id().clone())
    }

    fn first_ref(&self) -> Option<LessonRef> {
        self.lessons.first().map(|lesson| self.lesson_ref(lesson))
    }

    fn last_ref(&self) -> Option<LessonRef> {
        self.lessons.last().map(|lesson| self.lesson_ref(lesson))
    }

    fn check_unique_lessons(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for lesson in &self.lessons {
            if !seen.insert(lesson.id()) {
                return Err(CatalogError::DuplicateLesson {
                    module: self.id.clone(),
                    lesson: lesson.id().clone(),
                });
            }
        }
        Ok(())
    }
}

//
// ─── COURSES ───────────────────────────────────────────────────────────────────
//

/// Where "next lesson" leads from a given lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonStep {
    Lesson(LessonRef),
    CourseComplete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    id: CourseId,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    modules: Vec<Module>,
}

impl Course {
    #[must_use]
    pub fn new(
        id: CourseId,
        title: impl Into<String>,
        description: Option<String>,
        modules: Vec<Module>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description,
            modules,
        }
    }

    #[must_use]
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    #[must_use]
    pub fn module(&self, id: &ModuleId) -> Option<&Module> {
        self.modules.iter().find(|module| module.id() == id)
    }

    /// Zero-based position of a module in the course.
    #[must_use]
    pub fn module_position(&self, id: &ModuleId) -> Option<usize> {
        self.modules.iter().position(|module| module.id() == id)
    }

    #[must_use]
    pub fn lesson(&self, lesson: &LessonRef) -> Option<(&Module, &Lesson)> {
        let module = self.module(lesson.module_id())?;
        let found = module.lesson(lesson.lesson_id())?;
        Some((module, found))
    }

    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.modules.iter().map(|module| module.lessons().len()).sum()
    }

    #[must_use]
    pub fn first_lesson(&self) -> Option<LessonRef> {
        self.modules.iter().find_map(Module::first_ref)
    }

    /// Next lesson in reading order, skipping modules without lessons.
    ///
    /// Returns `None` if `current` is not part of this course.
    #[must_use]
    pub fn next_lesson(&self, current: &LessonRef) -> Option<LessonStep> {
        let module_pos = self.module_position(current.module_id())?;
        let module = &self.modules[module_pos];
        let lesson_pos = module
            .lessons()
            .iter()
            .position(|lesson| lesson.id() == current.lesson_id())?;

        if let Some(next) = module.lessons().get(lesson_pos + 1) {
            return Some(LessonStep::Lesson(module.lesson_ref(next)));
        }

        let step = self.modules[module_pos + 1..]
            .iter()
            .find_map(Module::first_ref)
            .map_or(LessonStep::CourseComplete, LessonStep::Lesson);
        Some(step)
    }

    /// Previous lesson in reading order, skipping modules without lessons.
    ///
    /// Returns `None` at the first lesson or if `current` is not part of this course.
    #[must_use]
    pub fn previous_lesson(&self, current: &LessonRef) -> Option<LessonRef> {
        let module_pos = self.module_position(current.module_id())?;
        let module = &self.modules[module_pos];
        let lesson_pos = module
            .lessons()
            .iter()
            .position(|lesson| lesson.id() == current.lesson_id())?;

        if lesson_pos > 0 {
            return Some(module.lesson_ref(&module.lessons()[lesson_pos - 1]));
        }

        self.modules[..module_pos]
            .iter()
            .rev()
            .find_map(Module::last_ref)
    }

    fn check_unique<'a>(&'a self, modules: &mut HashSet<&'a ModuleId>) -> Result<(), CatalogError> {
        for module in &self.modules {
            if !modules.insert(module.id()) {
                return Err(CatalogError::DuplicateModule {
                    course: self.id.clone(),
                    module: module.id().clone(),
                });
            }
            module.check_unique_lessons()?;
        }
        Ok(())
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Read-only list of courses supplied to the app at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    courses: Vec<Course>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if a course, module or lesson id is repeated in its scope.
    pub fn new(courses: Vec<Course>) -> Result<Self, CatalogError> {
        let catalog = Self { courses };
        catalog.check_unique()?;
        Ok(catalog)
    }

    /// Parses and validates a JSON catalog document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON or invalid ids, and a
    /// duplicate error if ids repeat.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(raw)?;
        catalog.check_unique()?;
        Ok(catalog)
    }

    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    #[must_use]
    pub fn course(&self, id: &CourseId) -> Option<&Course> {
        self.courses.iter().find(|course| course.id() == id)
    }

    // Persisted references carry no course id, so module ids must be unique
    // across the whole catalog.
    fn check_unique(&self) -> Result<(), CatalogError> {
        let mut courses = HashSet::new();
        let mut modules = HashSet::new();
        for course in &self.courses {
            if !courses.insert(course.id()) {
                return Err(CatalogError::DuplicateCourse(course.id().clone()));
            }
            course.check_unique(&mut modules)?;
        }
        Ok(())
    }
}
