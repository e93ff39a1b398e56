use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::ids::{IdError, LESSON_REF_SEPARATOR, LessonId, ModuleId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonRefError {
    #[error("lesson reference `{0}` is missing the `:` separator")]
    MissingSeparator(String),

    #[error(transparent)]
    Id(#[from] IdError),
}

/// Identifies one lesson inside one module.
///
/// Equality, ordering and hashing are structural on the `(module, lesson)`
/// pair. The `module:lesson` string only exists at the persistence boundary
/// (see `Display` / `FromStr`), and both ids are guaranteed separator-free,
/// so the encoding is unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LessonRef {
    module_id: ModuleId,
    lesson_id: LessonId,
}

impl LessonRef {
    #[must_use]
    pub fn new(module_id: ModuleId, lesson_id: LessonId) -> Self {
        Self {
            module_id,
            lesson_id,
        }
    }

    /// Builds a reference from raw strings, validating both ids.
    ///
    /// # Errors
    ///
    /// Returns `LessonRefError::Id` if either id is blank or padded, or if it contains `:`.
    pub fn parse_parts(module_id: &str, lesson_id: &str) -> Result<Self, LessonRefError> {
        Ok(Self::new(ModuleId::new(module_id)?, LessonId::new(lesson_id)?))
    }

    #[must_use]
    pub fn module_id(&self) -> &ModuleId {
        &self.module_id
    }

    #[must_use]
    pub fn lesson_id(&self) -> &LessonId {
        &self.lesson_id
    }
}

impl fmt::Display for LessonRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{LESSON_REF_SEPARATOR}{}",
            self.module_id, self.lesson_id
        )
    }
}

impl FromStr for LessonRef {
    type Err = LessonRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (module, lesson) = s
            .split_once(LESSON_REF_SEPARATOR)
            .ok_or_else(|| LessonRefError::MissingSeparator(s.to_string()))?;
        Self::parse_parts(module, lesson)
    }
}
