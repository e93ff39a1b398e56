use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator used by the persisted `module:lesson` form.
pub const LESSON_REF_SEPARATOR: char = ':';

/// Errors raised when an identifier fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdError {
    #[error("{kind} cannot be empty")]
    Empty { kind: &'static str },

    #[error("{kind} `{raw}` has leading or trailing whitespace")]
    Padded { kind: &'static str, raw: String },

    #[error("{kind} `{raw}` contains the reserved separator `:`")]
    ContainsSeparator { kind: &'static str, raw: String },
}

// Ids are stored verbatim, so padding is rejected rather than normalized.
fn validate(kind: &'static str, raw: String) -> Result<String, IdError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IdError::Empty { kind });
    }
    if trimmed.len() != raw.len() {
        return Err(IdError::Padded { kind, raw });
    }
    if raw.contains(LESSON_REF_SEPARATOR) {
        return Err(IdError::ContainsSeparator { kind, raw });
    }
    Ok(raw)
}

/// Identifier of a course in the catalog.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseId(String);

impl CourseId {
    /// Creates a validated `CourseId`.
    ///
    /// # Errors
    ///
    /// Returns `IdError` if the value is blank or padded with whitespace, or if
    /// it contains the separator.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdError> {
        validate("course id", raw.into()).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of a module, unique across the whole catalog since persisted
/// lesson references carry no course id.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleId(String);

impl ModuleId {
    /// Creates a validated `ModuleId`.
    ///
    /// # Errors
    ///
    /// Returns `IdError` if the value is blank or padded with whitespace, or if
    /// it contains the separator.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdError> {
        validate("module id", raw.into()).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of a lesson, unique within its module.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LessonId(String);

impl LessonId {
    /// Creates a validated `LessonId`.
    ///
    /// # Errors
    ///
    /// Returns `IdError` if the value is blank or padded with whitespace, or if
    /// it contains the separator.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdError> {
        validate("lesson id", raw.into()).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ─── Conversions ───────────────────────────────────────────────────────────────

impl TryFrom<String> for CourseId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for ModuleId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for LessonId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CourseId> for String {
    fn from(value: CourseId) -> Self {
        value.0
    }
}

impl From<ModuleId> for String {
    fn from(value: ModuleId) -> Self {
        value.0
    }
}

impl From<LessonId> for String {
    fn from(value: LessonId) -> Self {
        value.0
    }
}

impl FromStr for CourseId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl FromStr for ModuleId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl FromStr for LessonId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ─── Debug / Display ───────────────────────────────────────────────────────────

impl fmt::Debug for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CourseId({})", self.0)
    }
}

impl fmt::Debug for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleId({})", self.0)
    }
}

impl fmt::Debug for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LessonId({})", self.0)
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_ids_are_rejected() {
        assert!(matches!(
            ModuleId::new("  html-basics "),
            Err(IdError::Padded { kind: "module id", .. })
        ));
        assert!(LessonId::new("intro\n").is_err());

        let id = ModuleId::new("html-basics").unwrap();
        assert_eq!(id.to_string(), "html-basics");
    }

    #[test]
    fn blank_ids_are_rejected() {
        assert_eq!(
            LessonId::new("   "),
            Err(IdError::Empty { kind: "lesson id" })
        );
        assert!(CourseId::new("").is_err());
    }

    #[test]
    fn separator_is_rejected() {
        let err = ModuleId::new("html:basics").unwrap_err();
        assert!(matches!(err, IdError::ContainsSeparator { .. }));
        assert!(LessonId::new("a:b").is_err());
    }

    #[test]
    fn deserialize_validates() {
        let ok: ModuleId = serde_json::from_str("\"css-basics\"").unwrap();
        assert_eq!(ok.as_str(), "css-basics");

        let bad = serde_json::from_str::<LessonId>("\"intro:1\"");
        assert!(bad.is_err());
    }

    #[test]
    fn debug_includes_kind() {
        let id = LessonId::new("intro").unwrap();
        assert_eq!(format!("{id:?}"), "LessonId(intro)");
    }
}
