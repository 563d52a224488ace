//! Extraction error types.
//!
//! Extraction is a pure function of file contents, so nothing here is
//! retryable — every failure carries the offending file path (and entity
//! name when known) and aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// What went wrong during extraction of one file.
#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("malformed docstring: {0}")]
    MalformedDocstring(String),

    #[error("malformed class body: {0}")]
    MalformedClassBody(String),

    #[error("attribute documentation has no `Example:` marker: {0}")]
    MissingExample(String),

    #[error("unsupported type expression: `{0}`")]
    UnsupportedTypeExpression(String),

    #[error("missing conventional subdirectory: {0}")]
    MissingSubdirectory(String),

    #[error("no class definition found")]
    MissingClass,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// An [`ErrorKind`] located at a source file, optionally within an entity.
#[derive(Debug)]
pub struct ExtractError {
    pub file: PathBuf,
    pub entity: Option<String>,
    pub kind: ErrorKind,
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl ExtractError {
    pub fn new(file: impl Into<PathBuf>, kind: ErrorKind) -> Self {
        ExtractError {
            file: file.into(),
            entity: None,
            kind,
        }
    }

    pub fn in_entity(file: impl Into<PathBuf>, entity: impl Into<String>, kind: ErrorKind) -> Self {
        ExtractError {
            file: file.into(),
            entity: Some(entity.into()),
            kind,
        }
    }
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.entity {
            Some(entity) => write!(f, "{} ({}): {}", self.file.display(), entity, self.kind),
            None => write!(f, "{}: {}", self.file.display(), self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_entity() {
        let err = ExtractError::in_entity(
            "models/AmountIn.py",
            "AmountIn",
            ErrorKind::MalformedClassBody("odd statement count".into()),
        );
        assert_eq!(
            err.to_string(),
            "models/AmountIn.py (AmountIn): malformed class body: odd statement count"
        );
    }

    #[test]
    fn display_without_entity() {
        let err = ExtractError::new(
            "project",
            ErrorKind::MissingSubdirectory("exceptions".into()),
        );
        assert_eq!(
            err.to_string(),
            "project: missing conventional subdirectory: exceptions"
        );
    }
}
