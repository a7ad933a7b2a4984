//! Error types for loading catalogs and configuration
//!
//! Editing and verification never fail (see [`crate::sheet`]); errors only
//! arise at the edges, when reading files or picking an exercise.
//! Execution failures have their own type, [`crate::execution::GatewayError`],
//! because they are shown to the learner rather than propagated.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors raised while setting up a session.
#[derive(Debug)]
pub enum SheetError {
    /// Reading a file failed
    Io { path: PathBuf, source: io::Error },

    /// The catalog JSON could not be decoded
    CatalogFormat { message: String },

    /// The config JSON could not be decoded
    ConfigFormat { path: PathBuf, message: String },

    /// A catalog chapter has more lines than a worksheet can hold
    ChapterTooLong {
        language: String,
        lesson: usize,
        chapter: usize,
        lines: usize,
        limit: usize,
    },

    /// A catalog token uses a fixed glyph's text under another category
    GlyphCategory {
        language: String,
        lesson: usize,
        chapter: usize,
        line: usize,
        text: String,
    },

    /// The requested language/lesson/chapter is not in the catalog
    UnknownExercise {
        language: String,
        lesson: usize,
        chapter: usize,
    },
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetError::Io { path, source } => {
                write!(f, "Cannot read {}: {}", path.display(), source)
            }
            SheetError::CatalogFormat { message } => {
                write!(f, "Invalid catalog: {}", message)
            }
            SheetError::ConfigFormat { path, message } => {
                write!(f, "Invalid config {}: {}", path.display(), message)
            }
            SheetError::ChapterTooLong {
                language,
                lesson,
                chapter,
                lines,
                limit,
            } => {
                write!(
                    f,
                    "{} lesson {} chapter {} has {} lines, a worksheet holds {}",
                    language,
                    lesson + 1,
                    chapter + 1,
                    lines,
                    limit
                )
            }
            SheetError::GlyphCategory {
                language,
                lesson,
                chapter,
                line,
                text,
            } => {
                write!(
                    f,
                    "{} lesson {} chapter {} line {}: {:?} must use the category of its glyph control",
                    language,
                    lesson + 1,
                    chapter + 1,
                    line + 1,
                    text
                )
            }
            SheetError::UnknownExercise {
                language,
                lesson,
                chapter,
            } => {
                write!(
                    f,
                    "No exercise for {} lesson {} chapter {}",
                    language,
                    lesson + 1,
                    chapter + 1
                )
            }
        }
    }
}

impl std::error::Error for SheetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SheetError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SheetError {
    fn from(err: serde_json::Error) -> Self {
        SheetError::CatalogFormat {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_one_based_numbers() {
        let err = SheetError::UnknownExercise {
            language: "python".to_string(),
            lesson: 0,
            chapter: 2,
        };
        assert_eq!(err.to_string(), "No exercise for python lesson 1 chapter 3");
    }

    #[test]
    fn test_json_error_converts_to_catalog_format() {
        let err: SheetError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, SheetError::CatalogFormat { .. }));
    }
}
