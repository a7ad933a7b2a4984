//! Token catalog: the required tokens of every exercise line
//!
//! The catalog is loaded once at start-up and handed to the session as an
//! immutable value. It is addressed by `(language, lesson, chapter, line)`;
//! a missing entry means "nothing to type on this line", never an error.
//!
//! # Format
//!
//! ```json
//! { "languages": [ { "name": "python", "lessons": [ { "title": "...",
//!   "chapters": [ { "title": "...", "expected_output": ["Hi"],
//!     "lines": [
//!       [ {"kind": "keyword", "text": "print"}, {"kind": "symbol", "text": "("} ],
//!       { "tokens": [ {"kind": "comment_marker", "text": "#"} ],
//!         "seed":   [ {"kind": "comment", "text": "# greet the world"} ] }
//!     ] } ] } ] } ] }
//! ```
//!
//! A line is either a bare token array or an object with `tokens` and an
//! optional `seed` (what a comment-only line displays).

use crate::error::SheetError;
use crate::sheet::{glyph_controls, Token, MAX_LINES};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Identifies one chapter (exercise) of the catalog. Indices are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExerciseKey {
    pub language: String,
    pub lesson: usize,
    pub chapter: usize,
}

impl ExerciseKey {
    pub fn new(language: impl Into<String>, lesson: usize, chapter: usize) -> Self {
        ExerciseKey {
            language: language.into(),
            lesson,
            chapter,
        }
    }
}

/// One catalog line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "RawLine")]
pub struct CatalogLine {
    pub tokens: Vec<Token>,
    pub seed: Option<Vec<Token>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLine {
    Tokens(Vec<Token>),
    Full {
        tokens: Vec<Token>,
        #[serde(default)]
        seed: Option<Vec<Token>>,
    },
}

impl From<RawLine> for CatalogLine {
    fn from(raw: RawLine) -> Self {
        match raw {
            RawLine::Tokens(tokens) => CatalogLine { tokens, seed: None },
            RawLine::Full { tokens, seed } => CatalogLine { tokens, seed },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chapter {
    pub title: String,
    #[serde(default)]
    pub expected_output: Vec<String>,
    pub lines: Vec<CatalogLine>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Lesson {
    pub title: String,
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Language {
    pub name: String,
    pub lessons: Vec<Lesson>,
}

/// Read-only exercise data.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenCatalog {
    languages: Vec<Language>,
}

impl TokenCatalog {
    /// Decode and validate a catalog.
    pub fn from_json(text: &str) -> Result<Self, SheetError> {
        let catalog: TokenCatalog = serde_json::from_str(text)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, SheetError> {
        let text = fs::read_to_string(path).map_err(|source| SheetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// The catalog compiled into the binary.
    pub fn bundled() -> Result<Self, SheetError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    fn validate(&self) -> Result<(), SheetError> {
        let controls = glyph_controls();
        for language in &self.languages {
            for (lesson_idx, lesson) in language.lessons.iter().enumerate() {
                for (chapter_idx, chapter) in lesson.chapters.iter().enumerate() {
                    if chapter.lines.len() > MAX_LINES {
                        return Err(SheetError::ChapterTooLong {
                            language: language.name.clone(),
                            lesson: lesson_idx,
                            chapter: chapter_idx,
                            lines: chapter.lines.len(),
                            limit: MAX_LINES,
                        });
                    }
                    // Glyph texts never reach the palette, so they must be
                    // exactly what their fixed control inserts.
                    for (line_idx, line) in chapter.lines.iter().enumerate() {
                        let stray = line
                            .tokens
                            .iter()
                            .find(|t| t.is_always_available_glyph() && !controls.contains(*t));
                        if let Some(token) = stray {
                            return Err(SheetError::GlyphCategory {
                                language: language.name.clone(),
                                lesson: lesson_idx,
                                chapter: chapter_idx,
                                line: line_idx,
                                text: token.text.clone(),
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn language(&self, name: &str) -> Option<&Language> {
        self.languages
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(name))
    }

    pub fn chapter(&self, key: &ExerciseKey) -> Option<&Chapter> {
        self.language(&key.language)?
            .lessons
            .get(key.lesson)?
            .chapters
            .get(key.chapter)
    }

    /// Like [`TokenCatalog::chapter`], but a missing chapter is an error.
    pub fn resolve(&self, key: &ExerciseKey) -> Result<&Chapter, SheetError> {
        self.chapter(key).ok_or_else(|| SheetError::UnknownExercise {
            language: key.language.clone(),
            lesson: key.lesson,
            chapter: key.chapter,
        })
    }

    pub fn line(&self, key: &ExerciseKey, line: usize) -> Option<&CatalogLine> {
        self.chapter(key)?.lines.get(line)
    }

    /// Required tokens for one line, or `None` when nothing is required.
    pub fn lookup(
        &self,
        language: &str,
        lesson: usize,
        chapter: usize,
        line: usize,
    ) -> Option<&[Token]> {
        let key = ExerciseKey::new(language, lesson, chapter);
        self.line(&key, line).map(|l| l.tokens.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::TokenCategory;

    const SMALL: &str = r##"{
        "languages": [{
            "name": "python",
            "lessons": [{
                "title": "Basics",
                "chapters": [{
                    "title": "Hello",
                    "expected_output": ["Hi"],
                    "lines": [
                        { "tokens": [{"kind": "comment_marker", "text": "#"}],
                          "seed": [{"kind": "comment", "text": "# greet"}] },
                        [{"kind": "keyword", "text": "print"},
                         {"kind": "symbol", "text": "("},
                         {"kind": "text_literal", "text": "'Hi'"},
                         {"kind": "symbol", "text": ")"}]
                    ]
                }]
            }]
        }]
    }"##;

    #[test]
    fn test_lookup() {
        let catalog = TokenCatalog::from_json(SMALL).unwrap();
        let tokens = catalog.lookup("python", 0, 0, 1).unwrap();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].category, TokenCategory::Keyword);

        assert!(catalog.lookup("python", 0, 0, 2).is_none());
        assert!(catalog.lookup("python", 0, 1, 0).is_none());
        assert!(catalog.lookup("ruby", 0, 0, 0).is_none());
    }

    #[test]
    fn test_seed_is_parsed() {
        let catalog = TokenCatalog::from_json(SMALL).unwrap();
        let key = ExerciseKey::new("Python", 0, 0);
        let line = catalog.line(&key, 0).unwrap();
        assert_eq!(line.seed.as_ref().map(Vec::len), Some(1));
        assert!(catalog.line(&key, 1).unwrap().seed.is_none());
        assert_eq!(catalog.chapter(&key).unwrap().expected_output, vec!["Hi"]);
    }

    #[test]
    fn test_resolve_unknown() {
        let catalog = TokenCatalog::from_json(SMALL).unwrap();
        let err = catalog.resolve(&ExerciseKey::new("python", 3, 0)).unwrap_err();
        assert!(matches!(err, SheetError::UnknownExercise { lesson: 3, .. }));
    }

    #[test]
    fn test_chapter_too_long_is_rejected() {
        let lines = vec!["[]"; MAX_LINES + 1].join(",");
        let json = format!(
            r#"{{"languages":[{{"name":"x","lessons":[{{"title":"t","chapters":[{{"title":"c","lines":[{}]}}]}}]}}]}}"#,
            lines
        );
        let err = TokenCatalog::from_json(&json).unwrap_err();
        assert!(matches!(err, SheetError::ChapterTooLong { lines, .. } if lines == MAX_LINES + 1));
    }

    #[test]
    fn test_glyph_with_foreign_category_is_rejected() {
        let json = r#"{"languages":[{"name":"python","lessons":[{"title":"t","chapters":[
            {"title":"c","lines":[[]]},
            {"title":"d","lines":[[],
                [{"kind":"number_literal","text":"2"},
                 {"kind":"symbol","text":"*"},
                 {"kind":"number_literal","text":"3"}]]}
        ]}]}]}"#;
        let err = TokenCatalog::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            SheetError::GlyphCategory { chapter: 1, line: 1, ref text, .. } if text == "*"
        ));

        let fixed = json.replace(
            r#""kind":"symbol","text":"*""#,
            r#""kind":"arithmetic_operator","text":"*""#,
        );
        assert!(TokenCatalog::from_json(&fixed).is_ok());
    }

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = TokenCatalog::bundled().unwrap();
        assert!(catalog.language("python").is_some());
    }
}
