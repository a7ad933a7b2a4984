//! Worksheet tokens
//!
//! A [`Token`] is the smallest unit a learner places on a line: a category tag
//! plus its literal text. Tokens come from the catalog (required lines), from
//! the palette, or from the fixed glyph controls.
//!
//! Two tokens compare equal when their category and text match.
//! `requires_trailing_space` is layout metadata consumed by the normalizer and
//! never takes part in equality.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Texts that are always offered as fixed glyph controls and therefore never
/// appear in the per-line palette.
pub const ALWAYS_AVAILABLE_GLYPHS: [&str; 11] =
    [".", "(", ")", "'", " ", "+", "-", "*", "/", "%", "\t"];

/// Keywords that open or steer a control-flow unit. A line holding one of
/// these needs input but is never executed on its own.
const CONTROL_FLOW_KEYWORDS: [&str; 21] = [
    "if", "elif", "else", "for", "while", "def", "class", "try", "except", "finally", "with",
    "match", "case", "return", "break", "continue", "pass", "switch", "do", "catch", "fn",
];

/// Token categories.
///
/// The set is closed; styling and normalization match on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenCategory {
    Keyword,
    Identifier,
    NumberLiteral,
    TextLiteral,
    ArithmeticOperator,   // + - * / % **
    ComparisonOperator,   // == != < > <= >=
    AssignmentOperator,   // = += -=
    LogicalOperator,      // and or not
    Symbol,               // ( ) [ ] { } , : . '
    Space,
    Tab,
    FormatMarker,         // f-string prefix and friends
    NewlineMarker,
    CommentMarker,        // # or //
    Comment,
    CursorSentinel,
}

/// A classified piece of source text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "kind")]
    pub category: TokenCategory,
    pub text: String,
    #[serde(rename = "space", default)]
    pub requires_trailing_space: bool,
}

impl Token {
    pub fn new(category: TokenCategory, text: impl Into<String>) -> Self {
        Token {
            category,
            text: text.into(),
            requires_trailing_space: false,
        }
    }

    pub fn keyword(text: impl Into<String>) -> Self {
        Token::new(TokenCategory::Keyword, text)
    }

    pub fn identifier(text: impl Into<String>) -> Self {
        Token::new(TokenCategory::Identifier, text)
    }

    pub fn number(text: impl Into<String>) -> Self {
        Token::new(TokenCategory::NumberLiteral, text)
    }

    pub fn text_literal(text: impl Into<String>) -> Self {
        Token::new(TokenCategory::TextLiteral, text)
    }

    pub fn symbol(text: impl Into<String>) -> Self {
        Token::new(TokenCategory::Symbol, text)
    }

    pub fn space() -> Self {
        Token::new(TokenCategory::Space, " ")
    }

    pub fn tab() -> Self {
        Token::new(TokenCategory::Tab, "\t")
    }

    pub fn cursor() -> Self {
        Token::new(TokenCategory::CursorSentinel, "")
    }

    /// Builder-style setter for the trailing-space flag.
    pub fn with_trailing_space(mut self) -> Self {
        self.requires_trailing_space = true;
        self
    }

    pub fn is_space(&self) -> bool {
        self.category == TokenCategory::Space
    }

    pub fn is_cursor(&self) -> bool {
        self.category == TokenCategory::CursorSentinel
    }

    /// Single or double quote glyph that opens/closes a string built piecewise.
    pub fn is_quote(&self) -> bool {
        self.category == TokenCategory::Symbol && (self.text == "'" || self.text == "\"")
    }

    pub fn is_always_available_glyph(&self) -> bool {
        ALWAYS_AVAILABLE_GLYPHS.contains(&self.text.as_str())
    }

    pub fn is_control_flow_keyword(&self) -> bool {
        self.category == TokenCategory::Keyword
            && CONTROL_FLOW_KEYWORDS.contains(&self.text.as_str())
    }

    /// Text as it should appear on screen (tabs expanded, newlines marked).
    pub fn display_text(&self) -> &str {
        match self.category {
            TokenCategory::Tab => "    ",
            TokenCategory::NewlineMarker => "↵",
            _ => &self.text,
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category && self.text == other.text
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.category.hash(state);
        self.text.hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category {
            TokenCategory::Space => write!(f, "␣"),
            TokenCategory::Tab => write!(f, "⇥"),
            TokenCategory::CursorSentinel => write!(f, "|"),
            _ => write!(f, "{}", self.display_text()),
        }
    }
}

/// Tokens behind the fixed glyph controls, in on-screen order.
pub fn glyph_controls() -> Vec<Token> {
    ALWAYS_AVAILABLE_GLYPHS
        .iter()
        .map(|glyph| match *glyph {
            " " => Token::space(),
            "\t" => Token::tab(),
            "+" | "-" | "*" | "/" | "%" => Token::new(TokenCategory::ArithmeticOperator, *glyph),
            other => Token::symbol(other),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_trailing_space_flag() {
        let plain = Token::keyword("print");
        let flagged = Token::keyword("print").with_trailing_space();
        assert_eq!(plain, flagged);
        assert_ne!(plain, Token::identifier("print"));
    }

    #[test]
    fn test_glyph_controls_cover_every_glyph() {
        let controls = glyph_controls();
        assert_eq!(controls.len(), ALWAYS_AVAILABLE_GLYPHS.len());
        assert!(controls.iter().all(Token::is_always_available_glyph));
        assert!(controls.contains(&Token::space()));
        assert!(controls.contains(&Token::tab()));
        assert!(controls.iter().any(Token::is_quote));
    }

    #[test]
    fn test_control_flow_keywords() {
        assert!(Token::keyword("if").is_control_flow_keyword());
        assert!(Token::keyword("except").is_control_flow_keyword());
        assert!(!Token::keyword("print").is_control_flow_keyword());
        assert!(!Token::identifier("if").is_control_flow_keyword());
    }

    #[test]
    fn test_deserialize_catalog_token() {
        let token: Token =
            serde_json::from_str(r#"{"kind":"keyword","text":"def","space":true}"#).unwrap();
        assert_eq!(token.category, TokenCategory::Keyword);
        assert!(token.requires_trailing_space);

        let plain: Token = serde_json::from_str(r#"{"kind":"symbol","text":"("}"#).unwrap();
        assert!(!plain.requires_trailing_space);
    }
}
