//! Per-line state of a worksheet

use super::normalize::remove_optional_space;
use super::token::{Token, TokenCategory};

/// How a line is currently presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStatus {
    /// Not reached yet; nothing is drawn.
    Hidden,
    /// The single line taking input; holds the cursor.
    Active,
    /// Typed by the learner and verified.
    Completed,
    /// Needed no input and was drawn by the progression scan.
    Shown,
}

/// One row of the sheet.
///
/// `entered_tokens` never contains a cursor sentinel; the cursor position is
/// `cursor_index`, an insertion point in `0..=entered_tokens.len()`.
#[derive(Debug, Clone)]
pub struct LineState {
    pub required_tokens: Vec<Token>,
    pub entered_tokens: Vec<Token>,
    pub seed_tokens: Vec<Token>,
    pub cursor_index: usize,
    pub requires_input: bool,
    pub requires_execution: bool,
    pub is_comment_only: bool,
    pub status: LineStatus,
    normalized_required: Vec<Token>,
}

impl LineState {
    /// Build a line from its catalog tokens.
    ///
    /// `seed_tokens` is what a comment-only line shows; when the catalog gives
    /// none, the required tokens are shown instead.
    pub fn new(required_tokens: Vec<Token>, seed_tokens: Option<Vec<Token>>) -> Self {
        let is_comment_only = required_tokens
            .first()
            .is_some_and(|t| t.category == TokenCategory::CommentMarker);
        let has_control_flow = required_tokens.iter().any(Token::is_control_flow_keyword);

        let (requires_input, requires_execution) = if required_tokens.is_empty() || is_comment_only
        {
            (false, false)
        } else if has_control_flow {
            (true, false)
        } else {
            (true, true)
        };

        let normalized_required = remove_optional_space(&required_tokens);
        let seed_tokens = seed_tokens.unwrap_or_else(|| required_tokens.clone());

        LineState {
            required_tokens,
            entered_tokens: Vec::new(),
            seed_tokens,
            cursor_index: 0,
            requires_input,
            requires_execution,
            is_comment_only,
            status: LineStatus::Hidden,
            normalized_required,
        }
    }

    /// A line with no catalog entry.
    pub fn empty() -> Self {
        LineState::new(Vec::new(), None)
    }

    /// Required tokens with optional spaces removed, computed once.
    pub fn normalized_required(&self) -> &[Token] {
        &self.normalized_required
    }

    pub fn is_active(&self) -> bool {
        self.status == LineStatus::Active
    }

    /// Whether any required token's text contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.required_tokens.iter().any(|t| t.text.contains(needle))
    }

    /// Tokens to draw for this line in its current status, and the cursor
    /// position when the line is active.
    pub fn visible_tokens(&self) -> (&[Token], Option<usize>) {
        match self.status {
            LineStatus::Hidden => (&[], None),
            LineStatus::Active => (&self.entered_tokens, Some(self.cursor_index)),
            LineStatus::Completed => (&self.entered_tokens, None),
            LineStatus::Shown if self.is_comment_only => (&self.seed_tokens, None),
            LineStatus::Shown => (&self.required_tokens, None),
        }
    }
}

impl Default for LineState {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_line_needs_nothing() {
        let line = LineState::new(
            vec![
                Token::new(TokenCategory::CommentMarker, "#"),
                Token::new(TokenCategory::Comment, " say hi"),
            ],
            None,
        );
        assert!(line.is_comment_only);
        assert!(!line.requires_input);
        assert!(!line.requires_execution);
    }

    #[test]
    fn test_control_flow_line_needs_input_only() {
        let line = LineState::new(
            vec![
                Token::keyword("if").with_trailing_space(),
                Token::space(),
                Token::identifier("x"),
                Token::symbol(":"),
            ],
            None,
        );
        assert!(line.requires_input);
        assert!(!line.requires_execution);
    }

    #[test]
    fn test_statement_line_needs_input_and_execution() {
        let line = LineState::new(
            vec![
                Token::keyword("print"),
                Token::symbol("("),
                Token::text_literal("'Hi'"),
                Token::symbol(")"),
            ],
            None,
        );
        assert!(line.requires_input);
        assert!(line.requires_execution);
        assert!(!line.is_comment_only);
    }

    #[test]
    fn test_empty_line() {
        let line = LineState::empty();
        assert!(!line.requires_input);
        assert!(!line.requires_execution);
        assert_eq!(line.visible_tokens().0.len(), 0);
    }

    #[test]
    fn test_normalized_required_drops_optional_space() {
        let line = LineState::new(
            vec![
                Token::identifier("x"),
                Token::space(),
                Token::new(TokenCategory::AssignmentOperator, "="),
            ],
            None,
        );
        assert_eq!(line.normalized_required().len(), 2);
    }
}
