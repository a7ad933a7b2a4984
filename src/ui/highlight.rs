//! Token-level syntax highlighting
//!
//! Tokens are already classified, so highlighting is a single left-to-right
//! pass with three states:
//!
//! ```text
//!            quote                 {
//!   Normal ─────────▶ InString ─────────▶ InterpolatedExpr
//!          ◀─────────          ◀─────────
//!            quote                 }
//! ```
//!
//! Each token takes its category style, except that everything strictly
//! inside a string (not inside an interpolated expression) takes the string
//! style.

use crate::sheet::{LineState, Token, TokenCategory};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

/// Glyph drawn at the cursor position.
pub const CURSOR_GLYPH: &str = "▏";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightState {
    Normal,
    InString,
    InterpolatedExpr,
}

/// Style for a token outside any string.
pub fn category_style(category: TokenCategory) -> Style {
    let style = Style::default();
    match category {
        TokenCategory::Keyword => style.fg(DEFAULT_THEME.keyword).add_modifier(Modifier::BOLD),
        TokenCategory::Identifier => style.fg(DEFAULT_THEME.fg),
        TokenCategory::NumberLiteral => style.fg(DEFAULT_THEME.number),
        TokenCategory::TextLiteral => style.fg(DEFAULT_THEME.string),
        TokenCategory::ArithmeticOperator
        | TokenCategory::ComparisonOperator
        | TokenCategory::AssignmentOperator => style.fg(DEFAULT_THEME.operator),
        TokenCategory::LogicalOperator => style
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::ITALIC),
        TokenCategory::Symbol => style.fg(DEFAULT_THEME.primary),
        TokenCategory::Space | TokenCategory::Tab => style,
        TokenCategory::FormatMarker => style.fg(DEFAULT_THEME.format_marker),
        TokenCategory::NewlineMarker => style.fg(DEFAULT_THEME.comment),
        TokenCategory::CommentMarker | TokenCategory::Comment => style
            .fg(DEFAULT_THEME.comment)
            .add_modifier(Modifier::ITALIC),
        TokenCategory::CursorSentinel => style.fg(DEFAULT_THEME.cursor),
    }
}

pub fn string_style() -> Style {
    Style::default().fg(DEFAULT_THEME.string)
}

/// Style for `token` in `state`, and the state after it.
pub fn step(state: HighlightState, token: &Token) -> (Style, HighlightState) {
    use HighlightState::*;

    match state {
        Normal if token.is_quote() => (string_style(), InString),
        InString if token.is_quote() => (string_style(), Normal),
        InString if token.text == "{" => (category_style(token.category), InterpolatedExpr),
        InString => (string_style(), InString),
        InterpolatedExpr if token.text == "}" => (category_style(token.category), InString),
        _ => (category_style(token.category), state),
    }
}

/// The cursor marker. Terminals have no zero-width glyph, so a hidden cursor
/// keeps its column as a blank to stop the line from jittering.
pub fn cursor_span(visible: bool) -> Span<'static> {
    if visible {
        Span::styled(CURSOR_GLYPH, category_style(TokenCategory::CursorSentinel))
    } else {
        Span::raw(" ")
    }
}

/// Highlight a token sequence, drawing the cursor before `tokens[cursor]`
/// (or at the end when `cursor == tokens.len()`).
///
/// Cursor sentinels inside `tokens` are drawn as cursors too and do not
/// affect the string state.
pub fn highlight_tokens(
    tokens: &[Token],
    cursor: Option<usize>,
    cursor_visible: bool,
) -> Line<'static> {
    let mut spans = Vec::with_capacity(tokens.len() + 1);
    let mut state = HighlightState::Normal;

    for (index, token) in tokens.iter().enumerate() {
        if cursor == Some(index) {
            spans.push(cursor_span(cursor_visible));
        }
        if token.is_cursor() {
            spans.push(cursor_span(cursor_visible));
            continue;
        }
        let (style, next) = step(state, token);
        spans.push(Span::styled(token.display_text().to_string(), style));
        state = next;
    }
    if cursor == Some(tokens.len()) {
        spans.push(cursor_span(cursor_visible));
    }

    Line::from(spans)
}

/// Highlight whatever `line` currently shows.
pub fn highlight_line(line: &LineState, cursor_visible: bool) -> Line<'static> {
    let (tokens, cursor) = line.visible_tokens();
    highlight_tokens(tokens, cursor, cursor_visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f_string() -> Vec<Token> {
        vec![
            Token::keyword("print"),
            Token::symbol("("),
            Token::new(TokenCategory::FormatMarker, "f"),
            Token::symbol("'"),
            Token::text_literal("Hello "),
            Token::symbol("{"),
            Token::identifier("name"),
            Token::symbol("}"),
            Token::keyword("and"),
            Token::symbol("'"),
            Token::symbol(")"),
        ]
    }

    #[test]
    fn test_string_state_forces_string_style() {
        let line = highlight_tokens(&f_string(), None, true);
        let spans = &line.spans;
        assert_eq!(spans.len(), 11);

        assert_eq!(spans[0].style, category_style(TokenCategory::Keyword));
        assert_eq!(spans[3].style, string_style());
        assert_eq!(spans[4].style, string_style());
        // Inside the interpolated expression tokens keep their own style.
        assert_eq!(spans[6].style, category_style(TokenCategory::Identifier));
        // Back inside the string a keyword is still just text.
        assert_eq!(spans[8].style, string_style());
        assert_eq!(spans[9].style, string_style());
        assert_eq!(spans[10].style, category_style(TokenCategory::Symbol));
    }

    #[test]
    fn test_braces_outside_string_do_not_change_state() {
        let tokens = vec![Token::symbol("{"), Token::keyword("if"), Token::symbol("}")];
        let line = highlight_tokens(&tokens, None, true);
        assert_eq!(line.spans[1].style, category_style(TokenCategory::Keyword));
    }

    #[test]
    fn test_state_machine_transitions() {
        let quote = Token::symbol("'");
        let open = Token::symbol("{");
        let close = Token::symbol("}");

        let (_, s) = step(HighlightState::Normal, &quote);
        assert_eq!(s, HighlightState::InString);
        let (_, s) = step(s, &open);
        assert_eq!(s, HighlightState::InterpolatedExpr);
        let (_, s) = step(s, &quote);
        assert_eq!(s, HighlightState::InterpolatedExpr);
        let (_, s) = step(s, &close);
        assert_eq!(s, HighlightState::InString);
        let (_, s) = step(s, &quote);
        assert_eq!(s, HighlightState::Normal);
    }

    #[test]
    fn test_cursor_placement_and_blink() {
        let tokens = vec![Token::identifier("a"), Token::identifier("b")];

        let line = highlight_tokens(&tokens, Some(1), true);
        let text: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, vec!["a", CURSOR_GLYPH, "b"]);

        let hidden = highlight_tokens(&tokens, Some(2), false);
        assert_eq!(hidden.spans.len(), 3);
        assert_eq!(hidden.spans[2].content, " ");
    }

    #[test]
    fn test_sentinel_in_sequence_renders_as_cursor() {
        let tokens = vec![Token::identifier("a"), Token::cursor()];
        let line = highlight_tokens(&tokens, None, true);
        assert_eq!(line.spans[1].content, CURSOR_GLYPH);
    }

    #[test]
    fn test_tab_is_expanded() {
        let line = highlight_tokens(&[Token::tab()], None, true);
        assert_eq!(line.spans[0].content, "    ");
    }
}
