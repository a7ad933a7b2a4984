//! Cursor-based editing of a line's entered tokens
//!
//! All operations are O(n) in the line length and never fail: edits at a
//! boundary are silently ignored. Each returns whether the buffer or cursor
//! changed so callers can skip re-verification on a no-op.

use super::line::LineState;
use super::token::Token;

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl LineState {
    /// Insert `token` immediately before the cursor.
    pub fn insert(&mut self, token: Token) -> bool {
        debug_assert!(!token.is_cursor(), "cursor sentinels are not stored in the buffer");
        let at = self.cursor_index.min(self.entered_tokens.len());
        self.entered_tokens.insert(at, token);
        self.cursor_index = at + 1;
        true
    }

    /// Remove the token immediately before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.cursor_index == 0 {
            return false;
        }
        self.cursor_index -= 1;
        self.entered_tokens.remove(self.cursor_index);
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Left if self.cursor_index > 0 => {
                self.cursor_index -= 1;
                true
            }
            Direction::Right if self.cursor_index < self.entered_tokens.len() => {
                self.cursor_index += 1;
                true
            }
            _ => false,
        }
    }

    /// Entered tokens with a cursor sentinel spliced in at the cursor.
    pub fn entered_with_cursor(&self) -> Vec<Token> {
        let mut tokens = self.entered_tokens.clone();
        tokens.insert(self.cursor_index.min(tokens.len()), Token::cursor());
        tokens
    }

    /// Put the cursor at the start of an empty buffer.
    pub(crate) fn reset_entry(&mut self) {
        self.entered_tokens.clear();
        self.cursor_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> LineState {
        LineState::new(vec![Token::identifier("x")], None)
    }

    #[test]
    fn test_insert_before_cursor() {
        let mut line = line();
        line.insert(Token::identifier("a"));
        line.insert(Token::identifier("c"));
        line.move_cursor(Direction::Left);
        line.insert(Token::identifier("b"));

        let texts: Vec<&str> = line.entered_tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(line.cursor_index, 2);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut line = line();
        assert!(!line.backspace());
        line.insert(Token::identifier("a"));
        line.move_cursor(Direction::Left);
        assert!(!line.backspace());
        assert_eq!(line.entered_tokens.len(), 1);
    }

    #[test]
    fn test_backspace_removes_preceding_token() {
        let mut line = line();
        line.insert(Token::identifier("a"));
        line.insert(Token::identifier("b"));
        line.move_cursor(Direction::Left);
        assert!(line.backspace());
        assert_eq!(line.entered_tokens, vec![Token::identifier("b")]);
        assert_eq!(line.cursor_index, 0);
    }

    #[test]
    fn test_move_cursor_boundaries() {
        let mut line = line();
        assert!(!line.move_cursor(Direction::Left));
        assert!(!line.move_cursor(Direction::Right));
        line.insert(Token::identifier("a"));
        assert!(!line.move_cursor(Direction::Right));
        assert!(line.move_cursor(Direction::Left));
        assert!(!line.move_cursor(Direction::Left));
    }

    #[test]
    fn test_entered_with_cursor() {
        let mut line = line();
        line.insert(Token::identifier("a"));
        line.insert(Token::identifier("b"));
        line.move_cursor(Direction::Left);
        let tokens = line.entered_with_cursor();
        assert_eq!(tokens.len(), 3);
        assert!(tokens[1].is_cursor());
        assert_eq!(tokens.iter().filter(|t| t.is_cursor()).count(), 1);
    }
}
