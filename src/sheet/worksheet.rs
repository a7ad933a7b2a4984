//! The fixed-capacity exercise sheet

use super::line::LineState;
use super::progression::apply_execution_suppression;
use crate::catalog::{ExerciseKey, TokenCatalog};

/// Number of rows on a sheet. Never resized.
pub const MAX_LINES: usize = 20;

/// All lines of one exercise plus the active-line bookkeeping.
///
/// At most one line is active at a time, and only that line owns a cursor.
#[derive(Debug, Clone)]
pub struct Worksheet {
    pub(crate) lines: [LineState; MAX_LINES],
    pub(crate) active_line: Option<usize>,
    pub(crate) chapter_complete: bool,
    pub cursor_blink_on: bool,
}

impl Worksheet {
    /// Seed a sheet from the catalog entry for `key`.
    ///
    /// Rows without a catalog entry become empty, non-input lines.
    pub fn build(catalog: &TokenCatalog, key: &ExerciseKey) -> Self {
        let lines = std::array::from_fn(|index| match catalog.line(key, index) {
            Some(entry) => LineState::new(entry.tokens.clone(), entry.seed.clone()),
            None => LineState::empty(),
        });
        Self::from_array(lines)
    }

    /// Build a sheet from explicit lines; the rest of the rows stay empty.
    ///
    /// # Panics
    ///
    /// Panics if more than [`MAX_LINES`] lines are given.
    pub fn from_lines(lines: Vec<LineState>) -> Self {
        assert!(
            lines.len() <= MAX_LINES,
            "worksheet holds at most {} lines, got {}",
            MAX_LINES,
            lines.len()
        );
        let mut given = lines.into_iter();
        let lines = std::array::from_fn(|_| given.next().unwrap_or_default());
        Self::from_array(lines)
    }

    fn from_array(mut lines: [LineState; MAX_LINES]) -> Self {
        apply_execution_suppression(&mut lines);
        Worksheet {
            lines,
            active_line: None,
            chapter_complete: false,
            cursor_blink_on: true,
        }
    }

    pub fn lines(&self) -> &[LineState] {
        &self.lines
    }

    /// # Panics
    ///
    /// Panics if `index >= MAX_LINES`.
    pub fn line(&self, index: usize) -> &LineState {
        &self.lines[index]
    }

    pub fn active_line(&self) -> Option<usize> {
        self.active_line
    }

    pub fn active(&self) -> Option<&LineState> {
        self.active_line.map(|i| &self.lines[i])
    }

    pub fn active_mut(&mut self) -> Option<&mut LineState> {
        match self.active_line {
            Some(i) => Some(&mut self.lines[i]),
            None => None,
        }
    }

    pub fn is_chapter_complete(&self) -> bool {
        self.chapter_complete
    }

    pub fn toggle_cursor_blink(&mut self) {
        self.cursor_blink_on = !self.cursor_blink_on;
    }
}
