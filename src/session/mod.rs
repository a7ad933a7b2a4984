//! One learner working through one exercise
//!
//! [`Session`] ties the sheet engine together: it applies an edit to the
//! active line, re-verifies it, advances on a match, rebuilds the palette for
//! the new active line and reports what happened as [`SheetEvent`]s. It does
//! not execute anything; callers react to `LineComplete` events that ask for
//! execution.

use crate::catalog::{ExerciseKey, TokenCatalog};
use crate::error::SheetError;
use crate::execution::{assemble_source, SourceMode};
use crate::sheet::verify::check_match;
use crate::sheet::{Direction, Palette, Progress, Token, Worksheet};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A learner action on the active line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    Insert(Token),
    Backspace,
    MoveCursor(Direction),
}

/// Outcome of an action or of opening the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetEvent {
    /// The active line matched its required tokens.
    LineComplete {
        line: usize,
        requires_execution: bool,
    },
    /// A new line became active and the palette was rebuilt.
    ActiveLineChanged(usize),
    /// Every input line is done. Emitted once per session.
    ChapterComplete,
}

pub struct Session<R = SmallRng> {
    key: ExerciseKey,
    title: String,
    expected_output: Vec<String>,
    worksheet: Worksheet,
    palette: Palette,
    rng: R,
}

impl Session<SmallRng> {
    /// Open an exercise with an entropy-seeded shuffle.
    pub fn open(catalog: &TokenCatalog, key: ExerciseKey) -> Result<Self, SheetError> {
        Self::with_rng(catalog, key, SmallRng::from_entropy())
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(catalog: &TokenCatalog, key: ExerciseKey, rng: R) -> Result<Self, SheetError> {
        let chapter = catalog.resolve(&key)?;
        let title = chapter.title.clone();
        let expected_output = chapter.expected_output.clone();
        let worksheet = Worksheet::build(catalog, &key);

        Ok(Session {
            key,
            title,
            expected_output,
            worksheet,
            palette: Palette::default(),
            rng,
        })
    }

    /// A session over a hand-built sheet, outside any catalog.
    pub fn from_worksheet(worksheet: Worksheet, rng: R) -> Self {
        Session {
            key: ExerciseKey::new("", 0, 0),
            title: String::new(),
            expected_output: Vec::new(),
            worksheet,
            palette: Palette::default(),
            rng,
        }
    }

    /// Activate the first input line (or complete an input-free chapter).
    pub fn start(&mut self) -> Vec<SheetEvent> {
        let progress = self.worksheet.start();
        self.on_progress(progress)
    }

    /// Apply one edit to the active line and re-verify it.
    ///
    /// Does nothing once the chapter is complete.
    pub fn apply(&mut self, action: EditAction) -> Vec<SheetEvent> {
        let Some(index) = self.worksheet.active_line() else {
            return Vec::new();
        };
        let Some(line) = self.worksheet.active_mut() else {
            return Vec::new();
        };

        let changed = match action {
            EditAction::Insert(token) => line.insert(token),
            EditAction::Backspace => line.backspace(),
            EditAction::MoveCursor(direction) => line.move_cursor(direction),
        };
        if !changed || !check_match(line) {
            return Vec::new();
        }

        let mut events = vec![SheetEvent::LineComplete {
            line: index,
            requires_execution: line.requires_execution,
        }];
        let progress = self.worksheet.advance_after_success();
        events.extend(self.on_progress(progress));
        events
    }

    /// Insert the token in palette `slot`; an empty slot is ignored.
    pub fn insert_from_palette(&mut self, slot: usize) -> Vec<SheetEvent> {
        match self.palette.get(slot).cloned() {
            Some(token) => self.apply(EditAction::Insert(token)),
            None => Vec::new(),
        }
    }

    fn on_progress(&mut self, progress: Option<Progress>) -> Vec<SheetEvent> {
        match progress {
            Some(Progress::Active(index)) => {
                self.palette = Palette::build(self.worksheet.line(index), &mut self.rng);
                vec![SheetEvent::ActiveLineChanged(index)]
            }
            Some(Progress::ChapterComplete) => {
                self.palette = Palette::default();
                vec![SheetEvent::ChapterComplete]
            }
            None => Vec::new(),
        }
    }

    /// Program text for lines `0..=line`, ready for the gateway.
    pub fn source_through(&self, line: usize, mode: SourceMode) -> String {
        assemble_source(&self.worksheet, line, mode)
    }

    pub fn worksheet(&self) -> &Worksheet {
        &self.worksheet
    }

    pub fn toggle_cursor_blink(&mut self) {
        self.worksheet.toggle_cursor_blink();
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn key(&self) -> &ExerciseKey {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn expected_output(&self) -> &[String] {
        &self.expected_output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::LineState;

    fn session(lines: Vec<LineState>) -> Session {
        Session::from_worksheet(Worksheet::from_lines(lines), SmallRng::seed_from_u64(3))
    }

    #[test]
    fn test_start_builds_palette() {
        let mut session = session(vec![LineState::new(
            vec![Token::identifier("go"), Token::symbol("("), Token::symbol(")")],
            None,
        )]);
        assert_eq!(session.start(), vec![SheetEvent::ActiveLineChanged(0)]);
        assert_eq!(session.palette().tokens(), &[Token::identifier("go")]);
    }

    #[test]
    fn test_noop_edit_emits_nothing() {
        let mut session = session(vec![LineState::new(vec![Token::identifier("go")], None)]);
        session.start();
        assert!(session.apply(EditAction::Backspace).is_empty());
        assert!(session
            .apply(EditAction::MoveCursor(Direction::Left))
            .is_empty());
    }

    #[test]
    fn test_edits_after_completion_are_ignored() {
        let mut session = session(vec![LineState::new(vec![Token::identifier("go")], None)]);
        session.start();
        let events = session.insert_from_palette(0);
        assert_eq!(
            events,
            vec![
                SheetEvent::LineComplete {
                    line: 0,
                    requires_execution: true
                },
                SheetEvent::ChapterComplete
            ]
        );
        assert!(session.palette().is_empty());
        assert!(session.apply(EditAction::Insert(Token::identifier("go"))).is_empty());
    }

    #[test]
    fn test_empty_palette_slot_is_ignored() {
        let mut session = session(vec![LineState::new(vec![Token::identifier("go")], None)]);
        session.start();
        assert!(session.insert_from_palette(5).is_empty());
    }
}
