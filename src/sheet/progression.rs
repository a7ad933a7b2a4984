//! Moving the active line forward through a sheet
//!
//! `Active(i)` is the only resting state. After a line is verified the scan
//! walks forward, drawing every line that needs no input, and stops at the
//! next line that does. Running off the end completes the chapter, which
//! happens at most once per [`Worksheet`].

use super::line::{LineState, LineStatus};
use super::worksheet::{Worksheet, MAX_LINES};

/// Where a progression scan came to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Line `i` now takes input.
    Active(usize),
    /// No input-requiring line remains.
    ChapterComplete,
}

impl Worksheet {
    /// Open the sheet: activate the first line that needs input.
    pub fn start(&mut self) -> Option<Progress> {
        if self.active_line.is_some() || self.chapter_complete {
            return None;
        }
        self.scan_from(0)
    }

    /// Close the active line and move to the next one needing input.
    ///
    /// Returns `None` if there is no active line.
    pub fn advance_after_success(&mut self) -> Option<Progress> {
        let completed = self.active_line.take()?;
        self.lines[completed].status = LineStatus::Completed;
        self.scan_from(completed + 1)
    }

    fn scan_from(&mut self, start: usize) -> Option<Progress> {
        for index in start..MAX_LINES {
            let line = &mut self.lines[index];
            if !line.requires_input {
                line.status = LineStatus::Shown;
                continue;
            }
            line.reset_entry();
            line.status = LineStatus::Active;
            self.active_line = Some(index);
            return Some(Progress::Active(index));
        }

        self.active_line = None;
        if self.chapter_complete {
            None
        } else {
            self.chapter_complete = true;
            Some(Progress::ChapterComplete)
        }
    }
}

/// Withhold automatic execution inside try/except blocks.
///
/// Starting at any line whose required text contains `try`, every line up to
/// and including the next line containing `except` is marked as not
/// executable, followed by any comment-only lines directly after it. Without
/// a closing `except` the run extends to the last line. The scan is a literal
/// substring match and knows nothing about nesting.
pub fn apply_execution_suppression(lines: &mut [LineState]) {
    let mut index = 0;
    while index < lines.len() {
        if !lines[index].mentions("try") {
            index += 1;
            continue;
        }

        let start = index;
        loop {
            lines[index].requires_execution = false;
            let closes = index > start && lines[index].mentions("except");
            index += 1;
            if closes || index >= lines.len() {
                break;
            }
        }

        while index < lines.len() && lines[index].is_comment_only {
            lines[index].requires_execution = false;
            index += 1;
        }
    }
}
