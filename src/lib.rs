//! # Introduction
//!
//! codesheet is a terminal worksheet for learning to program. Each exercise
//! is a sheet of up to 20 lines; the learner rebuilds every line from a
//! shuffled palette of tokens, and each line is checked as soon as it
//! changes. Matching lines advance the sheet and, when they contain runnable
//! code, the program so far is sent to an interpreter.
//!
//! ## Pipeline
//!
//! ```text
//! Catalog → Worksheet → edit → normalize → verify → advance → execute → TUI
//! ```
//!
//! 1. [`catalog`]: the read-only exercise data, addressed by
//!    `(language, lesson, chapter, line)`.
//! 2. [`sheet`]: tokens, per-line state, the line editor, normalization,
//!    verification, progression and the palette.
//! 3. [`session`]: one learner on one exercise; turns edits into
//!    [`session::SheetEvent`]s.
//! 4. [`execution`]: the gateway contract, a process-backed gateway and the
//!    cancel-on-supersede dispatcher.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! [`config`] and [`error`] hold the ambient configuration and error types.

pub mod catalog;
pub mod config;
pub mod error;
pub mod execution;
pub mod session;
pub mod sheet;
pub mod ui;
