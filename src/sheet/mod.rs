//! Exercise sheet model and the code-entry verification engine
//!
//! - [`token`]: token categories and the fixed glyph set
//! - [`line`]: per-line state and its derived input/execution flags
//! - [`worksheet`]: the fixed 20-row sheet
//! - [`editor`]: cursor-based insert / backspace / move on the active line
//! - [`normalize`]: whitespace normalization (space runs → tab, optional spaces)
//! - [`verify`]: positional comparison against the required tokens
//! - [`progression`]: auto-advance, chapter completion and try/except
//!   execution suppression
//! - [`palette`]: the shuffled, deduplicated token palette
//!
//! # Flow
//!
//! ```text
//! catalog → Worksheet → edit → normalize → verify → (match) progression → palette
//! ```

pub mod editor;
pub mod line;
pub mod normalize;
pub mod palette;
pub mod progression;
pub mod token;
pub mod verify;
pub mod worksheet;

pub use editor::Direction;
pub use line::{LineState, LineStatus};
pub use palette::{Palette, PALETTE_SLOTS};
pub use progression::Progress;
pub use token::{glyph_controls, Token, TokenCategory};
pub use worksheet::{Worksheet, MAX_LINES};
