//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`sheet`]: the 20 worksheet rows with highlighting and the active line
//! - [`palette`]: clickable token slots and fixed glyph controls
//! - [`output`]: what the interpreter printed
//! - [`status`]: status bar with keybindings and sheet state
//!
//! Each module exports a primary `render_*` function. The palette renderer
//! also returns the button rectangles it drew, for mouse hit-testing.

pub mod output;
pub mod palette;
pub mod sheet;
pub mod status;

pub use output::render_output_pane;
pub use palette::{pane_height, render_palette_pane, PaletteHit, PaletteHitboxes};
pub use sheet::render_sheet_pane;
pub use status::{render_status_bar, SheetPhase};

use ratatui::layout::Rect;

pub fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x
        && x < rect.x.saturating_add(rect.width)
        && y >= rect.y
        && y < rect.y.saturating_add(rect.height)
}
