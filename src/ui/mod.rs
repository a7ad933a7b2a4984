//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! - **[`app`]**: application state, keyboard and mouse event loop, execution polling
//! - **[`panes`]**: render functions for each visible pane (sheet, palette,
//!   output, status bar)
//! - **[`highlight`]**: token-level syntax highlighting with the cursor marker
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! Construct an [`App`] from a [`Session`](crate::session::Session) and an
//! execution dispatcher, then call [`App::run`](app::App::run).

pub mod app;
pub mod highlight;
pub mod panes;
pub mod theme;

pub use app::App;
