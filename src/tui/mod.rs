//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides two screens:
//! - Transaction simulator with six feature sliders
//! - Verdict panel with confidence gauge

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::ScopeTheme;
