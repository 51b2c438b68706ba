//! TUI module for the dialer dashboard
//!
//! Terminal user interface using Ratatui.

mod app;
mod debug_log;
mod help;
mod input;
pub mod log_capture;
mod ui;

pub use app::run;
