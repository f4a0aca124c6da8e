//! Ratatui widgets for the bulletin TUI.

pub mod command_bar;
pub mod filter_panel;
pub mod help;
pub mod results_table;
pub mod search_bar;
pub mod sql_preview;
pub mod status_bar;
