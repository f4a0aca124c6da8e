//! bulletin TUI — ratatui application shell.
//!
//! The shell owns the session-scoped search state (term set, facet
//! selections, modes, range, row cap) and re-runs the compile-and-query
//! pipeline synchronously on every interaction.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

/// Start the TUI over a loaded catalog.
pub fn run(catalog: bulletin_catalog::Catalog) -> anyhow::Result<()> {
    let config = bulletin_core::config::Config::load()
        .unwrap_or_else(|_| bulletin_core::config::Config::defaults());
    let theme = theme::Theme::load_default();
    App::new(catalog, config, theme).run()
}
