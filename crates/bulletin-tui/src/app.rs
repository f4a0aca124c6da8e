//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.
//!
//! Every interaction follows the same synchronous cycle: mutate session
//! state (terms, facet selections, modes, range, cap), call
//! [`AppState::refresh`] to recompile the predicate and re-run the one
//! catalog query, then redraw. There are no background tasks.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        filter_panel::{FilterPanel, FilterPanelState},
        help::HelpPopup,
        results_table::{ResultsTable, ResultsTableState},
        search_bar::{SearchBar, SearchBarState},
        sql_preview::SqlPreview,
        status_bar::{StatusBar, StatusMessage},
    },
};
use bulletin_catalog::Catalog;
use bulletin_core::{
    config::Config,
    types::{Combine, Matching, NumberRange, Scope, SearchConfig, LIMIT_OPTIONS},
    TermSet,
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, path::Path, time::Duration};

const DEFAULT_EXPORT_PATH: &str = "bulletin-export.csv";

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Filters,
    Results,
    SearchBar,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub catalog: Catalog,

    // Session search state — the inputs to the predicate compiler.
    pub terms: TermSet,
    pub combine: Combine,
    pub matching: Matching,
    pub scope: Scope,
    pub range: NumberRange,
    pub limit: usize,

    pub filters: FilterPanelState,
    pub results: ResultsTableState,
    pub search_bar: SearchBarState,
    pub command_bar: CommandBarState,

    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub show_sql: bool,
    pub status: Option<StatusMessage>,
    pub quit: bool,
}

impl AppState {
    /// Snapshot the current session state as the compiler's input.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            terms: self.terms.clone(),
            combine: self.combine,
            matching: self.matching,
            scope: self.scope,
            levels: self.filters.selected_values("level"),
            colleges: self.filters.selected_values("college"),
            subjects: self.filters.selected_values("subject"),
            range: self.range,
            limit: self.limit,
        }
    }

    /// Re-run the whole pipeline: compile the predicate and execute the one
    /// query for this interaction.
    ///
    /// On failure (the only failure is an invalid raw pattern) the error is
    /// shown in the status bar and the previous results stay on screen.
    pub fn refresh(&mut self) {
        self.status = None;
        let config = self.search_config();
        match self.catalog.query(&config) {
            Ok(rows) => {
                tracing::debug!(matched = rows.len(), "refresh: query ok");
                self.results.set_rows(rows);
            }
            Err(err) => {
                tracing::debug!(error = %err, "refresh: query failed");
                self.status = Some(StatusMessage::Error(err.to_string()));
            }
        }
    }

    /// Export the rows currently on screen to CSV.
    pub fn export(&mut self, path: Option<&str>) {
        let path = path.unwrap_or(DEFAULT_EXPORT_PATH);
        match bulletin_core::export::export_csv(Path::new(path), &self.results.rows) {
            Ok(count) => {
                self.status = Some(StatusMessage::Info(format!(
                    "exported {count} rows to {path}"
                )));
            }
            Err(err) => {
                self.status = Some(StatusMessage::Error(format!("export failed: {err}")));
            }
        }
    }

    /// One-line summary of the active modes for the search bar strip.
    fn mode_summary(&self) -> String {
        format!(
            "{}·{}·{}  #{}  limit {}",
            self.combine, self.matching, self.scope, self.range, self.limit
        )
    }

    fn step_limit(&mut self, up: bool) {
        let idx = LIMIT_OPTIONS
            .iter()
            .position(|&n| n >= self.limit)
            .unwrap_or(LIMIT_OPTIONS.len() - 1);
        let next = if up {
            (idx + 1).min(LIMIT_OPTIONS.len() - 1)
        } else {
            idx.saturating_sub(1)
        };
        if LIMIT_OPTIONS[next] != self.limit {
            self.limit = LIMIT_OPTIONS[next];
            tracing::debug!(limit = self.limit, "limit stepped");
            self.refresh();
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(catalog: Catalog, config: Config, theme: Theme) -> Self {
        let vocab = catalog.vocabulary();
        let filters = FilterPanelState::from_vocabulary(&vocab);
        let range = catalog.number_domain();

        let scope = match config.search.scope.as_str() {
            "title" => Scope::Title,
            "desc" | "description" => Scope::Description,
            _ => Scope::Both,
        };
        let limit = if LIMIT_OPTIONS.contains(&config.search.default_limit) {
            config.search.default_limit
        } else {
            bulletin_core::DEFAULT_LIMIT
        };

        let mut results = ResultsTableState::new(Vec::new());
        results.show_descriptions = config.ui.show_descriptions;

        let mut state = AppState {
            catalog,
            terms: TermSet::new(),
            combine: if config.search.require_all {
                Combine::All
            } else {
                Combine::Any
            },
            matching: if config.search.smart_matching {
                Matching::Smart
            } else {
                Matching::Pattern
            },
            scope,
            range,
            limit,
            filters,
            results,
            search_bar: SearchBarState::default(),
            command_bar: CommandBarState::default(),
            focus: Focus::SearchBar,
            prev_focus: Focus::SearchBar,
            theme,
            config,
            show_help: false,
            show_sql: false,
            status: None,
            quit: false,
        };
        // Initial query — an empty search shows the whole catalog up to the cap
        state.refresh();

        App { state }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    s.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // SQL preview intercepts close keys, passes everything else through.
        if s.show_sql {
            if matches!(event, AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("sql preview closed");
                s.show_sql = false;
                return;
            }
        }

        // Command mode intercepts all events.
        if s.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    s.command_bar.clear();
                    s.focus = s.prev_focus;
                }
                AppEvent::Enter => {
                    let input = s.command_bar.input.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                            execute_command(s, cmd);
                        }
                        Err(msg) if msg.is_empty() => {
                            // Empty input — just close
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                        }
                        Err(msg) => {
                            // Show the error; bar stays open
                            s.command_bar.error = Some(msg);
                        }
                    }
                }
                other => s.command_bar.handle(&other),
            }
            return;
        }

        match event {
            // Toggle help (only when not typing in the search bar)
            AppEvent::Char('?') if s.focus != Focus::SearchBar => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }

            // Enter command mode with `:` (not from the search bar)
            AppEvent::Char(':') if s.focus != Focus::SearchBar => {
                tracing::debug!(prev_focus = ?s.focus, "entering command mode");
                s.prev_focus = s.focus;
                s.command_bar.clear();
                s.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            // Return focus from the search bar
            AppEvent::Escape => {
                if s.focus == Focus::SearchBar {
                    tracing::debug!("focus: SearchBar -> Filters");
                    s.focus = Focus::Filters;
                }
            }

            // Tab-cycle focus: Filters → Results → SearchBar → Filters
            AppEvent::FocusNext => {
                let next = match s.focus {
                    Focus::Filters => Focus::Results,
                    Focus::Results => Focus::SearchBar,
                    Focus::SearchBar | Focus::Command => Focus::Filters,
                };
                tracing::debug!(from = ?s.focus, to = ?next, "focus cycle");
                s.focus = next;
            }

            // Jump to the search bar
            AppEvent::SearchFocus => {
                tracing::debug!("focus -> SearchBar");
                s.focus = Focus::SearchBar;
            }

            // Row-cap stepping works regardless of focus
            AppEvent::LimitUp => s.step_limit(true),
            AppEvent::LimitDown => s.step_limit(false),

            // Export the rows currently on screen
            AppEvent::Export => s.export(None),

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => dispatch_to_focused(s, other),
        }
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::SearchBar | Focus::Command)
}

/// Route an event to the widget that owns the current focus.
fn dispatch_to_focused(s: &mut AppState, event: AppEvent) {
    match s.focus {
        Focus::Filters => {
            // Selection toggles change the filter inputs — re-query
            if s.filters.handle(&event) {
                s.refresh();
            }
        }
        Focus::Results => s.results.handle(&event),
        Focus::SearchBar => match event {
            AppEvent::Enter => {
                let input = s.search_bar.input.clone();
                s.search_bar.clear();
                if s.terms.add_terms(&input) > 0 {
                    s.refresh();
                }
            }
            // Backspace on an empty input pops the most recent chip
            AppEvent::Backspace if s.search_bar.input.is_empty() => {
                if let Some(last) = s.terms.iter().last().map(str::to_string) {
                    s.terms.remove_term(&last);
                    s.refresh();
                }
            }
            other => s.search_bar.handle(&other),
        },
        Focus::Command => {} // handled before dispatch, should not reach here
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line status bar | body | 3-line search bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .split(area);

    // Horizontal body split: filter panel | results
    let pct = state.config.ui.filter_pane_width_pct;
    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Percentage(pct), Constraint::Fill(1)])
        .split(vert[1]);

    frame.render_widget(
        StatusBar::new(
            state.catalog.len(),
            state.results.rows.len(),
            state.status.as_ref(),
            &state.theme,
        ),
        vert[0],
    );
    frame.render_widget(
        FilterPanel::new(&state.filters, state.focus == Focus::Filters, &state.theme),
        horiz[0],
    );
    frame.render_widget(
        ResultsTable::new(&state.results, state.focus == Focus::Results, &state.theme),
        horiz[1],
    );
    frame.render_widget(
        SearchBar::new(
            &state.search_bar,
            &state.terms,
            state.mode_summary(),
            state.focus == Focus::SearchBar,
            &state.theme,
        ),
        vert[2],
    );

    if state.show_sql {
        let fragment = bulletin_core::sql::select_from(
            "courses_v",
            &bulletin_core::compile(&state.search_config()),
            state.limit,
        );
        frame.render_widget(SqlPreview::new(&fragment, &state.theme), area);
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom() - 1, height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return; // cursor is set; skip search-bar cursor below
    }

    // Position the terminal cursor when the search bar is focused
    if state.focus == Focus::SearchBar {
        let sb = SearchBar::new(
            &state.search_bar,
            &state.terms,
            state.mode_summary(),
            true,
            &state.theme,
        );
        let (cx, cy) = sb.cursor_position(vert[2]);
        frame.set_cursor_position((cx, cy));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
