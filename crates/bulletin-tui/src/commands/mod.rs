// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{app::AppState, theme::Theme, widgets::status_bar::StatusMessage};
use bulletin_core::types::{Combine, Matching, Scope, LIMIT_OPTIONS};
use bulletin_core::NumberRange;

/// A parsed, validated command ready to be executed by the app shell.
///
/// Term mutations (`Add`, `Remove`, `Clear`) are the write half of the
/// search pipeline: they change session state, and the shell re-runs the
/// read-only compile-and-query step after every execution.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Help,
    /// Add one or more comma/pipe separated terms.
    Add(String),
    /// Remove a single term (exact match).
    Remove(String),
    /// Clear the whole term set.
    Clear,
    /// Require every term to match.
    All,
    /// Require at least one term to match.
    Any,
    /// Smart whole-phrase matching.
    Smart,
    /// Raw case-insensitive pattern matching.
    Regex,
    Scope(Scope),
    Range(i64, i64),
    Limit(usize),
    /// Export current results to CSV, optionally to a given path.
    Export(Option<String>),
    /// Toggle the description strip in the results pane.
    Descriptions,
    /// Toggle the read-only SQL preview popup.
    Sql,
    Theme(String),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "add" => {
                if rest.is_empty() {
                    Err("usage: add <term>[, term…]".to_string())
                } else {
                    Ok(Command::Add(rest.to_string()))
                }
            }
            "rm" | "remove" => {
                if rest.is_empty() {
                    Err("usage: rm <term>".to_string())
                } else {
                    Ok(Command::Remove(rest.to_string()))
                }
            }
            "clear" => Ok(Command::Clear),
            "all" => Ok(Command::All),
            "any" => Ok(Command::Any),
            "smart" => Ok(Command::Smart),
            "regex" | "pattern" => Ok(Command::Regex),
            "scope" => match rest {
                "title" => Ok(Command::Scope(Scope::Title)),
                "desc" | "description" => Ok(Command::Scope(Scope::Description)),
                "both" => Ok(Command::Scope(Scope::Both)),
                _ => Err("usage: scope <title|desc|both>".to_string()),
            },
            "range" => {
                let mut parts = rest.split_whitespace();
                match (
                    parts.next().and_then(|p| p.parse::<i64>().ok()),
                    parts.next().and_then(|p| p.parse::<i64>().ok()),
                ) {
                    (Some(low), Some(high)) if parts.next().is_none() => {
                        Ok(Command::Range(low, high))
                    }
                    _ => Err("usage: range <low> <high>".to_string()),
                }
            }
            "limit" => match rest.parse::<usize>() {
                Ok(n) if LIMIT_OPTIONS.contains(&n) => Ok(Command::Limit(n)),
                Ok(_) => Err(format!("limit must be one of {LIMIT_OPTIONS:?}")),
                Err(_) => Err("usage: limit <n>".to_string()),
            },
            "export" => Ok(Command::Export(
                (!rest.is_empty()).then(|| rest.to_string()),
            )),
            "desc" | "descriptions" => Ok(Command::Descriptions),
            "sql" => Ok(Command::Sql),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
///
/// Every command that changes the search inputs ends with one synchronous
/// [`AppState::refresh`] — the whole pipeline re-runs per interaction.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Add(raw) => {
            let added = s.terms.add_terms(&raw);
            if added == 0 {
                s.status = Some(StatusMessage::Info("no new terms".to_string()));
            }
            s.refresh();
        }
        Command::Remove(term) => {
            if !s.terms.remove_term(&term) {
                s.status = Some(StatusMessage::Info(format!("no such term: {term}")));
            }
            s.refresh();
        }
        Command::Clear => {
            s.terms.clear();
            s.refresh();
        }
        Command::All => {
            s.combine = Combine::All;
            s.refresh();
        }
        Command::Any => {
            s.combine = Combine::Any;
            s.refresh();
        }
        Command::Smart => {
            s.matching = Matching::Smart;
            s.refresh();
        }
        Command::Regex => {
            s.matching = Matching::Pattern;
            s.refresh();
        }
        Command::Scope(scope) => {
            s.scope = scope;
            s.refresh();
        }
        Command::Range(low, high) => {
            // Reversed bounds are swapped rather than rejected
            s.range = NumberRange::new(low, high);
            s.refresh();
        }
        Command::Limit(limit) => {
            s.limit = limit;
            s.refresh();
        }
        Command::Export(path) => {
            s.export(path.as_deref());
        }
        Command::Descriptions => {
            s.results.show_descriptions = !s.results.show_descriptions;
        }
        Command::Sql => {
            s.show_sql = !s.show_sql;
        }
        Command::Theme(name) => {
            s.theme = match name.to_ascii_lowercase().as_str() {
                "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Theme::load_gruvbox_dark(),
                _ => Theme::load_default(),
            };
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
