//! Search bar widget — term chips + text input at the bottom of the screen.
//!
//! Active terms render as chips ahead of the input; typing and pressing
//! `Enter` feeds the input through the term splitter (comma/pipe separated,
//! so several terms can be added at once). The right-hand strip shows the
//! active match modes, scope, course-number range, and row cap.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor; on an empty
//!   input it removes the last chip instead (handled by the app shell).
//! - `Nav(Left)` / `Nav(Right)` move the cursor (arrow keys while focused).

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use bulletin_core::TermSet;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use tracing;

/// Width of the right-hand mode strip.
const MODE_STRIP_WIDTH: u16 = 34;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SearchBarState {
    /// The in-progress term text, not yet added to the TermSet.
    pub input: String,
    /// Byte offset of the cursor within `input`.
    pub cursor: usize,
}

impl SearchBarState {
    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    /// Handle a key event from the app shell. Text-editing events update
    /// the input; everything else is ignored.
    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Char(c) => {
                self.input.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(input = %self.input, cursor = self.cursor, "search: char inserted");
            }
            AppEvent::Backspace => {
                if self.cursor > 0 {
                    // Walk back one char boundary
                    let prev = self.input[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    self.input.remove(prev);
                    self.cursor = prev;
                    tracing::debug!(input = %self.input, cursor = self.cursor, "search: backspace");
                }
            }
            AppEvent::Nav(Direction::Left) => {
                if self.cursor > 0 {
                    self.cursor = self.input[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                }
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.input.len() {
                    let next = self.input[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.input.len());
                    self.cursor = next;
                }
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct SearchBar<'a> {
    state: &'a SearchBarState,
    terms: &'a TermSet,
    /// Preformatted mode summary (combine, matching, scope, range, limit).
    modes: String,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    pub fn new(
        state: &'a SearchBarState,
        terms: &'a TermSet,
        modes: String,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, terms, modes, focused, theme }
    }

    /// Display width of the chip prefix ahead of the input text.
    fn chips_width(&self) -> u16 {
        self.terms
            .iter()
            .map(|t| t.chars().count() as u16 + 3) // "[term] "
            .sum()
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // The block adds 1-cell borders; text starts at (area.x+1, area.y+1).
        let col = self.state.input[..self.state.cursor].chars().count() as u16;
        let x = (area.x + 1 + self.chips_width() + col).min(area.right().saturating_sub(2));
        let y = area.y + 1;
        (x, y)
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title("Search")
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        // Split inner area: chips + input (fill) | mode strip (fixed width)
        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(MODE_STRIP_WIDTH)])
            .split(inner);

        let mut spans: Vec<Span> = Vec::new();
        for term in self.terms.iter() {
            spans.push(Span::styled(format!("[{term}]"), self.theme.chip));
            spans.push(Span::raw(" "));
        }
        if self.state.input.is_empty() && self.terms.is_empty() && !self.focused {
            spans.push(Span::styled(
                "press / to search (comma or | separates terms)",
                Style::default().add_modifier(Modifier::DIM),
            ));
        } else {
            spans.push(Span::raw(self.state.input.as_str()));
        }
        Paragraph::new(Line::from(spans)).render(chunks[0], buf);

        Paragraph::new(Line::from(Span::styled(
            self.modes,
            Style::default().add_modifier(Modifier::DIM),
        )))
        .right_aligned()
        .render(chunks[1], buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
