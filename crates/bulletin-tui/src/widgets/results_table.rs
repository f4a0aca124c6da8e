//! Results widget — the scrollable table of matching courses.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one row (scrolls view if needed) |
//! | `↓` / `j` | Move cursor down one row |
//! | `PageUp` / `Ctrl+u` | Scroll up one page |
//! | `PageDown` / `Ctrl+d` | Scroll down one page |
//!
//! # Scroll semantics
//!
//! `offset` = index of the first visible row. `cursor` = absolute index into
//! `rows`. The cursor is always kept within the visible window; moving it
//! past the edge auto-scrolls. When description display is enabled, the
//! bottom of the pane shows a two-line detail strip for the cursor row.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use bulletin_core::CourseRow;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};
use tracing;

const PAGE_STEP: usize = 10;
/// Rows reserved at the bottom of the pane for the description strip.
const DETAIL_ROWS: u16 = 2;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct ResultsTableState {
    pub rows: Vec<CourseRow>,
    /// Index of the first visible row.
    pub offset: usize,
    /// Absolute index into `rows` of the highlighted row.
    pub cursor: usize,
    /// Whether the description detail strip is shown.
    pub show_descriptions: bool,
    /// Cached from the last render so `handle()` can do cursor-aware scrolling.
    last_height: Cell<usize>,
}

impl ResultsTableState {
    pub fn new(rows: Vec<CourseRow>) -> Self {
        Self {
            rows,
            offset: 0,
            cursor: 0,
            show_descriptions: true,
            last_height: Cell::new(40),
        }
    }

    /// Replace the result set after a re-query, resetting the viewport.
    pub fn set_rows(&mut self, rows: Vec<CourseRow>) {
        self.rows = rows;
        self.offset = 0;
        self.cursor = 0;
    }

    /// The row under the cursor, if any.
    pub fn selected(&self) -> Option<&CourseRow> {
        self.rows.get(self.cursor)
    }

    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    /// Keep the cursor inside the `[offset, offset + height)` window.
    fn follow_cursor(&mut self) {
        let height = self.height();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }
    }

    /// Handle a navigation event from the app shell.
    pub fn handle(&mut self, event: &AppEvent) {
        let total = self.rows.len();
        if total == 0 {
            return;
        }

        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                self.follow_cursor();
                tracing::debug!(cursor = self.cursor, offset = self.offset, "results: cursor up");
            }
            AppEvent::Nav(Direction::Down) => {
                if self.cursor + 1 < total {
                    self.cursor += 1;
                }
                self.follow_cursor();
                tracing::debug!(cursor = self.cursor, offset = self.offset, "results: cursor down");
            }
            AppEvent::ScrollUp => {
                self.offset = self.offset.saturating_sub(PAGE_STEP);
                self.cursor = self.cursor.saturating_sub(PAGE_STEP);
                tracing::debug!(offset = self.offset, "results: page up");
            }
            AppEvent::ScrollDown => {
                let max_offset = total.saturating_sub(self.height());
                self.offset = (self.offset + PAGE_STEP).min(max_offset);
                self.cursor = (self.cursor + PAGE_STEP).min(total - 1);
                self.follow_cursor();
                tracing::debug!(offset = self.offset, "results: page down");
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultsTable<'a> {
    state: &'a ResultsTableState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ResultsTable<'a> {
    pub fn new(state: &'a ResultsTableState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for ResultsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let title = format!("Courses ({})", self.state.rows.len());
        let block = Block::bordered().title(title).border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        // Carve the description strip off the bottom when enabled
        let detail_height = if self.state.show_descriptions && inner.height > DETAIL_ROWS + 1 {
            DETAIL_ROWS
        } else {
            0
        };
        let list_area = Rect {
            height: inner.height - detail_height,
            ..inner
        };
        let height = list_area.height as usize;
        // Cache for handle() — safe because draw always runs before handle()
        self.state.last_height.set(height);

        let total = self.state.rows.len();
        let start = self.state.offset.min(total);
        let end = (start + height).min(total);

        // Which row (0-based within the visible window) holds the cursor?
        let cursor_row: Option<usize> =
            if self.focused && self.state.cursor >= start && self.state.cursor < end {
                Some(self.state.cursor - start)
            } else {
                None
            };

        let lines: Vec<Line<'static>> = self.state.rows[start..end]
            .iter()
            .enumerate()
            .map(|(row, course)| {
                let mut line = render_row(course, self.theme);
                if Some(row) == cursor_row {
                    line = line.patch_style(Style::default().add_modifier(Modifier::REVERSED));
                }
                line
            })
            .collect();

        // Split into text (fill) + 1-column scrollbar strip inside the
        // borders so the track height matches the visible content rows.
        let text_area = Rect { width: list_area.width.saturating_sub(1), ..list_area };
        let sb_area = Rect {
            x: list_area.right().saturating_sub(1),
            width: 1,
            ..list_area
        };

        Paragraph::new(lines).render(text_area, buf);

        if total > 0 {
            let mut sb_state = ScrollbarState::new(total)
                .position(start)
                .viewport_content_length(height);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                sb_area,
                buf,
                &mut sb_state,
            );
        }

        // Description strip for the cursor row
        if detail_height > 0 {
            let detail_area = Rect {
                y: inner.bottom() - detail_height,
                height: detail_height,
                ..inner
            };
            let text = self
                .state
                .selected()
                .map(|c| c.description.as_str())
                .unwrap_or("");
            Paragraph::new(text)
                .style(self.theme.description)
                .wrap(ratatui::widgets::Wrap { trim: true })
                .render(detail_area, buf);
        }
    }
}

// ---------------------------------------------------------------------------
// Row rendering
// ---------------------------------------------------------------------------

fn render_row(course: &CourseRow, theme: &Theme) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();

    spans.push(Span::styled(
        format!("{:<6}", course.subject),
        theme.subject_style(&course.subject),
    ));
    spans.push(Span::styled(
        format!("{:<6} ", course.number),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw(format!("{:<44}", truncate(&course.title, 42))));
    spans.push(Span::styled(
        format!("{:<20}", truncate(&course.college, 18)),
        Style::default().add_modifier(Modifier::DIM),
    ));
    spans.push(Span::styled(
        course.level.clone(),
        Style::default().add_modifier(Modifier::DIM),
    ));

    Line::from(spans)
}

/// Truncate to at most `max` characters with a `…` marker.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
