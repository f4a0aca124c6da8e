//! Status bar widget — the 1-line strip at the top of the screen.
//!
//! Shows the catalog size, the current match count, and the most recent
//! status or error message. Keybinding hints are right-aligned in the
//! same row.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// A transient message shown in the status bar until the next interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

pub struct StatusBar<'a> {
    catalog_len: usize,
    result_len: usize,
    message: Option<&'a StatusMessage>,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(
        catalog_len: usize,
        result_len: usize,
        message: Option<&'a StatusMessage>,
        theme: &'a Theme,
    ) -> Self {
        Self { catalog_len, result_len, message, theme }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(" bulletin ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(
                "— {} of {} courses ",
                self.result_len, self.catalog_len
            )),
        ];

        match self.message {
            Some(StatusMessage::Info(text)) => {
                spans.push(Span::styled(format!(" {text} "), self.theme.status_message));
            }
            Some(StatusMessage::Error(text)) => {
                spans.push(Span::styled(format!(" {text} "), self.theme.status_error));
            }
            None => {}
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        // Keybinding hints at the right edge
        let hint = " e:export  ::cmd  ?:help  q:quit ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}
