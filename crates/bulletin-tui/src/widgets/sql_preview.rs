//! SQL preview popup — shows the parameterized query for the current search.
//!
//! Toggle with `:sql`; close with `:sql` or `Escape`. The preview renders
//! the exact SELECT a SQL-backed deployment would execute for the current
//! predicate, with the bound parameters listed under it — placeholders in
//! the text, values in the list, never interpolated.

use crate::theme::Theme;
use bulletin_core::sql::{SqlFragment, SqlValue};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};

pub struct SqlPreview<'a> {
    fragment: &'a SqlFragment,
    theme: &'a Theme,
}

impl<'a> SqlPreview<'a> {
    pub fn new(fragment: &'a SqlFragment, theme: &'a Theme) -> Self {
        Self { fragment, theme }
    }
}

impl Widget for SqlPreview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(
            area.width.saturating_sub(8).min(100),
            area.height.saturating_sub(6).min(20),
            area,
        );
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" SQL (read-only) ")
            .border_style(Style::default().add_modifier(Modifier::BOLD));

        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines: Vec<Line> = vec![Line::from(self.fragment.sql.as_str())];
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "params:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (idx, param) in self.fragment.params.iter().enumerate() {
            let rendered = match param {
                SqlValue::Text(text) => format!("  ?{}: {:?}", idx + 1, text),
                SqlValue::Int(n) => format!("  ?{}: {}", idx + 1, n),
            };
            lines.push(Line::from(Span::styled(rendered, self.theme.description)));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
