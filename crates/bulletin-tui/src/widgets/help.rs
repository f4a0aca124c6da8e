//! Help popup — centred floating overlay listing keybindings and commands.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

pub struct HelpPopup<'a> {
    _theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { _theme: theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(72, 26, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" bulletin — keybindings (? to close) ")
            .border_style(Style::default().add_modifier(Modifier::BOLD));

        let inner = block.inner(popup);
        block.render(popup, buf);

        const BINDINGS: &[(&str, &str)] = &[
            ("q  /  Ctrl+c", "Quit"),
            ("Tab", "Cycle focus: filters → courses → search"),
            ("/", "Focus the search bar"),
            ("Escape", "Return focus from the search bar"),
            ("↑ k  /  ↓ j", "Navigate filters or courses"),
            ("← h  /  → l", "Collapse / expand filter group"),
            ("Space / Enter", "Toggle filter value"),
            ("Enter (search bar)", "Add typed terms"),
            ("PageUp  /  Ctrl+u", "Scroll courses up"),
            ("PageDown / Ctrl+d", "Scroll courses down"),
            ("]  /  [", "Step the row cap up / down"),
            ("e", "Export current results to CSV"),
            (":", "Open the command bar"),
            ("", ""),
            (":add a, b", "Add terms  ·  :rm a  ·  :clear"),
            (":all / :any", "Require all terms / any term"),
            (":smart / :regex", "Phrase matching / raw patterns"),
            (":scope title|desc|both", "Where terms match"),
            (":range 3000 5999", "Course-number range"),
            (":limit 500", "Row cap (50/100/200/500/1000)"),
            (":export [path]", "Write results as CSV"),
            (":desc", "Toggle the description strip"),
            (":sql", "Show the query a SQL backend would run"),
            (":theme default|gruvbox", "Switch theme"),
        ];

        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:<24}", key),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
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
