//! UI module: View components for the TUI.

pub mod simulator;
pub mod verdict;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::ScopeTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![Span::styled(
            "DISCLAIMER: Demo over an anonymized public dataset. Never enter real card data.",
            ScopeTheme::text_muted(),
        )]),
        Line::from(vec![Span::styled(
            "24 of the model's 30 features are zero-filled here; verdicts are illustrative, not validated.",
            ScopeTheme::text_muted(),
        )]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(ScopeTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
