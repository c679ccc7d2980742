//! Verdict view: result panel for one assessment.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::domain::{Assessment, Verdict};
use crate::tui::styles::ScopeTheme;

/// Verdict screen state.
#[derive(Debug, Clone, Default)]
pub enum VerdictState {
    /// No evaluation has run yet
    #[default]
    Idle,
    /// Completed with a result
    Complete { assessment: Assessment },
    /// The scoring call failed
    Error { message: String },
}

/// Render the verdict screen.
pub fn render_verdict(f: &mut Frame, area: Rect, state: &VerdictState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(f, chunks[0]);
    match state {
        VerdictState::Idle => render_idle(f, chunks[1]),
        VerdictState::Complete { assessment } => render_result(f, chunks[1], assessment),
        VerdictState::Error { message } => render_error(f, chunks[1], message),
    }
    render_footer(f, chunks[2], state);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ScopeTheme::text()),
        Span::styled("Prediction Result", ScopeTheme::title()),
        Span::styled(" │ Single-shot evaluation", ScopeTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ScopeTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No evaluation yet",
            ScopeTheme::text_secondary(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Adjust the sliders and press [Enter] on the simulator",
            ScopeTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(ScopeTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_result(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let block = Block::default()
        .title(Span::styled(" Verdict ", ScopeTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ScopeTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Verdict banner
            Constraint::Length(4), // Confidence gauge
            Constraint::Length(2), // Probability + risk band
            Constraint::Min(0),    // Metadata
        ])
        .margin(1)
        .split(inner);

    let verdict = assessment.result.verdict;
    let verdict_style = ScopeTheme::verdict(verdict);
    let banner = match verdict {
        Verdict::Fraudulent => "HIGH RISK: likely FRAUDULENT",
        Verdict::Legitimate => "LOW RISK: appears LEGITIMATE",
    };

    let verdict_display = Paragraph::new(vec![
        Line::from(Span::styled(
            banner,
            verdict_style.add_modifier(ratatui::style::Modifier::BOLD),
        )),
        Line::from(Span::styled(
            verdict.description(),
            ScopeTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(verdict_display, chunks[0]);

    // Confidence in the predicted class, mirrored by the gauge.
    let gauge_title = match verdict {
        Verdict::Fraudulent => " Confidence Score (Fraud) ",
        Verdict::Legitimate => " Confidence Score (Legitimate) ",
    };
    let confidence_gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(gauge_title, ScopeTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(ScopeTheme::border()),
        )
        .gauge_style(verdict_style)
        .ratio(assessment.result.confidence.clamp(0.0, 1.0))
        .label(format!("{:.2}%", assessment.result.confidence * 100.0));
    f.render_widget(confidence_gauge, chunks[1]);

    let probability = Paragraph::new(Line::from(vec![
        Span::styled("Fraud probability: ", ScopeTheme::text_secondary()),
        Span::styled(
            format!("{:.4}", assessment.result.fraud_probability),
            ScopeTheme::text(),
        ),
        Span::styled("   Risk band: ", ScopeTheme::text_secondary()),
        Span::styled(
            assessment.risk_band.to_string(),
            ScopeTheme::risk_band(assessment.risk_band),
        ),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(probability, chunks[2]);

    let reference = assessment.id.get(..8).unwrap_or(&assessment.id);
    let metadata = Paragraph::new(Line::from(Span::styled(
        format!(
            "Evaluated at {} (ref {})",
            assessment.created_at.format("%H:%M:%S UTC"),
            reference
        ),
        ScopeTheme::text_muted(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(metadata, chunks[3]);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Evaluation failed", ScopeTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(message, ScopeTheme::text())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(ScopeTheme::danger()),
    );

    f.render_widget(content, area);
}

fn render_footer(f: &mut Frame, area: Rect, state: &VerdictState) {
    let content = match state {
        VerdictState::Complete { .. } => Line::from(vec![
            Span::styled("[Enter/Esc] ", ScopeTheme::key_hint()),
            Span::styled("Back to Simulator ", ScopeTheme::key_desc()),
            Span::styled("[N] ", ScopeTheme::key_hint()),
            Span::styled("Reset Sliders ", ScopeTheme::key_desc()),
            Span::styled("[Q] ", ScopeTheme::key_hint()),
            Span::styled("Quit", ScopeTheme::key_desc()),
        ]),
        VerdictState::Error { .. } => Line::from(vec![
            Span::styled("[Enter/Esc] ", ScopeTheme::key_hint()),
            Span::styled("Back to Simulator", ScopeTheme::key_desc()),
        ]),
        VerdictState::Idle => Line::from(vec![Span::styled(
            "Waiting for input...",
            ScopeTheme::text_muted(),
        )]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ScopeTheme::border()),
    );

    f.render_widget(footer, area);
}
