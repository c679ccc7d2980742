//! Transaction simulator: slider input form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::domain::{SliderSpec, TransactionInput, Verdict, SLIDERS};
use crate::tui::styles::ScopeTheme;

/// One bounded slider and its current position.
#[derive(Debug, Clone)]
pub struct SliderState {
    pub spec: SliderSpec,
    pub value: f64,
}

impl SliderState {
    fn new(spec: SliderSpec) -> Self {
        Self {
            spec,
            value: spec.default,
        }
    }

    /// Move the slider by `steps` increments, clamping at the bounds.
    ///
    /// Values are snapped to the step grid so repeated nudges do not
    /// accumulate floating-point drift.
    pub fn nudge(&mut self, steps: i32) {
        let spec = self.spec;
        let grid = ((self.value - spec.min) / spec.step).round() + f64::from(steps);
        self.value = (spec.min + grid * spec.step).clamp(spec.min, spec.max);
    }

    /// Position within the slider range, for gauge rendering.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        ((self.value - self.spec.min) / (self.spec.max - self.spec.min)).clamp(0.0, 1.0)
    }
}

/// Simulator form state.
pub struct SimulatorState {
    pub sliders: Vec<SliderState>,
    pub selected: usize,
}

impl Default for SimulatorState {
    fn default() -> Self {
        Self {
            sliders: SLIDERS.iter().copied().map(SliderState::new).collect(),
            selected: 0,
        }
    }
}

impl SimulatorState {
    /// Move to the next slider
    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % self.sliders.len();
    }

    /// Move to the previous slider
    pub fn prev_field(&mut self) {
        if self.selected == 0 {
            self.selected = self.sliders.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    /// Nudge the selected slider by `steps` increments.
    pub fn nudge_selected(&mut self, steps: i32) {
        self.sliders[self.selected].nudge(steps);
    }

    /// Reset every slider to its default position.
    pub fn reset(&mut self) {
        for slider in &mut self.sliders {
            slider.value = slider.spec.default;
        }
    }

    /// Load the demo preset the model flags as likely fraudulent.
    pub fn load_fraud_sample(&mut self) {
        let sample = TransactionInput::fraud_sample().slider_values();
        for (slider, value) in self.sliders.iter_mut().zip(sample) {
            slider.value = value;
        }
    }

    /// Current slider positions as a transaction input.
    #[must_use]
    pub fn to_input(&self) -> TransactionInput {
        let mut values = [0.0; SLIDERS.len()];
        for (value, slider) in values.iter_mut().zip(&self.sliders) {
            *value = slider.value;
        }
        TransactionInput::from_slider_values(&values)
    }
}

/// Per-session tally shown under the sliders. In-memory only; it dies
/// with the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionSummary {
    pub evaluated: usize,
    pub fraudulent: usize,
    pub legitimate: usize,
}

impl SessionSummary {
    pub fn record(&mut self, verdict: Verdict) {
        self.evaluated += 1;
        match verdict {
            Verdict::Fraudulent => self.fraudulent += 1,
            Verdict::Legitimate => self.legitimate += 1,
        }
    }
}

/// Render the transaction simulator screen.
pub fn render_simulator(
    f: &mut Frame,
    area: Rect,
    state: &SimulatorState,
    session: &SessionSummary,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(0),     // Sliders
            Constraint::Length(4),  // Session summary
            Constraint::Length(3),  // Footer
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_sliders(f, chunks[1], state);
    render_session(f, chunks[2], session);
    render_footer(f, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ScopeTheme::text()),
        Span::styled("Fraudscope", ScopeTheme::title()),
        Span::styled(" │ ", ScopeTheme::text_muted()),
        Span::styled(
            "Simulate a card transaction and let the model judge it",
            ScopeTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ScopeTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_sliders(f: &mut Frame, area: Rect, state: &SimulatorState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = state.sliders.len() / 2;

    render_slider_column(
        f,
        columns[0],
        "Key Transaction Features",
        &state.sliders[..mid],
        0,
        state.selected,
    );
    render_slider_column(
        f,
        columns[1],
        "Other Influential Features",
        &state.sliders[mid..],
        mid,
        state.selected,
    );
}

fn render_slider_column(
    f: &mut Frame,
    area: Rect,
    title: &str,
    sliders: &[SliderState],
    offset: usize,
    selected: usize,
) {
    let constraints: Vec<Constraint> = std::iter::once(Constraint::Length(1))
        .chain(sliders.iter().map(|_| Constraint::Length(4)))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let subtitle = Paragraph::new(Line::from(Span::styled(title, ScopeTheme::subtitle())));
    f.render_widget(subtitle, chunks[0]);

    for (i, slider) in sliders.iter().enumerate() {
        render_slider(f, chunks[i + 1], slider, offset + i == selected);
    }
}

fn render_slider(f: &mut Frame, area: Rect, slider: &SliderState, is_selected: bool) {
    let (border_style, title_style) = if is_selected {
        (ScopeTheme::border_focused(), ScopeTheme::focused())
    } else {
        (ScopeTheme::border(), ScopeTheme::text_secondary())
    };

    let block = Block::default()
        .title(Span::styled(
            format!(" Feature {} ", slider.spec.name),
            title_style,
        ))
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let range = Paragraph::new(Line::from(Span::styled(
        format!(
            "range {} to {}  step {}",
            slider.spec.min, slider.spec.max, slider.spec.step
        ),
        ScopeTheme::text_muted(),
    )));
    f.render_widget(range, rows[0]);

    let gauge_style = if is_selected {
        ScopeTheme::focused()
    } else {
        ScopeTheme::text_secondary()
    };
    let gauge = Gauge::default()
        .gauge_style(gauge_style)
        .ratio(slider.ratio())
        .label(format!("{:.1}", slider.value));
    f.render_widget(gauge, rows[1]);
}

fn render_session(f: &mut Frame, area: Rect, session: &SessionSummary) {
    let block = Block::default()
        .title(Span::styled(" Session ", ScopeTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ScopeTheme::border());

    let lines = if session.evaluated == 0 {
        vec![Line::from(vec![Span::styled(
            "No evaluations yet. Hint: V14 at -8 and V12 at -3 is a likely fraudulent transaction ([S] loads it).",
            ScopeTheme::text_muted(),
        )])]
    } else {
        vec![
            Line::from(vec![
                Span::styled("Evaluated: ", ScopeTheme::text_secondary()),
                Span::styled(session.evaluated.to_string(), ScopeTheme::text()),
                Span::styled("  Fraudulent: ", ScopeTheme::text_secondary()),
                Span::styled(session.fraudulent.to_string(), ScopeTheme::danger()),
                Span::styled("  Legitimate: ", ScopeTheme::text_secondary()),
                Span::styled(session.legitimate.to_string(), ScopeTheme::success()),
            ]),
            Line::from(vec![Span::styled(
                "Tallies are kept in memory for this session only.",
                ScopeTheme::text_muted(),
            )]),
        ]
    };

    let p = Paragraph::new(lines).block(block);
    f.render_widget(p, area);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let content = Line::from(vec![
        Span::styled("[↑↓] ", ScopeTheme::key_hint()),
        Span::styled("Feature ", ScopeTheme::key_desc()),
        Span::styled("[←→] ", ScopeTheme::key_hint()),
        Span::styled("Adjust ", ScopeTheme::key_desc()),
        Span::styled("[PgUp/PgDn] ", ScopeTheme::key_hint()),
        Span::styled("Coarse ", ScopeTheme::key_desc()),
        Span::styled("[S] ", ScopeTheme::key_hint()),
        Span::styled("Fraud Sample ", ScopeTheme::key_desc()),
        Span::styled("[R] ", ScopeTheme::key_hint()),
        Span::styled("Reset ", ScopeTheme::key_desc()),
        Span::styled("[Enter] ", ScopeTheme::key_hint()),
        Span::styled("Evaluate ", ScopeTheme::key_desc()),
        Span::styled("[Q] ", ScopeTheme::key_hint()),
        Span::styled("Quit", ScopeTheme::key_desc()),
    ]);

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ScopeTheme::border()),
    );

    f.render_widget(footer, area);
}
