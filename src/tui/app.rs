//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Synchronous scoring calls against the loaded estimator

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::linear::LinearModel;
use crate::application::AssessmentService;
use crate::domain::FEATURE_COUNT;

use super::ui::{
    render_disclaimer,
    simulator::{render_simulator, SessionSummary, SimulatorState},
    verdict::{render_verdict, VerdictState},
};

/// Current screen/view in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Simulator,
    Verdict,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Scoring service over the loaded estimator
    service: AssessmentService<LinearModel>,

    /// Simulator form state
    simulator: SimulatorState,

    /// Verdict screen state
    verdict: VerdictState,

    /// Per-session tally
    session: SessionSummary,
}

impl App {
    /// Create the application, loading the estimator from the configured
    /// path.
    ///
    /// The model is deserialized exactly once here and shared read-only
    /// for the rest of the process.
    ///
    /// # Errors
    /// Returns error if the model artifact is missing or invalid. There
    /// is no fallback model and no retry.
    pub fn new() -> Result<Self> {
        let model_path = std::env::var("FRAUDSCOPE_MODEL_PATH")
            .unwrap_or_else(|_| "models/fraud_model.json".to_string());
        let model_path = std::path::Path::new(&model_path);

        if !model_path.exists() {
            return Err(anyhow!(
                "Model artifact not found at {:?}. Set FRAUDSCOPE_MODEL_PATH to a trained model export.",
                model_path
            ));
        }

        // Refuse to start without a loadable model.
        let model = LinearModel::load(model_path)
            .map_err(|e| anyhow!("Failed to load model from {:?}: {e}", model_path))?;

        let service = AssessmentService::new(Arc::new(model));
        Self::with_service(service)
    }

    /// Create the application around a pre-built service (Composition
    /// Root pattern).
    ///
    /// This allows `main.rs` or tests to construct the adapter externally.
    ///
    /// # Errors
    /// Returns error if the estimator's arity does not match the
    /// simulator's feature vector.
    pub fn with_service(service: AssessmentService<LinearModel>) -> Result<Self> {
        if service.feature_count() != FEATURE_COUNT {
            return Err(anyhow!(
                "Model expects {} features but the simulator builds {FEATURE_COUNT}-element vectors",
                service.feature_count()
            ));
        }

        Ok(Self {
            screen: Screen::Simulator,
            should_quit: false,
            service,
            simulator: SimulatorState::default(),
            verdict: VerdictState::default(),
            session: SessionSummary::default(),
        })
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            // Draw current screen
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.screen {
                    Screen::Simulator => {
                        render_simulator(f, content_area, &self.simulator, &self.session);
                    }
                    Screen::Verdict => render_verdict(f, content_area, &self.verdict),
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Simulator => self.handle_simulator_key(key),
            Screen::Verdict => self.handle_verdict_key(key),
        }
    }

    fn handle_simulator_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::BackTab => {
                self.simulator.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.simulator.next_field();
            }
            KeyCode::Left => {
                self.simulator.nudge_selected(-1);
            }
            KeyCode::Right => {
                self.simulator.nudge_selected(1);
            }
            KeyCode::PageDown => {
                self.simulator.nudge_selected(-10);
            }
            KeyCode::PageUp => {
                self.simulator.nudge_selected(10);
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.simulator.load_fraud_sample();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.simulator.reset();
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Enter => {
                self.evaluate();
            }
            _ => {}
        }
    }

    /// Run one synchronous scoring call and show the verdict screen.
    fn evaluate(&mut self) {
        match self.service.assess(self.simulator.to_input()) {
            Ok(assessment) => {
                self.session.record(assessment.result.verdict);
                self.verdict = VerdictState::Complete { assessment };
            }
            Err(e) => {
                tracing::error!("Assessment failed: {e}");
                self.verdict = VerdictState::Error {
                    message: e.to_string(),
                };
            }
        }
        self.screen = Screen::Verdict;
    }

    fn handle_verdict_key(&mut self, key: KeyCode) {
        match &self.verdict {
            VerdictState::Complete { .. } => match key {
                KeyCode::Enter | KeyCode::Esc => {
                    self.screen = Screen::Simulator;
                }
                KeyCode::Char('n') | KeyCode::Char('N') => {
                    self.simulator.reset();
                    self.screen = Screen::Simulator;
                }
                KeyCode::Char('q') | KeyCode::Char('Q') => {
                    self.should_quit = true;
                }
                _ => {}
            },
            VerdictState::Error { .. } | VerdictState::Idle => match key {
                KeyCode::Enter | KeyCode::Esc => {
                    self.screen = Screen::Simulator;
                }
                _ => {}
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Verdict;
    use std::path::Path;

    fn create_test_app() -> App {
        let model =
            LinearModel::load(Path::new("models/fraud_model.json")).expect("Model should load");
        let service = AssessmentService::new(Arc::new(model));
        App::with_service(service).expect("App should build")
    }

    #[test]
    fn test_evaluate_switches_to_verdict_screen() {
        let mut app = create_test_app();
        assert_eq!(app.screen, Screen::Simulator);

        app.handle_simulator_key(KeyCode::Enter);
        assert_eq!(app.screen, Screen::Verdict);
        assert!(matches!(app.verdict, VerdictState::Complete { .. }));
        assert_eq!(app.session.evaluated, 1);
    }

    #[test]
    fn test_sample_preset_scores_fraudulent() {
        let mut app = create_test_app();
        app.handle_simulator_key(KeyCode::Char('s'));
        app.handle_simulator_key(KeyCode::Enter);

        match &app.verdict {
            VerdictState::Complete { assessment } => {
                assert_eq!(assessment.result.verdict, Verdict::Fraudulent);
            }
            other => panic!("expected completed verdict, got {other:?}"),
        }
        assert_eq!(app.session.fraudulent, 1);
    }

    #[test]
    fn test_verdict_screen_returns_to_simulator() {
        let mut app = create_test_app();
        app.handle_simulator_key(KeyCode::Enter);
        assert_eq!(app.screen, Screen::Verdict);

        app.handle_verdict_key(KeyCode::Esc);
        assert_eq!(app.screen, Screen::Simulator);
    }

    #[test]
    fn test_repeated_evaluations_accumulate_tally() {
        let mut app = create_test_app();

        app.handle_simulator_key(KeyCode::Enter); // defaults: legitimate
        app.handle_verdict_key(KeyCode::Esc);
        app.handle_simulator_key(KeyCode::Char('s'));
        app.handle_simulator_key(KeyCode::Enter); // sample: fraudulent

        assert_eq!(app.session.evaluated, 2);
        assert_eq!(app.session.legitimate, 1);
        assert_eq!(app.session.fraudulent, 1);
    }
}
