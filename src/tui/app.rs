//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Service integration

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::FileReportSink;
use crate::application::{results_page, AssessmentService};
use crate::config::AppConfig;
use crate::domain::AlertLevel;
use crate::AdiposcopeError;

use super::ui::{
    form::{render_assessment_form, AssessmentFormState},
    render_disclaimer,
    results::{render_results, ResultsState},
};

/// Current screen/view in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Form,
    Results,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Assessment service
    service: AssessmentService<FileReportSink>,

    /// Form state
    form_state: AssessmentFormState,

    /// Results of the last evaluation
    results_state: ResultsState,
}

impl App {
    /// Create a new application exporting into the configured directory.
    ///
    /// # Errors
    /// Returns error if services cannot be initialized.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let sink = Arc::new(FileReportSink::new(&config.export_dir));
        tracing::debug!("Report export directory: {:?}", sink.dir());
        Ok(Self::with_dependencies(AssessmentService::new(sink)))
    }

    /// Create application with an injected service (Composition Root pattern).
    #[must_use]
    pub fn with_dependencies(service: AssessmentService<FileReportSink>) -> Self {
        Self {
            screen: Screen::Form,
            should_quit: false,
            service,
            form_state: AssessmentFormState::default(),
            results_state: ResultsState::default(),
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        // Nothing typed into the form outlives the session
        self.form_state.clear_sensitive();

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(f.area());

                match self.screen {
                    Screen::Form => render_assessment_form(f, chunks[0], &self.form_state),
                    Screen::Results => render_results(f, chunks[0], &self.results_state),
                }

                render_disclaimer(f, chunks[1]);
            })?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
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
            Screen::Form => self.handle_form_key(key, modifiers),
            Screen::Results => self.handle_results_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.form_state.load_sample_data();
            }
            KeyCode::Esc => {
                self.form_state.clear_sensitive();
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.form_state.prev_row();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form_state.next_row();
            }
            KeyCode::Char(c) => {
                self.form_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.form_state.delete_char();
            }
            KeyCode::Delete => {
                self.form_state.clear_field();
            }
            KeyCode::Enter => {
                self.submit_form();
            }
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => self.results_state.scroll_up(),
            KeyCode::Down => self.results_state.scroll_down(),
            KeyCode::PageDown => self.results_state.page_preview(true),
            KeyCode::PageUp => self.results_state.page_preview(false),
            KeyCode::Char('e') | KeyCode::Char('E') => self.export_report(),
            KeyCode::Esc => {
                self.screen = Screen::Form;
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.form_state.clear_sensitive();
                self.results_state = ResultsState::default();
                self.screen = Screen::Form;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let request = match self.form_state.to_request() {
            Ok(request) => request,
            Err(e) => {
                self.form_state.error_message = Some(e);
                return;
            }
        };

        match self.service.assess(request) {
            Ok(assessment) => {
                let report = self.service.report(&assessment);
                let page = results_page(&assessment, &report);
                self.results_state = ResultsState::new(page, report);
                self.screen = Screen::Results;
            }
            Err(AdiposcopeError::Validation(msg)) => {
                self.form_state.error_message = Some(msg);
            }
            Err(e) => {
                self.form_state.error_message = Some(e.to_string());
            }
        }
    }

    fn export_report(&mut self) {
        let status = match self.service.export_report(&self.results_state.report) {
            Ok(path) => (
                AlertLevel::Success,
                format!("Report saved to {}", path.display()),
            ),
            Err(e) => (AlertLevel::Error, e.to_string()),
        };
        self.results_state.status = Some(status);
    }
}
