//! Application state and event handling

pub mod input;
pub mod state;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::rngs::ThreadRng;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config::Config;
use crate::session::{Session, SystemClock};
use crate::store::FileBackend;
use crate::ui;
use state::AppState;

/// Session type used by the terminal front-end
pub type PracticeSession = Session<FileBackend, SystemClock, ThreadRng>;

/// How often the loop wakes to expire the undo window
const TICK: Duration = Duration::from_millis(100);

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    /// Current application state
    state: AppState,

    /// The learner's practice session
    session: PracticeSession,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config, session: PracticeSession) -> Result<Self> {
        let terminal = Self::setup_terminal()?;

        Ok(Self { config, state: AppState::default(), session, terminal })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        tracing::info!(profile = %self.session.profile(), "Practice started");

        loop {
            // Draw UI
            self.terminal.draw(|frame| {
                ui::draw(frame, &self.state, &self.session, &self.config);
            })?;

            // Handle events
            if event::poll(TICK)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        let action = input::key_with_modifier_to_action(key.code, key.modifiers);
                        if let Some(action) = action {
                            if self.state.handle_action(action, &mut self.session, &self.config) {
                                break;
                            }
                        }
                    }
                }
            }

            if self.session.expire_undo() {
                tracing::debug!("Undo window closed");
            }
        }

        tracing::info!(profile = %self.session.profile(), "Practice ended");
        self.restore_terminal()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}
