//! Terminal User Interface for the GRC advisor
//!
//! Two views over one session:
//! - Form: the questionnaire next to the generated plan
//! - Quiz: reviewed question cards with the rejection list
//!
//! Keyboard-driven with vim-style navigation; `?` opens the help overlay.

mod app;
mod events;
mod runner;
pub mod state;
pub mod views;

pub use app::App;
pub use events::{Event, EventHandler};
pub use runner::TuiRunner;
pub use state::{AppState, InteractionMode, View};

use std::io::{self, Stdout};
use std::sync::Arc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use eyre::Result;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::api::{AdvisoryApi, QuestionSet};

/// Terminal type alias
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI against the given advisory client
pub async fn run(client: Arc<dyn AdvisoryApi>) -> Result<()> {
    run_inner(client, None).await
}

/// Run the TUI opened on the quiz view with a preloaded question set
pub async fn run_with_quiz(client: Arc<dyn AdvisoryApi>, quiz: QuestionSet) -> Result<()> {
    run_inner(client, Some(quiz)).await
}

async fn run_inner(client: Arc<dyn AdvisoryApi>, quiz: Option<QuestionSet>) -> Result<()> {
    let terminal = init()?;

    // Use a guard to ensure terminal is restored even on early return/error
    struct TerminalGuard;
    impl Drop for TerminalGuard {
        fn drop(&mut self) {
            let _ = restore();
        }
    }
    let _guard = TerminalGuard;

    let mut runner = TuiRunner::new(terminal, client);
    if let Some(quiz) = quiz {
        let state = runner.app_mut().state_mut();
        state.quiz = Some(quiz);
        state.view = View::Quiz;
    }
    runner.run().await
}
