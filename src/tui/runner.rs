//! TUI Runner - main loop that owns the terminal and the advisory client
//!
//! The TuiRunner is responsible for:
//! - Initializing and restoring the terminal
//! - Dispatching events to App for handling
//! - Spawning at most one advisory request at a time and feeding its
//!   outcome back into the session reducer
//! - Rendering at ~30 FPS

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use eyre::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::{AdvisoryApi, AdvisoryPlan, RequestError};
use crate::session::SessionEvent;

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views;

/// Outcome of one advisory request, sent back from the spawned task
type SubmitOutcome = Result<AdvisoryPlan, RequestError>;

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    /// Application state
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Advisory service client
    client: Arc<dyn AdvisoryApi>,
    /// Event handler
    event_handler: EventHandler,
    /// In-flight advisory request, if any
    inflight: Option<JoinHandle<()>>,
    /// Outcome channel; capacity one because submissions never overlap
    outcome_tx: mpsc::Sender<SubmitOutcome>,
    outcome_rx: mpsc::Receiver<SubmitOutcome>,
}

impl TuiRunner {
    /// Create a new TuiRunner
    pub fn new(terminal: Tui, client: Arc<dyn AdvisoryApi>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel(1);
        Self {
            app: App::new(),
            terminal,
            client,
            event_handler: EventHandler::new(Duration::from_millis(33)), // ~30 FPS
            inflight: None,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Get mutable access to the app (used to preload a question set)
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        loop {
            // Draw the UI
            self.terminal.draw(|frame| views::render(self.app.state(), frame))?;

            // Handle events
            match self.event_handler.next().await? {
                Event::Tick => {
                    self.handle_tick();
                }
                Event::Key(key_event) => {
                    if self.app.handle_key(key_event) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
            }

            // Check if we should quit
            if self.app.state().should_quit {
                break;
            }
        }

        // A quit abandons the in-flight request
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }

        Ok(())
    }

    /// Handle tick event - collect outcomes and start pending submissions
    fn handle_tick(&mut self) {
        if let Ok(outcome) = self.outcome_rx.try_recv() {
            self.inflight = None;
            match outcome {
                Ok(plan) => {
                    debug!("Advisory request succeeded");
                    self.app.state_mut().apply(SessionEvent::SubmitSucceeded(plan));
                }
                Err(e) => {
                    warn!("Advisory request failed: {}", e);
                    self.app.state_mut().apply(SessionEvent::SubmitFailed(e.to_string()));
                }
            }
        }

        if self.app.state().pending_submit {
            self.app.state_mut().pending_submit = false;
            if !self.app.state().session.loading {
                self.start_submission();
            }
        }
    }

    /// Spawn the advisory request for the current form
    fn start_submission(&mut self) {
        let request = self.app.state().session.form.to_request();
        debug!(sector = %request.sector, "Submitting questionnaire");

        self.app.state_mut().apply(SessionEvent::SubmitStarted);
        self.app.state_mut().last_submitted = Some(Local::now());

        let client = Arc::clone(&self.client);
        let tx = self.outcome_tx.clone();
        self.inflight = Some(tokio::spawn(async move {
            let outcome = client.advise(request).await;
            // The receiver only disappears on quit
            let _ = tx.send(outcome).await;
        }));
    }
}
