mod event_loop;
mod rendering;

use crate::event_handler::{EventHandler, KeyAction};
use crate::state::AppState;
use counsel_agent::{Session, TurnOutcome};
use crossterm::event::Event;
use ratatui::Frame;
use std::io::Result;

/// Main TUI application
///
/// Owns the chat session; the UI never keeps its own copy of the messages.
pub struct App {
    session: Session,
    state: AppState,
}

impl App {
    pub fn new(session: Session, model: impl Into<String>) -> Self {
        Self { session, state: AppState::new(model) }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn should_exit(&self) -> bool {
        self.state.should_exit
    }

    /// Run the TUI until the user exits
    pub async fn run(&mut self) -> Result<()> {
        event_loop::run(self).await
    }

    /// Apply a terminal event; local actions take effect immediately
    ///
    /// `SendMessage` is returned to the caller, which starts the turn with
    /// [`App::begin_turn`] and finishes it with [`App::complete_turn`].
    pub fn handle_event(&mut self, event: &Event) -> Option<KeyAction> {
        let action = EventHandler::handle_event(event, &mut self.state)?;
        match &action {
            KeyAction::ClearHistory => {
                if !self.state.is_generating() {
                    self.session.clear();
                    self.state.scroll_back = 0;
                }
            }
            KeyAction::ScrollUp => self.state.scroll_up(),
            KeyAction::ScrollDown => self.state.scroll_down(),
            KeyAction::ToggleSidebar => self.state.toggle_sidebar(),
            KeyAction::Exit => self.state.should_exit = true,
            KeyAction::SendMessage { .. } => {}
        }
        Some(action)
    }

    /// Mark a question as in flight so the next draw shows it
    pub fn begin_turn(&mut self, message: String) {
        self.state.start_generation(message);
    }

    /// Await the reply for the in-flight question
    pub async fn complete_turn(&mut self) -> Option<TurnOutcome> {
        let question = self.state.pending_question()?.to_string();
        let outcome = self.session.submit(&question).await;
        self.state.stop_generation();
        Some(outcome)
    }

    /// Draw the whole UI into a frame
    pub fn render(&self, frame: &mut Frame<'_>) {
        rendering::render(self, frame);
    }
}
