mod key_action;

pub use key_action::KeyAction;

use crate::state::AppState;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Event handler for the TUI application
pub struct EventHandler;

impl EventHandler {
    /// Read a single event from the terminal
    ///
    /// Returns `Some(event)` if an event is available, `None` on timeout or error.
    /// Terminal errors are logged but not propagated.
    pub fn read() -> Option<Event> {
        match crossterm::event::poll(std::time::Duration::from_millis(100)) {
            Ok(true) => match crossterm::event::read() {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!(error = %e, "terminal read failed");
                    None
                }
            },
            Ok(false) => None,
            Err(e) => {
                tracing::warn!(error = %e, "event poll failed");
                None
            }
        }
    }

    /// Handle any terminal event
    pub fn handle_event(event: &Event, state: &mut AppState) -> Option<KeyAction> {
        match event {
            Event::Key(key_event) => Self::handle_key_event(*key_event, state),
            _ => None,
        }
    }

    /// Apply a key press to the input state, returning the action it triggers
    pub fn handle_key_event(event: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
        if event.kind != KeyEventKind::Press {
            return None;
        }

        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        let alt = event.modifiers.contains(KeyModifiers::ALT);

        match event.code {
            KeyCode::Esc => return Some(KeyAction::Exit),
            KeyCode::Char('c') if ctrl => return Some(KeyAction::Exit),
            KeyCode::Char('l') if ctrl => return Some(KeyAction::ClearHistory),
            KeyCode::Char('b') if ctrl => return Some(KeyAction::ToggleSidebar),
            KeyCode::PageUp => return Some(KeyAction::ScrollUp),
            KeyCode::PageDown => return Some(KeyAction::ScrollDown),
            _ => {}
        }

        if state.is_generating() {
            return None;
        }

        match event.code {
            KeyCode::Enter => {
                if state.input.buffer.trim().is_empty() {
                    return None;
                }
                let message = state.input.take();
                state.input.add_to_history(message.clone());
                return Some(KeyAction::SendMessage { message });
            }
            KeyCode::Backspace => state.input.backspace(),
            KeyCode::Delete => state.input.delete(),
            KeyCode::Left => state.input.move_left(),
            KeyCode::Right => state.input.move_right(),
            KeyCode::Home => state.input.move_home(),
            KeyCode::End => state.input.move_end(),
            KeyCode::Up => state.input.navigate_up(),
            KeyCode::Down => state.input.navigate_down(),
            KeyCode::Char(c) if !ctrl && !alt => {
                state.input.reset_history_navigation();
                state.input.insert_char(c);
            }
            _ => {}
        }

        None
    }
}
