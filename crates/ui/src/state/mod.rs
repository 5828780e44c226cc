mod input;

pub use input::InputState;

use std::cell::Cell;

/// Lines moved by one PageUp/PageDown
pub const SCROLL_STEP: u16 = 5;

/// UI-only state; conversation data lives in the session
#[derive(Debug, Clone)]
pub struct AppState {
    pub input: InputState,
    /// Lines scrolled back from the newest message (0 follows the tail)
    pub scroll_back: u16,
    /// Largest useful `scroll_back`, refreshed on every draw
    scroll_limit: Cell<u16>,
    pub sidebar_visible: bool,
    /// Model label shown in the header
    pub model: String,
    /// Question whose reply is being awaited
    pending_question: Option<String>,
    pub should_exit: bool,
}

impl AppState {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            input: InputState::new(),
            scroll_back: 0,
            scroll_limit: Cell::new(u16::MAX),
            sidebar_visible: true,
            model: model.into(),
            pending_question: None,
            should_exit: false,
        }
    }

    pub fn is_generating(&self) -> bool {
        self.pending_question.is_some()
    }

    pub fn pending_question(&self) -> Option<&str> {
        self.pending_question.as_deref()
    }

    pub fn start_generation(&mut self, question: String) {
        self.pending_question = Some(question);
        self.scroll_back = 0;
    }

    pub fn stop_generation(&mut self) -> Option<String> {
        self.pending_question.take()
    }

    /// Record how far back the transcript can scroll at its drawn size
    pub fn set_scroll_limit(&self, limit: u16) {
        self.scroll_limit.set(limit);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_back = self.scroll_back.saturating_add(SCROLL_STEP).min(self.scroll_limit.get());
    }

    pub fn scroll_down(&mut self) {
        self.scroll_back = self.scroll_back.min(self.scroll_limit.get()).saturating_sub(SCROLL_STEP);
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_visible = !self.sidebar_visible;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_state() {
        let mut state = AppState::new("model");
        assert!(!state.is_generating());

        state.scroll_back = 10;
        state.start_generation("Skills?".to_string());
        assert!(state.is_generating());
        assert_eq!(state.pending_question(), Some("Skills?"));
        assert_eq!(state.scroll_back, 0);

        assert_eq!(state.stop_generation(), Some("Skills?".to_string()));
        assert!(!state.is_generating());
    }

    #[test]
    fn test_scroll_saturates_at_tail() {
        let mut state = AppState::default();
        state.scroll_down();
        assert_eq!(state.scroll_back, 0);

        state.scroll_up();
        state.scroll_up();
        assert_eq!(state.scroll_back, 2 * SCROLL_STEP);
        state.scroll_down();
        assert_eq!(state.scroll_back, SCROLL_STEP);
    }

    #[test]
    fn test_scroll_stops_at_limit() {
        let mut state = AppState::default();
        state.set_scroll_limit(7);

        for _ in 0..10 {
            state.scroll_up();
        }
        assert_eq!(state.scroll_back, 7);

        state.scroll_down();
        assert_eq!(state.scroll_back, 2);
    }

    #[test]
    fn test_scroll_down_after_limit_shrinks() {
        let mut state = AppState::default();
        state.scroll_up();
        state.scroll_up();
        assert_eq!(state.scroll_back, 2 * SCROLL_STEP);

        state.set_scroll_limit(3);
        state.scroll_down();
        assert_eq!(state.scroll_back, 0);
    }

    #[test]
    fn test_toggle_sidebar() {
        let mut state = AppState::default();
        assert!(state.sidebar_visible);
        state.toggle_sidebar();
        assert!(!state.sidebar_visible);
    }
}
