/// State for the input composer
///
/// `cursor` counts characters, not bytes.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current input buffer
    pub buffer: String,
    /// Cursor position
    pub cursor: usize,
    /// Previously sent questions, oldest first
    pub message_history: Vec<String>,
    /// Current position in history (None = new message)
    pub history_index: Option<usize>,
    /// Temporary buffer for new message while navigating history
    pub temp_buffer: Option<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(cursor)
            .map(|(idx, _)| idx)
            .unwrap_or(self.buffer.len())
    }

    fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.buffer.insert(idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 && !self.buffer.is_empty() {
            self.cursor -= 1;
            let idx = self.byte_index(self.cursor);
            self.buffer.remove(idx);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let idx = self.byte_index(self.cursor);
            self.buffer.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn take(&mut self) -> String {
        let buffer = std::mem::take(&mut self.buffer);
        self.cursor = 0;
        self.reset_history_navigation();
        buffer
    }

    /// Split the buffer at the cursor for rendering
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.buffer.split_at(self.byte_index(self.cursor))
    }

    /// Add a message to history (typically called after sending a message)
    pub fn add_to_history(&mut self, message: String) {
        if let Some(last) = self.message_history.last()
            && last == &message
        {
            return;
        }
        self.message_history.push(message);
        self.reset_history_navigation();
    }

    /// Navigate up in history (older messages)
    pub fn navigate_up(&mut self) {
        if self.message_history.is_empty() {
            return;
        }

        if self.history_index.is_none() && !self.buffer.is_empty() {
            self.temp_buffer = Some(self.buffer.clone());
        }

        let new_index = match self.history_index {
            None => self.message_history.len().saturating_sub(1),
            Some(idx) => idx.saturating_sub(1),
        };

        if let Some(message) = self.message_history.get(new_index) {
            self.buffer = message.clone();
            self.cursor = self.char_len();
            self.history_index = Some(new_index);
        }
    }

    /// Navigate down in history (newer messages)
    pub fn navigate_down(&mut self) {
        let Some(idx) = self.history_index else {
            return;
        };

        if idx + 1 >= self.message_history.len() {
            self.buffer = self.temp_buffer.take().unwrap_or_default();
            self.history_index = None;
        } else if let Some(message) = self.message_history.get(idx + 1) {
            self.buffer = message.clone();
            self.history_index = Some(idx + 1);
        }
        self.cursor = self.char_len();
    }

    /// Reset history navigation state (called when user starts typing new message)
    pub fn reset_history_navigation(&mut self) {
        self.history_index = None;
        self.temp_buffer = None;
    }

    pub fn is_navigating_history(&self) -> bool {
        self.history_index.is_some()
    }
}
