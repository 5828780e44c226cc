//! Conversation state for one chat session.
//!
//! [`Transcript`] is the user-visible, ordered message log. [`HistoryBuffer`]
//! keeps only completed question/answer exchanges and renders them back into
//! prompt context. Both are plain owned values: a session owns one of each
//! and nothing is shared between sessions.

use serde::{Deserialize, Serialize};

/// Greeting that opens every new session
pub const WELCOME_GREETING: &str = "Hi! I'm your career counselor powered by DeepSeek. I can help with education plans, \
career paths, or skill development. What's your goal or question?";

/// Greeting left behind after the history is cleared
pub const CLEARED_GREETING: &str = "Chat history cleared! Ask me about your career or education goals.";

/// Shown in place of a reply when the completion service could not answer
pub const APOLOGY: &str =
    "Sorry, I couldn't process your request. Try rephrasing your question or check your API key.";

/// Who wrote a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::User => "user",
            Speaker::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single transcript entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Speaker,
    content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Speaker::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Speaker::Assistant, content: content.into() }
    }

    pub fn role(&self) -> Speaker {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Ordered, append-only message log seeded with an assistant greeting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Transcript holding only the welcome greeting
    pub fn new() -> Self {
        Self::seeded(WELCOME_GREETING)
    }

    /// Transcript holding only the given assistant greeting
    pub fn seeded(greeting: impl Into<String>) -> Self {
        Self { messages: vec![Message::assistant(greeting)] }
    }

    /// Add a message at the end
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// All messages in insertion order
    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    /// Replace every message with a single assistant greeting
    pub fn reset(&mut self, greeting: impl Into<String>) {
        self.messages.clear();
        self.messages.push(Message::assistant(greeting));
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// True while nothing but the seed greeting is present
    pub fn is_seed_only(&self) -> bool {
        self.messages.len() == 1 && self.messages[0].role() == Speaker::Assistant
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

/// One completed turn as remembered for prompt context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub input: String,
    pub output: String,
}

/// Completed exchanges, rendered back into a text block for the prompt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryBuffer {
    exchanges: Vec<Exchange>,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a completed exchange
    pub fn record(&mut self, input: impl Into<String>, output: impl Into<String>) {
        self.exchanges.push(Exchange { input: input.into(), output: output.into() });
    }

    /// Render every exchange in order as `Human:` / `AI:` lines.
    ///
    /// An empty buffer renders to the empty string.
    pub fn render(&self) -> String {
        self.exchanges
            .iter()
            .flat_map(|exchange| [format!("Human: {}", exchange.input), format!("AI: {}", exchange.output)])
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn clear(&mut self) {
        self.exchanges.clear();
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }
}
