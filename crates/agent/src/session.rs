use std::sync::Arc;

use counsel_core::logging::{PrivacyConfig, redact_content};
use counsel_core::{APOLOGY, CLEARED_GREETING, HistoryBuffer, Message, Transcript};
use counsel_providers::{Provider, format_prompt};

/// What happened to a submitted question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The reply was appended and remembered for future prompts
    Answered(String),
    /// The apology was appended; prompt history is unchanged
    Failed,
    /// Blank input; nothing changed
    Ignored,
}

impl TurnOutcome {
    pub fn is_answered(&self) -> bool {
        matches!(self, Self::Answered(_))
    }
}

/// One counselling conversation.
///
/// Owns its transcript and prompt history so that both can only change
/// together: a successful turn updates both, a failed turn only the
/// transcript, and [`Session::clear`] resets both.
pub struct Session {
    provider: Arc<dyn Provider>,
    transcript: Transcript,
    history: HistoryBuffer,
    privacy: PrivacyConfig,
    turns: u64,
}

impl Session {
    /// Start a session holding only the welcome greeting
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            transcript: Transcript::new(),
            history: HistoryBuffer::new(),
            privacy: PrivacyConfig::default(),
            turns: 0,
        }
    }

    /// Set how question and reply text appear in logs
    pub fn with_privacy(mut self, privacy: PrivacyConfig) -> Self {
        self.privacy = privacy;
        self
    }

    /// Run one turn: record the question, ask the provider, record the
    /// reply or the apology.
    ///
    /// Provider failures never escape this method; they are logged and
    /// turned into [`TurnOutcome::Failed`].
    pub async fn submit(&mut self, input: &str) -> TurnOutcome {
        let question = input.trim();
        if question.is_empty() {
            return TurnOutcome::Ignored;
        }

        self.turns += 1;
        let turn = self.turns;
        self.transcript.append(Message::user(question));

        let instruction = format_prompt(&self.history.render(), question);
        tracing::info!(
            turn,
            provider = self.provider.name(),
            history_len = self.history.len(),
            "submitting question"
        );
        tracing::debug!(turn, question = %redact_content(question, &self.privacy), "question");

        match self.provider.complete(&instruction).await {
            Ok(answer) => {
                tracing::debug!(turn, answer = %redact_content(&answer, &self.privacy), "answer received");
                self.transcript.append(Message::assistant(answer.clone()));
                self.history.record(question, answer.clone());
                TurnOutcome::Answered(answer)
            }
            Err(err) => {
                tracing::error!(turn, error = %err, "completion failed");
                self.transcript.append(Message::assistant(APOLOGY));
                TurnOutcome::Failed
            }
        }
    }

    /// Reset the transcript to the post-clear greeting and forget all history
    pub fn clear(&mut self) {
        tracing::info!(messages = self.transcript.len(), exchanges = self.history.len(), "clearing session");
        self.transcript.reset(CLEARED_GREETING);
        self.history.clear();
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}
