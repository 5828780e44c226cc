use crate::Provider;
use counsel_core::{Error, ProviderError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock response types for deterministic runs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MockResponse {
    /// Successful reply (trimmed like a real one)
    Text { content: String },
    /// Failed request; with `status` it behaves like a non-success HTTP reply
    Error {
        message: String,
        #[serde(default)]
        status: Option<u16>,
    },
}

/// Mock configuration from TOML file
#[derive(Debug, Deserialize)]
struct MockConfig {
    responses: Vec<MockResponse>,
}

/// Provider answering from a fixed script, without network access
pub struct MockProvider {
    responses: Vec<MockResponse>,
    current: AtomicUsize,
    received: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self { responses, current: AtomicUsize::new(0), received: Mutex::new(Vec::new()) }
    }

    /// Load the script from a TOML file of `[[responses]]` tables
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: MockConfig = toml::from_str(content)
            .map_err(|e| Error::Parse(format!("failed to parse mock responses: {}", e)))?;
        tracing::debug!(count = config.responses.len(), "loaded mock responses");
        Ok(Self::new(config.responses))
    }

    /// Instructions received so far, oldest first
    pub fn received(&self) -> Vec<String> {
        self.received.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Next scripted response; running past the end is an error, never a reply
    fn get_next_response(&self) -> Result<MockResponse> {
        let index = self.current.fetch_add(1, Ordering::SeqCst);
        self.responses.get(index).cloned().ok_or_else(|| {
            ProviderError::MalformedResponse(format!(
                "mock script exhausted (requested: {}, available: {})",
                index + 1,
                self.responses.len()
            ))
            .into()
        })
    }
}

#[async_trait::async_trait]
impl Provider for MockProvider {
    async fn complete(&self, instruction: &str) -> Result<String> {
        if let Ok(mut received) = self.received.lock() {
            received.push(instruction.to_string());
        }

        match self.get_next_response()? {
            MockResponse::Text { content } => {
                let trimmed = content.trim();
                if trimmed.is_empty() {
                    return Err(ProviderError::MalformedResponse("blank completion content".to_string()).into());
                }
                Ok(trimmed.to_string())
            }
            MockResponse::Error { message, status: Some(status) } => {
                Err(ProviderError::Status { status, body: message }.into())
            }
            MockResponse::Error { message, status: None } => Err(ProviderError::Transport(message).into()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
