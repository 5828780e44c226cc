use reqwest::Client as HttpClient;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::mock::MockProvider;
use crate::types::*;
use counsel_core::{CompletionConfig, Credentials, Error, ProviderError, Result};

/// Upper bound on how much of an error body is kept in the error value
const ERROR_BODY_LIMIT: usize = 500;

/// A remote text-completion backend
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    /// Send one instruction and return the trimmed reply.
    ///
    /// Fails with [`Error::Provider`] on transport failure, timeout,
    /// non-success status or an unexpected body. Never retries.
    async fn complete(&self, instruction: &str) -> Result<String>;

    /// Short label used in logs and status output
    fn name(&self) -> &str;
}

/// OpenRouter chat completions provider
pub struct OpenRouterProvider {
    client: HttpClient,
    credentials: Credentials,
    options: CompletionConfig,
}

impl OpenRouterProvider {
    pub fn new(credentials: Credentials, options: CompletionConfig) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .build()
            .map_err(|e| Error::Other(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, credentials, options })
    }

    pub fn options(&self) -> &CompletionConfig {
        &self.options
    }

    /// Wrap the instruction as the single system message of a request
    fn to_request(&self, instruction: &str) -> ChatRequest {
        ChatRequest::builder(self.options.model.clone())
            .add_message(ChatMessage::system(instruction))
            .temperature(self.options.temperature)
            .max_tokens(self.options.max_tokens)
            .build()
    }

    fn map_transport_error(&self, err: &reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.options.timeout_secs)
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

#[async_trait::async_trait]
impl Provider for OpenRouterProvider {
    async fn complete(&self, instruction: &str) -> Result<String> {
        let request = self.to_request(instruction);

        tracing::debug!(
            model = %request.model,
            url = %self.options.base_url,
            prompt_chars = instruction.len(),
            "sending completion request"
        );

        let response = self
            .client
            .post(&self.options.base_url)
            .header("Authorization", format!("Bearer {}", self.credentials.api_key))
            .header("HTTP-Referer", &self.credentials.site_url)
            .header("X-Title", &self.credentials.site_name)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_transport_error(&e))?;

        if !status.is_success() {
            let body: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            return Err(ProviderError::Status { status: status.as_u16(), body }.into());
        }

        let parsed = ChatResponse::parse(&body)?;
        if let Some(usage) = &parsed.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion usage"
            );
        }

        Ok(parsed.answer()?)
    }

    fn name(&self) -> &str {
        "openrouter"
    }
}

/// Where replies come from
#[derive(Debug, Clone)]
pub enum ProviderSource {
    /// The live completion service
    OpenRouter(Credentials),
    /// Scripted replies loaded from a TOML file
    Mock(PathBuf),
}

/// Factory to create providers from config
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create(source: ProviderSource, options: &CompletionConfig) -> Result<Arc<dyn Provider>> {
        match source {
            ProviderSource::OpenRouter(credentials) => {
                Ok(Arc::new(OpenRouterProvider::new(credentials, options.clone())?))
            }
            ProviderSource::Mock(path) => Ok(Arc::new(MockProvider::from_file(&path)?)),
        }
    }
}
