use counsel_core::ProviderError;
use serde::{Deserialize, Serialize};

/// The role of a message sender on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }
}

/// Token usage information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

impl Usage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self { prompt_tokens, completion_tokens, total_tokens: prompt_tokens + completion_tokens }
    }
}

/// Body of a chat completions request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    pub fn builder(model: impl Into<String>) -> ChatRequestBuilder {
        ChatRequestBuilder { model: model.into(), ..Default::default() }
    }
}

#[derive(Default)]
pub struct ChatRequestBuilder {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl ChatRequestBuilder {
    pub fn add_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn build(self) -> ChatRequest {
        ChatRequest {
            model: self.model,
            messages: self.messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

/// Body of a successful chat completions response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Option<Vec<Choice>>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Parse a raw response body
    pub fn parse(body: &str) -> Result<Self, ProviderError> {
        serde_json::from_str(body).map_err(|e| ProviderError::MalformedResponse(format!("invalid JSON body: {}", e)))
    }

    /// Trimmed `choices[0].message.content`.
    ///
    /// Anything else, including content that is blank after trimming, is
    /// reported as a malformed response.
    pub fn answer(&self) -> Result<String, ProviderError> {
        let choice = self
            .choices
            .as_ref()
            .ok_or_else(|| ProviderError::MalformedResponse("missing `choices`".to_string()))?
            .first()
            .ok_or_else(|| ProviderError::MalformedResponse("empty `choices`".to_string()))?;

        let content = choice
            .message
            .as_ref()
            .and_then(|message| message.content.as_deref())
            .ok_or_else(|| ProviderError::MalformedResponse("missing `choices[0].message.content`".to_string()))?;

        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(ProviderError::MalformedResponse("blank completion content".to_string()));
        }

        Ok(trimmed.to_string())
    }
}
