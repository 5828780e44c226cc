pub mod adapter;
pub mod mock;
pub mod prompts;
pub mod types;

pub use adapter::{OpenRouterProvider, Provider, ProviderFactory, ProviderSource};
pub use mock::{MockProvider, MockResponse};
pub use prompts::{CAREER_COUNSELOR_TEMPLATE, PromptTemplate, format_prompt};
pub use types::{ChatMessage, ChatRequest, ChatResponse, Role, Usage};

pub use counsel_core::{Error, ProviderError, Result};
