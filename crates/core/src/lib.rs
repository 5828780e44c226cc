pub mod config;
pub mod conversation;
pub mod error;
pub mod logging;

pub use config::{
    API_KEY_VAR, CREDENTIAL_REMEDIATION, CompletionConfig, Config, Credentials, DEFAULT_SITE_NAME, DEFAULT_SITE_URL,
    SITE_NAME_VAR, SITE_URL_VAR, load_dotenv,
};
pub use conversation::{
    APOLOGY, CLEARED_GREETING, Exchange, HistoryBuffer, Message, Speaker, Transcript, WELCOME_GREETING,
};
pub use error::{ConfigError, Error, ProviderError, Result};
