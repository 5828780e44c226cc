use thiserror::Error;

/// Result type alias for counsel-core
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the Counsel chat client
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error for file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Completion service errors
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Parse/serialization errors
    #[error("parse error: {0}")]
    Parse(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Configuration-specific errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required credential is not set in the environment
    #[error("missing credential: {0} is not set")]
    MissingCredential(String),

    /// A setting holds a value outside its accepted range
    #[error("invalid setting: {0}")]
    Invalid(String),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlParse(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::TomlParse(err.to_string())
    }
}

/// Failures of a single completion request.
///
/// Every variant means "no answer"; callers never receive partial content.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The request could not be sent or the connection broke
    #[error("transport failure: {0}")]
    Transport(String),

    /// No response arrived within the configured wait limit
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The service answered with a non-success status
    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The body did not carry `choices[0].message.content`
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// HTTP status code, when the service answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let io_err: Error = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"));
        assert_eq!(io_err.to_string(), "I/O error: file not found");

        let parse_err: Error = Error::Parse("invalid JSON".to_string());
        assert_eq!(parse_err.to_string(), "parse error: invalid JSON");

        let other_err: Error = Error::Other("something went wrong".to_string());
        assert_eq!(other_err.to_string(), "something went wrong");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingCredential("OPENROUTER_API_KEY".to_string());
        assert_eq!(err.to_string(), "missing credential: OPENROUTER_API_KEY is not set");

        let err = ConfigError::Invalid("temperature must be within 0..=2".to_string());
        assert_eq!(err.to_string(), "invalid setting: temperature must be within 0..=2");

        let err = ConfigError::TomlParse("parse error".to_string());
        assert_eq!(err.to_string(), "TOML parse error: parse error");
    }

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::Status { status: 500, body: "boom".to_string() };
        assert_eq!(err.to_string(), "completion service returned 500: boom");
        assert_eq!(err.status(), Some(500));

        let err = ProviderError::Timeout(30);
        assert_eq!(err.to_string(), "request timed out after 30s");
        assert_eq!(err.status(), None);

        let err = ProviderError::MalformedResponse("missing choices".to_string());
        assert_eq!(err.to_string(), "malformed response: missing choices");
    }

    #[test]
    fn test_error_from_nested() {
        let error: Error = ConfigError::MissingCredential("KEY".to_string()).into();
        assert_eq!(error.to_string(), "configuration error: missing credential: KEY is not set");

        let error: Error = ProviderError::Transport("connection refused".to_string()).into();
        assert_eq!(error.to_string(), "provider error: transport failure: connection refused");
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: Error = io_err.into();
        assert_eq!(error.to_string(), "I/O error: denied");
    }

    #[test]
    fn test_result_type_alias() {
        let ok: Result<i32> = Ok(42);
        assert!(ok.is_ok());

        let err: Result<i32> = Err(Error::Other("error".to_string()));
        assert!(err.is_err());
    }
}
