use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Environment variable holding the completion service credential
pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
/// Environment variable holding the referrer identity sent with each request
pub const SITE_URL_VAR: &str = "SITE_URL";
/// Environment variable holding the display name sent with each request
pub const SITE_NAME_VAR: &str = "SITE_NAME";

pub const DEFAULT_SITE_URL: &str = "http://CCC_2025";
pub const DEFAULT_SITE_NAME: &str = "Career Counseling Chatbot";

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "counsel.toml";

/// Steps shown to the user when the credential is missing
pub const CREDENTIAL_REMEDIATION: &str = "\
OPENROUTER_API_KEY not found in the environment or .env file. Please follow these steps:
  1. Go to OpenRouter (https://openrouter.ai).
  2. Sign up or log in to get an API key.
  3. Add it to a .env file: OPENROUTER_API_KEY=your_key
  4. Optionally, add SITE_URL and SITE_NAME for rankings.
  5. Restart counsel.";

/// Load a `.env` file from the working directory (or its parents) into the
/// process environment. Returns the path that was loaded, if any.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenv::dotenv().ok()
}

/// Credential and identification headers for the completion service
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Bearer token (required)
    pub api_key: String,
    /// Sent as `HTTP-Referer`
    pub site_url: String,
    /// Sent as `X-Title`
    pub site_name: String,
}

impl Credentials {
    /// Read credentials from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through an arbitrary variable lookup
    ///
    /// An empty or whitespace-only key counts as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::MissingCredential(API_KEY_VAR.to_string()))?;

        let site_url = lookup(SITE_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SITE_URL.to_string());
        let site_name = lookup(SITE_NAME_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SITE_NAME.to_string());

        Ok(Self { api_key, site_url, site_name })
    }

    /// Key with everything but the last four characters masked
    pub fn redacted_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 4 {
            return "****".to_string();
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{}", tail)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.redacted_key())
            .field("site_url", &self.site_url)
            .field("site_name", &self.site_name)
            .finish()
    }
}

/// Parameters of the outbound completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompletionConfig {
    /// Full URL of the chat completions endpoint
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Sampling temperature (kept low for consistent advice)
    pub temperature: f32,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
    /// Seconds to wait for the whole request before giving up
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            model: "deepseek/deepseek-r1-0528-qwen3-8b:free".to_string(),
            temperature: 0.4,
            max_tokens: 1000,
            timeout_secs: 30,
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive
    pub level: String,
    /// `pretty`, `json` or `compact`
    pub format: String,
    pub file: FileLoggingConfig,
    pub privacy: PrivacyLoggingConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
            file: FileLoggingConfig::default(),
            privacy: PrivacyLoggingConfig::default(),
        }
    }
}

/// `[logging.file]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileLoggingConfig {
    pub enabled: bool,
    pub level: String,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self { enabled: false, level: "info".to_string() }
    }
}

/// `[logging.privacy]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrivacyLoggingConfig {
    /// How question and reply text appear in logs: `none`, `truncate` or `full`
    pub log_content: String,
    pub truncate_length: usize,
}

impl Default for PrivacyLoggingConfig {
    fn default() -> Self {
        Self { log_content: "truncate".to_string(), truncate_length: 200 }
    }
}

/// Root configuration structure for counsel.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub completion: CompletionConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Resolve configuration for a run.
    ///
    /// An explicit path must exist. Without one, `counsel.toml` in the
    /// working directory is used when present and defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        let completion = &self.completion;

        if !(0.0..=2.0).contains(&completion.temperature) {
            return Err(ConfigError::Invalid(format!(
                "completion.temperature must be within 0..=2, got {}",
                completion.temperature
            ))
            .into());
        }

        if completion.max_tokens == 0 {
            return Err(ConfigError::Invalid("completion.max_tokens must be positive".to_string()).into());
        }

        if completion.timeout_secs == 0 {
            return Err(ConfigError::Invalid("completion.timeout_secs must be positive".to_string()).into());
        }

        if !(completion.base_url.starts_with("http://") || completion.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "completion.base_url must be an http(s) URL, got '{}'",
                completion.base_url
            ))
            .into());
        }

        if completion.model.trim().is_empty() {
            return Err(ConfigError::Invalid("completion.model must not be empty".to_string()).into());
        }

        Ok(())
    }

    /// Get example configuration (as a string)
    pub fn example() -> &'static str {
        r#"# Counsel configuration example
# Every key is optional; omitted keys keep their defaults.
# Credentials are read from the environment (or .env), never from this file:
#   OPENROUTER_API_KEY (required), SITE_URL, SITE_NAME

[completion]
base_url = "https://openrouter.ai/api/v1/chat/completions"
model = "deepseek/deepseek-r1-0528-qwen3-8b:free"
temperature = 0.4
max_tokens = 1000
timeout_secs = 30

[logging]
# Filter directive, overridden by COUNSEL_LOG or RUST_LOG
level = "warn"
# "pretty", "json" or "compact"
format = "pretty"

[logging.file]
enabled = false
level = "info"

[logging.privacy]
# How question and reply text appear in logs: "none", "truncate" or "full"
log_content = "truncate"
truncate_length = 200
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_credentials_with_defaults() {
        let creds = Credentials::from_lookup(lookup_from(&[(API_KEY_VAR, "sk-or-test")])).unwrap();
        assert_eq!(creds.api_key, "sk-or-test");
        assert_eq!(creds.site_url, DEFAULT_SITE_URL);
        assert_eq!(creds.site_name, DEFAULT_SITE_NAME);
    }

    #[test]
    fn test_credentials_with_overrides() {
        let creds = Credentials::from_lookup(lookup_from(&[
            (API_KEY_VAR, "sk-or-test"),
            (SITE_URL_VAR, "https://careers.example.edu"),
            (SITE_NAME_VAR, "Campus Careers"),
        ]))
        .unwrap();
        assert_eq!(creds.site_url, "https://careers.example.edu");
        assert_eq!(creds.site_name, "Campus Careers");
    }

    #[test]
    fn test_credentials_missing_key() {
        let err = Credentials::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Config(ConfigError::MissingCredential(ref var)) if var == API_KEY_VAR
        ));
    }

    #[test]
    fn test_credentials_blank_key_is_missing() {
        let result = Credentials::from_lookup(lookup_from(&[(API_KEY_VAR, "   ")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_credentials_redaction() {
        let creds = Credentials::from_lookup(lookup_from(&[(API_KEY_VAR, "sk-or-abcdef1234")])).unwrap();
        assert_eq!(creds.redacted_key(), "****1234");
        assert!(!format!("{:?}", creds).contains("abcdef"));

        let short = Credentials::from_lookup(lookup_from(&[(API_KEY_VAR, "abc")])).unwrap();
        assert_eq!(short.redacted_key(), "****");
    }

    #[test]
    fn test_remediation_mentions_variable() {
        assert!(CREDENTIAL_REMEDIATION.contains(API_KEY_VAR));
        assert!(CREDENTIAL_REMEDIATION.contains("https://openrouter.ai"));
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.completion.model, "deepseek/deepseek-r1-0528-qwen3-8b:free");
        assert_eq!(config.completion.temperature, 0.4);
        assert_eq!(config.completion.max_tokens, 1000);
        assert_eq!(config.completion.timeout_secs, 30);
        assert_eq!(config.logging.level, "warn");
        assert!(!config.logging.file.enabled);
    }

    #[test]
    fn test_config_from_empty_toml() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_partial_override() {
        let toml = r#"
[completion]
model = "openai/gpt-4o-mini"
timeout_secs = 10

[logging.file]
enabled = true
"#;
        let config = Config::from_toml_str(toml).unwrap();
        assert_eq!(config.completion.model, "openai/gpt-4o-mini");
        assert_eq!(config.completion.timeout_secs, 10);
        assert_eq!(config.completion.max_tokens, 1000);
        assert!(config.logging.file.enabled);
        assert_eq!(config.logging.file.level, "info");
    }

    #[test]
    fn test_config_example_parses() {
        let config = Config::from_toml_str(Config::example()).unwrap();
        assert_eq!(config.completion, CompletionConfig::default());
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        let result = Config::from_toml_str("[completion]\nstream = true\n");
        assert!(result.unwrap_err().to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_config_validation_temperature() {
        let result = Config::from_toml_str("[completion]\ntemperature = 3.5\n");
        assert!(result.unwrap_err().to_string().contains("temperature"));
    }

    #[test]
    fn test_config_validation_max_tokens() {
        let result = Config::from_toml_str("[completion]\nmax_tokens = 0\n");
        assert!(result.unwrap_err().to_string().contains("max_tokens"));
    }

    #[test]
    fn test_config_validation_timeout() {
        let result = Config::from_toml_str("[completion]\ntimeout_secs = 0\n");
        assert!(result.unwrap_err().to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_config_validation_base_url() {
        let result = Config::from_toml_str("[completion]\nbase_url = \"ftp://example.com\"\n");
        assert!(result.unwrap_err().to_string().contains("base_url"));
    }

    #[test]
    fn test_config_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("counsel.toml");
        std::fs::write(&path, "[completion]\nmax_tokens = 250\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.completion.max_tokens, 250);
    }

    #[test]
    fn test_config_load_explicit_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");
        let result = Config::load(Some(&path));
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }
}
