//! Unified logging and observability system.
//!
//! Logging uses the tracing ecosystem, with structured events, optional file
//! output and privacy controls for conversation content.
//!
//! # Environment Variables
//!
//! - `COUNSEL_LOG`: Filter directive (like `RUST_LOG`), e.g., `counsel=debug`
//! - `COUNSEL_LOG_FORMAT`: Output format for stderr: `pretty`, `json`, `compact`
//! - `COUNSEL_LOG_DIR`: Directory for log files (default `~/.counsel/logs`)
//!
//! # Configuration
//!
//! Logging is configured via the `[logging]` section in `counsel.toml`:
//!
//! ```toml
//! [logging]
//! level = "warn"
//! format = "pretty"
//!
//! [logging.file]
//! enabled = false
//! level = "info"
//!
//! [logging.privacy]
//! log_content = "truncate"
//! truncate_length = 200
//! ```
//!
//! # Example
//!
//! ```no_run
//! use counsel_core::logging;
//!
//! // Keep the guard alive for the lifetime of the program so buffered
//! // file output is flushed on exit.
//! let _guard = logging::init_logging(None)?;
//! # Ok::<(), counsel_core::Error>(())
//! ```

use crate::Error;
use crate::config::{FileLoggingConfig, LoggingConfig as ConfigLoggingConfig};
use std::env;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format for stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Pretty, human-readable output with colors (default for TTY)
    #[default]
    Pretty,
    /// JSON output (one line per event)
    Json,
    /// Compact, single-line output
    Compact,
}

impl LogFormat {
    /// All available log formats.
    pub const VALUES: &[LogFormat] = &[LogFormat::Pretty, LogFormat::Json, LogFormat::Compact];

    /// Parse a log format from a string.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            "compact" => Some(LogFormat::Compact),
            _ => None,
        }
    }

    /// Get the string representation of this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
            LogFormat::Compact => "compact",
        }
    }
}

/// How question and reply text is written to logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentLogging {
    /// Replace content with a placeholder.
    None,
    /// Log up to `truncate_length` chars.
    #[default]
    Truncate,
    /// Log full content.
    Full,
}

impl ContentLogging {
    /// Parse from string.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(ContentLogging::None),
            "truncate" => Some(ContentLogging::Truncate),
            "full" => Some(ContentLogging::Full),
            _ => None,
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentLogging::None => "none",
            ContentLogging::Truncate => "truncate",
            ContentLogging::Full => "full",
        }
    }
}

impl FromStr for ContentLogging {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentLogging::parse_str(s).ok_or_else(|| format!("invalid content logging: {}", s))
    }
}

/// Logging configuration wrapper that bridges config and logging modules.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default log level.
    pub level: String,
    /// Output format for stderr.
    pub format: LogFormat,
    /// Whether events are written to stderr at all.
    pub stderr: bool,
    /// File logging configuration (optional).
    pub file: Option<FileLoggingConfig>,
    /// Privacy controls for conversation content.
    pub privacy: PrivacyConfig,
}

/// Privacy configuration for conversation content in logs.
#[derive(Debug, Clone)]
pub struct PrivacyConfig {
    /// How to handle content in logs.
    pub log_content: ContentLogging,
    /// Maximum length for truncated content.
    pub truncate_length: usize,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self { log_content: ContentLogging::default(), truncate_length: 200 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::default(),
            stderr: true,
            file: None,
            privacy: PrivacyConfig::default(),
        }
    }
}

impl From<ConfigLoggingConfig> for LoggingConfig {
    fn from(config: ConfigLoggingConfig) -> Self {
        let format = LogFormat::parse_str(&config.format).unwrap_or_default();
        let log_content = ContentLogging::parse_str(&config.privacy.log_content).unwrap_or_default();

        Self {
            level: config.level,
            format,
            stderr: true,
            file: if config.file.enabled { Some(config.file) } else { None },
            privacy: PrivacyConfig { log_content, truncate_length: config.privacy.truncate_length },
        }
    }
}

impl LoggingConfig {
    /// Create a new logging config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable file logging.
    pub fn with_file_logging(mut self, config: FileLoggingConfig) -> Self {
        self.file = Some(config);
        self
    }

    /// Stop writing to stderr (used while the terminal UI owns the screen).
    pub fn without_stderr(mut self) -> Self {
        self.stderr = false;
        self
    }

    /// Set privacy configuration.
    pub fn with_privacy(mut self, config: PrivacyConfig) -> Self {
        self.privacy = config;
        self
    }

    /// Build an EnvFilter from environment variables, falling back to `level`.
    fn build_env_filter(level: &str) -> EnvFilter {
        let filter = env::var("COUNSEL_LOG")
            .ok()
            .or_else(|| env::var("RUST_LOG").ok())
            .unwrap_or_else(|| level.to_string());

        EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new(level))
    }

    /// Detect if stderr is a TTY for pretty formatting.
    fn is_tty() -> bool {
        atty::is(atty::Stream::Stderr)
    }

    /// Determine the appropriate format for stderr output.
    fn detect_format(&self) -> LogFormat {
        if let Ok(fmt_str) = env::var("COUNSEL_LOG_FORMAT")
            && let Some(fmt) = LogFormat::parse_str(&fmt_str)
        {
            return fmt;
        }

        if !Self::is_tty() && self.format == LogFormat::Pretty { LogFormat::Compact } else { self.format }
    }

    /// Get the log directory path.
    pub fn log_dir() -> Result<PathBuf, Error> {
        if let Ok(custom_dir) = env::var("COUNSEL_LOG_DIR") {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .map_err(|_| Error::Other("could not determine home directory for log files".to_string()))?;

        Ok(PathBuf::from(home).join(".counsel").join("logs"))
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Sets up the global subscriber with formatted stderr output unless
/// disabled, and optional daily-rotated JSON file output. Each output has its
/// own filter: `COUNSEL_LOG` or `RUST_LOG` when set, otherwise `level` for
/// stderr and `[logging.file].level` for the file.
///
/// The returned guard flushes the file writer when dropped and must be held
/// by the caller until exit. It is `None` when file logging is off.
pub fn init_logging(config: Option<LoggingConfig>) -> Result<Option<WorkerGuard>, Error> {
    let config = config.unwrap_or_default();
    let format = config.detect_format();

    let stderr_layer = if config.stderr {
        let filter = LoggingConfig::build_env_filter(&config.level);
        Some(match format {
            LogFormat::Pretty => fmt::layer()
                .pretty()
                .with_writer(io::stderr)
                .with_ansi(true)
                .with_filter(filter)
                .boxed(),
            LogFormat::Json => fmt::layer().json().with_writer(io::stderr).with_filter(filter).boxed(),
            LogFormat::Compact => fmt::layer().compact().with_writer(io::stderr).with_filter(filter).boxed(),
        })
    } else {
        None
    };

    let (file_layer, guard) = match &config.file {
        Some(file_config) => {
            let log_dir = LoggingConfig::log_dir()?;
            std::fs::create_dir_all(&log_dir)?;

            let file_appender = tracing_appender::rolling::daily(log_dir, "counsel.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(LoggingConfig::build_env_filter(&file_config.level));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    Registry::default()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Other(format!("failed to initialize logging: {}", e)))?;

    Ok(guard)
}

/// Redact conversation content based on privacy settings.
pub fn redact_content(content: &str, privacy: &PrivacyConfig) -> String {
    let total = content.chars().count();

    match privacy.log_content {
        ContentLogging::None => format!("[REDACTED {} chars]", total),
        ContentLogging::Truncate if total > privacy.truncate_length => {
            let mut truncated = content.chars().take(privacy.truncate_length).collect::<String>();
            truncated.push_str("...");
            truncated.push_str(&format!(" ({} total chars)", total));
            truncated
        }
        ContentLogging::Truncate | ContentLogging::Full => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!(LogFormat::parse_str("pretty"), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse_str("PRETTY"), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse_str("json"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse_str("compact"), Some(LogFormat::Compact));
        assert_eq!(LogFormat::parse_str("invalid"), None);
    }

    #[test]
    fn test_log_format_as_str() {
        for format in LogFormat::VALUES {
            assert_eq!(LogFormat::parse_str(format.as_str()), Some(*format));
        }
    }

    #[test]
    fn test_content_logging_from_str() {
        assert_eq!(ContentLogging::parse_str("none"), Some(ContentLogging::None));
        assert_eq!(ContentLogging::parse_str("TRUNCATE"), Some(ContentLogging::Truncate));
        assert_eq!("full".parse::<ContentLogging>(), Ok(ContentLogging::Full));
        assert!("loud".parse::<ContentLogging>().is_err());
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.stderr);
        assert!(config.file.is_none());
    }

    #[test]
    fn test_logging_config_builder() {
        let config = LoggingConfig::new()
            .with_level("debug")
            .with_format(LogFormat::Json)
            .without_stderr()
            .with_file_logging(FileLoggingConfig::default())
            .with_privacy(PrivacyConfig { log_content: ContentLogging::Full, truncate_length: 1000 });

        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.stderr);
        assert!(config.file.is_some());
        assert_eq!(config.privacy.log_content, ContentLogging::Full);
    }

    #[test]
    fn test_logging_config_from_file_config() {
        let mut file_config = ConfigLoggingConfig::default();
        file_config.format = "json".to_string();
        file_config.file.enabled = true;
        file_config.privacy.log_content = "none".to_string();

        let config = LoggingConfig::from(file_config);
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.file.is_some());
        assert_eq!(config.privacy.log_content, ContentLogging::None);

        let config = LoggingConfig::from(ConfigLoggingConfig::default());
        assert!(config.file.is_none());
    }

    #[test]
    fn test_redact_content_none() {
        let privacy = PrivacyConfig { log_content: ContentLogging::None, truncate_length: 100 };
        assert_eq!(redact_content("short", &privacy), "[REDACTED 5 chars]");
    }

    #[test]
    fn test_redact_content_truncate() {
        let privacy = PrivacyConfig { log_content: ContentLogging::Truncate, truncate_length: 10 };

        let redacted = redact_content("abcdefghijklmnopqrstuvwxyz", &privacy);
        assert!(redacted.starts_with("abcdefghij..."));
        assert!(redacted.contains("26 total chars"));

        assert_eq!(redact_content("brief", &privacy), "brief");
    }

    #[test]
    fn test_redact_content_full() {
        let privacy = PrivacyConfig { log_content: ContentLogging::Full, truncate_length: 10 };
        let long_content = "a".repeat(200);
        assert_eq!(redact_content(&long_content, &privacy), long_content);
    }
}
