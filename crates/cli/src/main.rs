use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use counsel_agent::{Session, TurnOutcome};
use counsel_core::config::{DEFAULT_CONFIG_FILE, FileLoggingConfig};
use counsel_core::logging::{self, LoggingConfig};
use counsel_core::{API_KEY_VAR, CREDENTIAL_REMEDIATION, ConfigError, Config, Credentials, load_dotenv};
use counsel_providers::{ProviderFactory, ProviderSource};
use counsel_ui::App;
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

/// Counsel - career and education guidance in the terminal
#[derive(Parser, Debug)]
#[command(name = "counsel")]
#[command(about = "A terminal chat client for career and education counselling", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to counsel.toml (default: ./counsel.toml when present)
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Answer from a TOML file of scripted responses instead of OpenRouter
    #[arg(short, long, value_name = "PATH", global = true)]
    mock: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Commands {
    /// Start the interactive chat (default)
    Chat,
    /// Ask a single question and print the reply
    Ask {
        /// Question to ask
        #[arg(required = true, value_name = "QUESTION")]
        question: String,
    },
    /// Show the resolved configuration
    Status,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or(Commands::Chat);

    let dotenv_path = load_dotenv();
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let _log_guard = logging::init_logging(Some(logging_config(&config, &command, cli.verbose)))
        .context("Failed to initialize logging")?;
    tracing::debug!(?command, dotenv = ?dotenv_path, "starting counsel");

    if cli.verbose && command != Commands::Chat {
        if let Some(path) = &dotenv_path {
            println!("{} Loaded environment from {}", "Info:".blue().bold(), path.display());
        }
        println!("{} Model: {}", "Info:".blue().bold(), config.completion.model.cyan());
    }

    match command {
        Commands::Chat => cmd_chat(&config, cli.mock.as_deref()).await,
        Commands::Ask { question } => cmd_ask(&config, cli.mock.as_deref(), &question).await,
        Commands::Status => cmd_status(&config, cli.config.as_deref(), cli.mock.as_deref()),
    }
}

/// Logging setup for a command; the chat UI owns the terminal so it logs to file only
fn logging_config(config: &Config, command: &Commands, verbose: bool) -> LoggingConfig {
    let mut logging = LoggingConfig::from(config.logging.clone());
    if verbose {
        logging = logging.with_level("debug");
    }
    if *command == Commands::Chat {
        let mut file = FileLoggingConfig { enabled: true, ..config.logging.file.clone() };
        if verbose {
            file.level = "debug".to_string();
        }
        logging = logging.without_stderr().with_file_logging(file);
    }
    logging
}

/// Decide where replies come from; a mock file needs no credential
fn provider_source(mock: Option<&Path>, lookup: impl Fn(&str) -> Option<String>) -> Result<ProviderSource> {
    if let Some(path) = mock {
        return Ok(ProviderSource::Mock(path.to_path_buf()));
    }

    match Credentials::from_lookup(lookup) {
        Ok(credentials) => Ok(ProviderSource::OpenRouter(credentials)),
        Err(counsel_core::Error::Config(ConfigError::MissingCredential(var))) => {
            anyhow::bail!("{} is not set\n\n{}", var, CREDENTIAL_REMEDIATION)
        }
        Err(e) => Err(e).context("Failed to read credentials"),
    }
}

fn create_session(config: &Config, mock: Option<&Path>) -> Result<Session> {
    let source = provider_source(mock, |name| std::env::var(name).ok())?;
    let provider = ProviderFactory::create(source, &config.completion).context("Failed to create provider")?;
    let privacy = LoggingConfig::from(config.logging.clone()).privacy;
    Ok(Session::new(provider).with_privacy(privacy))
}

/// Start the interactive TUI session
async fn cmd_chat(config: &Config, mock: Option<&Path>) -> Result<()> {
    let session = create_session(config, mock)?;
    let model = if mock.is_some() { "mock".to_string() } else { config.completion.model.clone() };

    let mut app = App::new(session, model);
    app.run().await.context("Terminal UI failed")?;

    let exchanges = app.session().history().len();
    tracing::info!(exchanges, "chat ended");
    Ok(())
}

/// Ask one question and print the reply
async fn cmd_ask(config: &Config, mock: Option<&Path>, question: &str) -> Result<()> {
    let mut session = create_session(config, mock)?;

    match session.submit(question).await {
        TurnOutcome::Answered(answer) => {
            println!("{}", answer);
            Ok(())
        }
        TurnOutcome::Failed => {
            if let Some(apology) = session.transcript().last() {
                println!("{}", apology.content());
            }
            anyhow::bail!("The completion request failed (details are in the log)")
        }
        TurnOutcome::Ignored => anyhow::bail!("Question must not be blank"),
    }
}

/// Show current status
fn cmd_status(config: &Config, config_path: Option<&Path>, mock: Option<&Path>) -> Result<()> {
    println!("{}", "Counsel Status".green().bold().underline());
    println!();

    println!("{} Configuration", "Info:".blue().bold());
    println!("  File: {}", config_source(config_path).cyan());
    println!("  Endpoint: {}", config.completion.base_url.cyan());
    println!("  Model: {}", config.completion.model.cyan());
    println!("  Temperature: {}", config.completion.temperature);
    println!("  Max tokens: {}", config.completion.max_tokens);
    println!("  Timeout: {}s", config.completion.timeout_secs);

    println!();
    println!("{} Credentials", "Info:".blue().bold());
    match mock {
        Some(path) => println!("  Mock responses: {}", path.display().cyan()),
        None => {
            let summary = credential_summary(|name| std::env::var(name).ok());
            for line in summary {
                println!("  {}", line);
            }
        }
    }

    println!();
    println!("{} Logging", "Info:".blue().bold());
    println!("  Level: {}", config.logging.level);
    match LoggingConfig::log_dir() {
        Ok(dir) => println!("  Log directory: {}", dir.display()),
        Err(e) => println!("  Log directory: {} ({})", "unavailable".yellow(), e),
    }

    Ok(())
}

fn config_source(explicit: Option<&Path>) -> String {
    match explicit {
        Some(path) => path.display().to_string(),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => DEFAULT_CONFIG_FILE.to_string(),
        None => "(built-in defaults)".to_string(),
    }
}

/// Credential lines for `status`, never exposing the key itself
fn credential_summary(lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
    match Credentials::from_lookup(lookup) {
        Ok(credentials) => vec![
            format!("{}: {}", API_KEY_VAR, credentials.redacted_key()),
            format!("Site URL: {}", credentials.site_url),
            format!("Site name: {}", credentials.site_name),
        ],
        Err(_) => vec![format!("{}: not set", API_KEY_VAR)],
    }
}
