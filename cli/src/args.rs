use clap::Parser;
use staybook_cli::OutputFormat;
use std::path::PathBuf;

// Build information - version string assembled at compile time
macro_rules! version_string {
    () => {
        concat!(
            env!("CARGO_PKG_VERSION"),
            "\nCommit: ",
            env!("GIT_COMMIT_HASH"),
            " (",
            env!("GIT_BRANCH"),
            ")\nBuilt: ",
            env!("BUILD_DATE")
        )
    };
}

/// Staybook CLI - Terminal client for the Staybook booking service
#[derive(Parser, Debug)]
#[command(name = "staybook")]
#[command(version = version_string!())]
#[command(about = "Browse hotels, search rooms and manage bookings from the terminal", long_about = None)]
pub struct Cli {
    /// Backend URL including the API prefix (e.g. http://localhost:8080/api)
    #[arg(short = 'u', long = "url")]
    pub url: Option<String>,

    /// Host address (alternative to URL; the /api prefix is added)
    #[arg(short = 'H', long = "host")]
    pub host: Option<String>,

    /// Port number (default: 8080)
    #[arg(short = 'p', long = "port", default_value = "8080")]
    pub port: u16,

    /// Named instance for identity storage
    #[arg(long = "instance", default_value = "local")]
    pub instance: String,

    /// Login as this user before running commands
    #[arg(long = "username")]
    pub username: Option<String>,

    /// Password for --username (if flag is present without value, prompts interactively)
    #[arg(long = "password", num_args = 0..=1, default_missing_value = "")]
    pub password: Option<String>,

    /// Execute a single command and exit
    #[arg(short = 'c', long = "command")]
    pub command: Option<String>,

    /// Output format
    #[arg(long = "format", default_value = "table")]
    pub format: OutputFormat,

    /// Enable JSON output (shorthand for --format=json)
    #[arg(long = "json", conflicts_with = "format")]
    pub json: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Configuration file path
    #[arg(long = "config", default_value = "~/.staybook/config.toml")]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// HTTP request timeout in seconds (default: 30)
    #[arg(long = "timeout", value_name = "SECONDS", default_value_t = 30)]
    pub timeout: u64,

    /// Connection timeout in seconds (TCP + TLS handshake, default: 10)
    #[arg(
        long = "connection-timeout",
        value_name = "SECONDS",
        default_value_t = 10
    )]
    pub connection_timeout: u64,

    // Identity management commands
    /// Show the stored identity for the instance
    #[arg(long = "show-identity")]
    pub show_identity: bool,

    /// Forget the stored identity for the instance
    #[arg(long = "forget-identity")]
    pub forget_identity: bool,

    /// List all instances with a stored identity
    #[arg(long = "list-instances")]
    pub list_instances: bool,
}
