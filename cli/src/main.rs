//! Staybook CLI - Terminal client for the Staybook booking service
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode
//! staybook -u http://localhost:8080/api
//!
//! # Login and jump straight into the session
//! staybook --username alice
//!
//! # Execute a single command
//! staybook -c "search 2026-09-01 2026-09-04 double price"
//!
//! # JSON output
//! staybook --json -c "hotels"
//! ```

use clap::Parser;
use colored::Colorize;

use staybook_cli::{CliConfiguration, CliError, FileIdentityStore, Result};

mod args;
mod commands;
mod connect;

use args::Cli;
use commands::identity::handle_identity;
use connect::create_session;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        match e {
            CliError::Cancelled => {}
            e => {
                eprintln!("{} {}", "Error:".red(), e);
                std::process::exit(1);
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    // Load the identity store (corrupt files load empty)
    let mut identity_store = FileIdentityStore::new();

    // Handle identity management flag commands
    if handle_identity(&cli, &mut identity_store)? {
        return Ok(());
    }

    // Load configuration
    let config = CliConfiguration::load(&cli.config)?;

    let mut session = create_session(&cli, identity_store, &config).await?;

    // Execute based on mode
    match cli.command {
        // Execute a single command
        Some(command) => {
            session.execute(&command).await?;
        }

        // Interactive mode
        None => {
            session.run_interactive().await?;
        }
    }

    Ok(())
}
