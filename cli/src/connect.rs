use crate::args::Cli;
use staybook_cli::{CliConfiguration, CliError, CliSession, FileIdentityStore, OutputFormat, Result};
use staybook_link::{ApiClient, IdentityStore};
use std::time::Duration;

/// Default backend when nothing else is configured
const DEFAULT_SERVER_URL: &str = "http://localhost:8080/api";

pub async fn create_session(
    cli: &Cli,
    store: FileIdentityStore,
    config: &CliConfiguration,
) -> Result<CliSession> {
    // Determine output format
    let format = if cli.json {
        OutputFormat::Json
    } else {
        cli.format
    };

    // Determine server URL (flags > stored identity > config file > default)
    let server_url = match (cli.url.clone(), cli.host.clone()) {
        (Some(url), _) => url,
        (None, Some(host)) => format!("http://{}:{}/api", host, cli.port),
        (None, None) => {
            let stored_url = store
                .get(&cli.instance)
                .ok()
                .flatten()
                .and_then(|record| record.server_url);
            match stored_url {
                Some(url) if url.starts_with("http://") || url.starts_with("https://") => url,
                _ => config
                    .resolved_server()
                    .url
                    .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            }
        }
    };

    if cli.verbose {
        eprintln!("Connecting to {}", server_url);
    }

    let client = ApiClient::builder()
        .base_url(server_url)
        .timeout(Duration::from_secs(cli.timeout))
        .connect_timeout(Duration::from_secs(cli.connection_timeout))
        .max_retries(config.resolved_server().max_retries)
        .build()
        .map_err(CliError::from)?;

    let mut session = CliSession::new(client, store, cli.instance.clone(), format, !cli.no_color);

    // Eager login when credentials are supplied on the command line
    if let Some(ref username) = cli.username {
        match cli.password.as_deref() {
            Some(password) if !password.is_empty() => {
                session
                    .cmd_login_with_password(username, password)
                    .await?;
            }
            _ => {
                session.cmd_login(Some(username.clone())).await?;
            }
        }
    }

    Ok(session)
}
