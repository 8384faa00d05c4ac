//! Identity management flag commands (run before a session is created).

use staybook_cli::{CliError, FileIdentityStore, Result};
use staybook_link::IdentityStore;

use crate::args::Cli;

/// Handle `--list-instances`, `--show-identity` and `--forget-identity`.
/// Returns true when a flag command ran and the process should exit.
pub fn handle_identity(cli: &Cli, store: &mut FileIdentityStore) -> Result<bool> {
    if cli.list_instances {
        let instances = store
            .list()
            .map_err(|e| CliError::Configuration(format!("Failed to list instances: {}", e)))?;
        if instances.is_empty() {
            println!("No stored identities");
        } else {
            println!("Stored identities:");
            for instance in instances {
                if let Ok(Some(record)) = store.get(&instance) {
                    println!("  • {} ({} as {})", instance, record.username, record.role);
                } else {
                    println!("  • {}", instance);
                }
            }
        }
        return Ok(true);
    }

    if cli.show_identity {
        match store
            .get(&cli.instance)
            .map_err(|e| CliError::Configuration(format!("Failed to read identity: {}", e)))?
        {
            Some(record) => {
                println!("Instance: {}", cli.instance);
                println!("Username: {}", record.username);
                println!("Role:     {}", record.role);
                if let Some(ref url) = record.server_url {
                    println!("Server:   {}", url);
                }
            }
            None => {
                println!("No identity stored for instance '{}'", cli.instance);
            }
        }
        return Ok(true);
    }

    if cli.forget_identity {
        store
            .clear(&cli.instance)
            .map_err(|e| CliError::Configuration(format!("Failed to forget identity: {}", e)))?;
        println!("Forgot identity for instance '{}'", cli.instance);
        return Ok(true);
    }

    Ok(false)
}
