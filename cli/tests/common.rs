//! Common utilities and helpers for CLI integration tests.

use assert_cmd::Command;
use std::time::Duration;

/// Test configuration constants
pub const SERVER_URL: &str = "http://localhost:8080/api";
pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Helper to create a CLI command with an isolated config/identity home
pub fn create_cli_command(home: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_staybook"));
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .arg("--no-color")
        .timeout(TEST_TIMEOUT);
    cmd
}

/// Helper to check if a backend is running via the CLI
pub fn is_server_running(home: &std::path::Path) -> bool {
    let mut cmd = create_cli_command(home);
    cmd.arg("-u")
        .arg(SERVER_URL)
        .arg("--command")
        .arg("hotels")
        .timeout(Duration::from_secs(3));
    cmd.output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
