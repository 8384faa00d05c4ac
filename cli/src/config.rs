//! Configuration file management.
//!
//! # Configuration Format
//!
//! ```toml
//! [server]
//! url = "http://localhost:8080/api"  # Staybook backend base URL
//! timeout = 30                       # request timeout in seconds
//! max_retries = 3                    # transport retry attempts
//!
//! [ui]
//! format = "table"                   # table, json
//! color = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

/// CLI configuration loaded from TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfiguration {
    /// Server connection settings
    pub server: Option<ServerConfig>,

    /// UI preferences
    pub ui: Option<UiConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Backend base URL (e.g. http://localhost:8080/api)
    pub url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Maximum transport retry attempts
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Output format: table, json
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable colored output
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    3
}

fn default_format() -> String {
    "table".to_string()
}

fn default_color() -> bool {
    true
}

impl Default for CliConfiguration {
    fn default() -> Self {
        Self {
            server: Some(ServerConfig {
                url: None,
                timeout: default_timeout(),
                max_retries: default_retries(),
            }),
            ui: Some(UiConfig {
                format: default_format(),
                color: default_color(),
            }),
        }
    }
}

pub fn expand_config_path(path: &Path) -> PathBuf {
    let path_str = path.to_str().unwrap_or("~/.staybook/config.toml");
    if let Some(rest) = path_str.strip_prefix("~/") {
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(rest);
        }
    }
    path.to_path_buf()
}

pub fn default_config_path() -> PathBuf {
    expand_config_path(Path::new("~/.staybook/config.toml"))
}

impl CliConfiguration {
    /// Load configuration from file
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        let expanded_path = expand_config_path(path);
        let path = &expanded_path;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            CliError::Configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: CliConfiguration = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let expanded_path = expand_config_path(path);
        let path = &expanded_path;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Resolved server settings with defaults filled in
    pub fn resolved_server(&self) -> ServerConfig {
        self.server.clone().unwrap_or(ServerConfig {
            url: None,
            timeout: default_timeout(),
            max_retries: default_retries(),
        })
    }

    /// Resolved UI settings with defaults filled in
    pub fn resolved_ui(&self) -> UiConfig {
        self.ui.clone().unwrap_or(UiConfig {
            format: default_format(),
            color: default_color(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_file_missing() {
        let config = CliConfiguration::load(Path::new("/nonexistent/config.toml")).unwrap();
        let server = config.resolved_server();
        assert_eq!(server.url, None);
        assert_eq!(server.timeout, 30);
        assert_eq!(server.max_retries, 3);
        assert!(config.resolved_ui().color);
    }

    #[test]
    fn test_parse_partial_config() {
        let config: CliConfiguration = toml::from_str(
            r#"
            [server]
            url = "https://booking.example.com/api"
            "#,
        )
        .unwrap();
        let server = config.resolved_server();
        assert_eq!(
            server.url.as_deref(),
            Some("https://booking.example.com/api")
        );
        // omitted fields pick up defaults
        assert_eq!(server.timeout, 30);
        assert_eq!(config.resolved_ui().format, "table");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = CliConfiguration::default();
        if let Some(ref mut server) = config.server {
            server.url = Some("http://localhost:9090/api".to_string());
        }
        config.save(&path).unwrap();

        let reloaded = CliConfiguration::load(&path).unwrap();
        assert_eq!(
            reloaded.resolved_server().url.as_deref(),
            Some("http://localhost:9090/api")
        );
    }

    #[test]
    fn test_tilde_expansion() {
        let expanded = expand_config_path(Path::new("~/.staybook/config.toml"));
        if dirs::home_dir().is_some() {
            assert!(!expanded.to_string_lossy().starts_with('~'));
        }
    }
}
