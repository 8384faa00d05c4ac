//! File-based identity persistence for the CLI.
//!
//! Stores the signed-in `{username, role}` record in TOML with secure
//! file permissions (0600 on Unix). This is the UI-gating cache only;
//! the server re-authenticates every request, and no password or token
//! is ever written here.
//!
//! # File Location
//!
//! - Windows: `~/.staybook/identity.toml`
//! - Linux/macOS: `~/.config/staybook/identity.toml`
//!
//! # File Format
//!
//! ```toml
//! [instances.local]
//! username = "alice"
//! role = "ADMIN"
//! server_url = "http://localhost:8080/api"
//! ```
//!
//! An absent or corrupt file is treated as "no session": the store loads
//! empty and the session starts Anonymous.

use log::warn;
use serde::{Deserialize, Serialize};
use staybook_link::{ApiError, IdentityStore, Result, StoredIdentity};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File-based identity store
#[derive(Debug, Clone)]
pub struct FileIdentityStore {
    /// Path to the identity file
    file_path: PathBuf,

    /// In-memory cache of records
    cache: HashMap<String, StoredIdentity>,
}

/// Top-level TOML structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct IdentityFile {
    #[serde(default)]
    instances: HashMap<String, StoredIdentity>,
}

impl FileIdentityStore {
    /// Default identity file path
    /// - Windows: `~/.staybook/identity.toml`
    /// - Linux/macOS: `~/.config/staybook/identity.toml`
    pub fn default_path() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".staybook").join("identity.toml")
            } else {
                PathBuf::from(".staybook").join("identity.toml")
            }
        }

        #[cfg(not(target_os = "windows"))]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("staybook").join("identity.toml")
            } else if let Some(home_dir) = dirs::home_dir() {
                home_dir
                    .join(".config")
                    .join("staybook")
                    .join("identity.toml")
            } else {
                PathBuf::from(".staybook").join("identity.toml")
            }
        }
    }

    /// Create a store at the default location
    pub fn new() -> Self {
        Self::with_path(Self::default_path())
    }

    /// Create a store at a custom location
    pub fn with_path(file_path: PathBuf) -> Self {
        let mut store = Self {
            file_path,
            cache: HashMap::new(),
        };
        store.load_from_disk();
        store
    }

    /// Load records from disk into the memory cache.
    ///
    /// Absence and corruption both leave the cache empty: a broken file
    /// means "no session", never a startup failure.
    fn load_from_disk(&mut self) {
        self.cache.clear();
        if !self.file_path.exists() {
            return;
        }

        let contents = match fs::read_to_string(&self.file_path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(
                    "[IDENTITY] Ignoring unreadable identity file {}: {}",
                    self.file_path.display(),
                    e
                );
                return;
            }
        };

        match toml::from_str::<IdentityFile>(&contents) {
            Ok(file) => self.cache = file.instances,
            Err(e) => {
                warn!(
                    "[IDENTITY] Ignoring corrupt identity file {}: {}",
                    self.file_path.display(),
                    e
                );
            }
        }
    }

    /// Save the memory cache to disk
    fn save_to_disk(&self) -> Result<()> {
        let file = IdentityFile {
            instances: self.cache.clone(),
        };

        let contents = toml::to_string_pretty(&file)
            .map_err(|e| ApiError::Configuration(format!("Failed to serialize identity: {}", e)))?;

        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ApiError::Configuration(format!(
                    "Failed to create identity directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        fs::write(&self.file_path, contents).map_err(|e| {
            ApiError::Configuration(format!(
                "Failed to write identity file at '{}': {}",
                self.file_path.display(),
                e
            ))
        })?;

        // 0600: the record is harmless, but there is no reason for other
        // accounts to read who is logged in where
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&self.file_path, permissions).map_err(|e| {
                ApiError::Configuration(format!(
                    "Failed to set permissions for '{}': {}",
                    self.file_path.display(),
                    e
                ))
            })?;
        }

        Ok(())
    }

    /// The file path used by this store
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl Default for FileIdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityStore for FileIdentityStore {
    fn get(&self, instance: &str) -> Result<Option<StoredIdentity>> {
        Ok(self.cache.get(instance).cloned())
    }

    fn set(&mut self, instance: &str, identity: &StoredIdentity) -> Result<()> {
        self.cache.insert(instance.to_string(), identity.clone());
        self.save_to_disk()
    }

    fn clear(&mut self, instance: &str) -> Result<()> {
        self.cache.remove(instance);
        self.save_to_disk()
    }

    fn list(&self) -> Result<Vec<String>> {
        Ok(self.cache.keys().cloned().collect())
    }
}
