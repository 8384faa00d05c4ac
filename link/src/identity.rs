//! Identity persistence abstraction for Staybook frontends.
//!
//! The persisted record is a non-authoritative `{username, role}` cache
//! used purely for UI gating; the authoritative check happens server-side
//! on every request via the session credential. Passwords and tokens are
//! never stored through this interface.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Role;
use crate::session::Identity;

/// Persisted identity record for one named instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredIdentity {
    /// Username of the signed-in account
    pub username: String,

    /// Role at the time of login
    pub role: Role,

    /// Server URL the identity was issued by, for reconnect convenience
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
}

impl StoredIdentity {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
            server_url: None,
        }
    }

    pub fn with_server_url(
        username: impl Into<String>,
        role: Role,
        server_url: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            role,
            server_url: Some(server_url.into()),
        }
    }

    /// The in-memory identity this record restores to
    pub fn identity(&self) -> Identity {
        Identity {
            username: self.username.clone(),
            role: self.role,
        }
    }
}

/// Storage backend for persisted identity records.
///
/// Implementations decide where records live (a config-dir file, an
/// in-memory map for tests). Absence is always `Ok(None)`, and
/// implementations must treat corrupt storage as absent rather than
/// failing the caller.
pub trait IdentityStore {
    /// Retrieve the identity stored for an instance, if any
    fn get(&self, instance: &str) -> Result<Option<StoredIdentity>>;

    /// Store (or replace) the identity for an instance
    fn set(&mut self, instance: &str, identity: &StoredIdentity) -> Result<()>;

    /// Remove the identity for an instance; removing a missing record is
    /// not an error
    fn clear(&mut self, instance: &str) -> Result<()>;

    /// List instances with a stored identity
    fn list(&self) -> Result<Vec<String>>;

    /// Whether an identity is stored for the instance
    fn has(&self, instance: &str) -> Result<bool> {
        Ok(self.get(instance)?.is_some())
    }
}

/// In-memory identity store for tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryIdentityStore {
    records: std::collections::HashMap<String, StoredIdentity>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn get(&self, instance: &str) -> Result<Option<StoredIdentity>> {
        Ok(self.records.get(instance).cloned())
    }

    fn set(&mut self, instance: &str, identity: &StoredIdentity) -> Result<()> {
        self.records.insert(instance.to_string(), identity.clone());
        Ok(())
    }

    fn clear(&mut self, instance: &str) -> Result<()> {
        self.records.remove(instance);
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        Ok(self.records.keys().cloned().collect())
    }
}
