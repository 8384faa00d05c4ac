//! Session identity holder and role guard.
//!
//! A two-state machine with single-writer mutation: `login` moves
//! Anonymous to Authenticated and persists the identity, `logout` moves
//! back and clears persistence. Everything else reads. The persisted
//! record is a convenience cache only; the server re-checks credentials on
//! every request.

use log::warn;

use crate::error::{ApiError, Result};
use crate::identity::{IdentityStore, StoredIdentity};
use crate::models::Role;

/// The identity of the signed-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub role: Role,
}

impl Identity {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }
}

/// Current session state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(Identity),
}

/// Holder for the current session identity.
#[derive(Debug, Clone, Default)]
pub struct SessionIdentity {
    state: SessionState,
}

impl SessionIdentity {
    /// Start anonymous
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Restore from persisted storage.
    ///
    /// Absent or unreadable storage leaves the session Anonymous; a store
    /// failure is logged, never propagated.
    pub fn restore(store: &dyn IdentityStore, instance: &str) -> Self {
        match store.get(instance) {
            Ok(Some(record)) => Self {
                state: SessionState::Authenticated(record.identity()),
            },
            Ok(None) => Self::anonymous(),
            Err(e) => {
                warn!("[SESSION] Ignoring unreadable identity store: {}", e);
                Self::anonymous()
            }
        }
    }

    /// Transition Anonymous -> Authenticated and persist the identity.
    pub fn login(
        &mut self,
        identity: Identity,
        store: &mut dyn IdentityStore,
        instance: &str,
        server_url: Option<&str>,
    ) -> Result<()> {
        let mut record = StoredIdentity::new(identity.username.clone(), identity.role);
        record.server_url = server_url.map(str::to_string);
        store.set(instance, &record)?;
        self.state = SessionState::Authenticated(identity);
        Ok(())
    }

    /// Transition Authenticated -> Anonymous and clear persistence.
    pub fn logout(&mut self, store: &mut dyn IdentityStore, instance: &str) -> Result<()> {
        store.clear(instance)?;
        self.state = SessionState::Anonymous;
        Ok(())
    }

    /// Current state, readable synchronously
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The signed-in identity, if any
    pub fn identity(&self) -> Option<&Identity> {
        match &self.state {
            SessionState::Authenticated(identity) => Some(identity),
            SessionState::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity().is_some()
    }

    /// Route guard: deny anonymous access, and deny authenticated access
    /// when the role does not match the requirement. `None` requires any
    /// authenticated identity.
    pub fn authorize(&self, required: Option<Role>) -> Result<&Identity> {
        let identity = self
            .identity()
            .ok_or_else(|| ApiError::Authentication("Please login to continue.".to_string()))?;
        if let Some(role) = required {
            if identity.role != role {
                return Err(ApiError::Authentication(format!(
                    "This area requires {} access.",
                    role
                )));
            }
        }
        Ok(identity)
    }

    /// Guard against a raw role string, compared case-insensitively.
    pub fn authorize_role_str(&self, required: &str) -> Result<&Identity> {
        let identity = self
            .identity()
            .ok_or_else(|| ApiError::Authentication("Please login to continue.".to_string()))?;
        if identity.role.matches(required) {
            Ok(identity)
        } else {
            Err(ApiError::Authentication(format!(
                "This area requires {} access.",
                required.to_uppercase()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::MemoryIdentityStore;

    #[test]
    fn test_login_logout_transitions() {
        let mut store = MemoryIdentityStore::new();
        let mut session = SessionIdentity::anonymous();
        assert_eq!(session.state(), &SessionState::Anonymous);

        session
            .login(Identity::new("alice", Role::Admin), &mut store, "local", None)
            .unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.identity().unwrap().username, "alice");
        assert!(store.has("local").unwrap());

        session.logout(&mut store, "local").unwrap();
        assert_eq!(session.state(), &SessionState::Anonymous);
        assert!(!store.has("local").unwrap());
    }

    #[test]
    fn test_restore_round_trip() {
        let mut store = MemoryIdentityStore::new();
        let mut session = SessionIdentity::anonymous();
        session
            .login(
                Identity::new("bob", Role::User),
                &mut store,
                "local",
                Some("http://localhost:8080/api"),
            )
            .unwrap();

        let restored = SessionIdentity::restore(&store, "local");
        assert_eq!(restored.identity().unwrap().username, "bob");
        assert_eq!(restored.identity().unwrap().role, Role::User);
    }

    #[test]
    fn test_restore_absent_is_anonymous() {
        let store = MemoryIdentityStore::new();
        let session = SessionIdentity::restore(&store, "local");
        assert_eq!(session.state(), &SessionState::Anonymous);
    }

    #[test]
    fn test_guard_denies_anonymous() {
        let session = SessionIdentity::anonymous();
        let err = session.authorize(Some(Role::Admin)).unwrap_err();
        assert_eq!(err.to_string(), "Please login to continue.");
        assert!(session.authorize(None).is_err());
    }

    #[test]
    fn test_guard_role_matrix() {
        let mut store = MemoryIdentityStore::new();
        let mut session = SessionIdentity::anonymous();
        session
            .login(Identity::new("alice", Role::User), &mut store, "local", None)
            .unwrap();

        assert!(session.authorize(None).is_ok());
        assert!(session.authorize(Some(Role::User)).is_ok());
        let err = session.authorize(Some(Role::Admin)).unwrap_err();
        assert_eq!(err.to_string(), "This area requires ADMIN access.");
    }

    #[test]
    fn test_guard_role_string_is_case_insensitive() {
        let mut store = MemoryIdentityStore::new();
        let mut session = SessionIdentity::anonymous();
        session
            .login(Identity::new("root", Role::Admin), &mut store, "local", None)
            .unwrap();

        assert!(session.authorize_role_str("admin").is_ok());
        assert!(session.authorize_role_str("Admin").is_ok());
        assert!(session.authorize_role_str("ADMIN").is_ok());
        assert!(session.authorize_role_str("user").is_err());
    }

    #[test]
    fn test_logout_then_guard_denies() {
        let mut store = MemoryIdentityStore::new();
        let mut session = SessionIdentity::anonymous();
        session
            .login(Identity::new("alice", Role::Admin), &mut store, "local", None)
            .unwrap();
        assert!(session.authorize(Some(Role::Admin)).is_ok());

        session.logout(&mut store, "local").unwrap();
        assert!(session.authorize(Some(Role::Admin)).is_err());

        // And a fresh restore stays anonymous
        let restored = SessionIdentity::restore(&store, "local");
        assert!(restored.authorize(Some(Role::Admin)).is_err());
    }
}
