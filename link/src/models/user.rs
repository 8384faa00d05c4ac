use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::contains_ci;
use crate::error::{ApiError, Result};

/// Account role controlling which dashboard and guarded views are reachable.
///
/// Roles compare case-insensitively everywhere; wire values such as
/// `"ROLE_ADMIN"` or `"admin"` normalize to the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Parse a role string, stripping an optional `ROLE_` prefix and
    /// ignoring case. Returns `None` for unknown roles.
    pub fn parse_normalized(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let stripped = trimmed
            .strip_prefix("ROLE_")
            .or_else(|| trimmed.strip_prefix("role_"))
            .unwrap_or(trimmed);
        if stripped.eq_ignore_ascii_case("ADMIN") {
            Some(Role::Admin)
        } else if stripped.eq_ignore_ascii_case("USER") {
            Some(Role::User)
        } else {
            None
        }
    }

    /// Canonical uppercase wire form
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    /// Case-insensitive comparison against a raw role string
    pub fn matches(&self, other: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(other.trim())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Role::parse_normalized(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown role '{}'", raw)))
    }
}

/// A registered account as returned by the user endpoints.
///
/// The password never appears in responses; it exists only on the
/// write-side request types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// Substring search over username and email (case-insensitive)
    pub fn matches(&self, query: &str) -> bool {
        contains_ci(&self.username, query) || contains_ci(&self.email, query)
    }
}

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response: the identity the backend vouches for.
///
/// The role arrives as a raw string (possibly `ROLE_`-prefixed) and is
/// normalized by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginReply {
    pub username: String,
    pub role: String,
}

/// Self-service registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl RegisterRequest {
    /// New registration with the default USER role
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            role: Role::User,
        }
    }

    /// Local validation, run before any request is sent.
    ///
    /// Rules are checked in order and the first failure wins.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(ApiError::validation("Username is required."));
        }
        if self.email.trim().is_empty() {
            return Err(ApiError::validation("Email is required."));
        }
        if self.password.trim().is_empty() {
            return Err(ApiError::validation("Password is required."));
        }
        validate_password(&self.password)
    }
}

const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// Password policy: at least 8 characters, one letter, one digit and one
/// special character, drawn only from letters, digits and `@$!%*?&`.
pub(crate) fn validate_password(password: &str) -> Result<()> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c);
    let ok = password.len() >= 8
        && password.chars().all(allowed)
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c));
    if ok {
        Ok(())
    } else {
        Err(ApiError::validation(
            "Password must be at least 8 characters long, include a letter, a number, and a special character.",
        ))
    }
}

/// Admin-side user creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl NewUser {
    /// Local validation mirroring [`RegisterRequest::validate`]
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(ApiError::validation("Username is required."));
        }
        if self.email.trim().is_empty() {
            return Err(ApiError::validation("Email is required."));
        }
        if self.password.trim().is_empty() {
            return Err(ApiError::validation("Password is required."));
        }
        validate_password(&self.password)
    }
}

/// Admin-side user update (no password changes through this path)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub username: String,
    pub email: String,
    pub role: Role,
}
