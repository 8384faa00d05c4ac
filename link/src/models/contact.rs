use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// Contact form submission.
///
/// The captcha token is an opaque pass-through; the client performs no
/// captcha verification of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captcha_token: Option<String>,
}

impl ContactMessage {
    /// Local validation: all fields required, structurally valid email.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.subject.trim().is_empty()
            || self.message.trim().is_empty()
        {
            return Err(ApiError::validation("All fields are required!"));
        }
        if !looks_like_email(&self.email) {
            return Err(ApiError::validation("Please enter a valid email!"));
        }
        Ok(())
    }
}

/// Structural email check: non-empty local part, an `@`, and a dot in the
/// domain. Deliverability is the backend's problem.
fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.trim().is_empty()
        && !local.contains(char::is_whitespace)
        && domain.contains('.')
        && !domain.contains(char::is_whitespace)
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
