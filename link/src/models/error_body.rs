use serde::{Deserialize, Serialize};

/// Error payload returned by the backend on failed requests.
///
/// Different endpoints use `message` or `error`; both are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    /// The server-provided message, preferring `message` over `error`.
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_preferred_over_error() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message": "Invalid dates", "error": "ignored"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Invalid dates"));
    }

    #[test]
    fn test_error_field_fallback() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": "Invalid username or password"}"#).unwrap();
        assert_eq!(
            body.into_message().as_deref(),
            Some("Invalid username or password")
        );
    }

    #[test]
    fn test_empty_body() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.into_message(), None);
    }
}
