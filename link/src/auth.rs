//! Authentication header handling for the Staybook client.
//!
//! The primary credential is the HTTP session cookie issued by
//! `/auth/login` and carried automatically by the client's cookie store.
//! A bearer token can be attached instead for deployments that hand out
//! tokens directly.

/// Authentication mode for outgoing requests.
#[derive(Debug, Clone, Default)]
pub enum AuthProvider {
    /// Bearer token authentication (`Authorization: Bearer <token>`)
    Bearer(String),

    /// Cookie-only authentication (default): the session cookie set at
    /// login is the sole credential
    #[default]
    None,
}

impl AuthProvider {
    /// Create bearer token authentication
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(token.into())
    }

    /// Cookie-only authentication
    pub fn none() -> Self {
        Self::None
    }

    /// Attach authentication headers to an HTTP request builder
    pub fn apply_to_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::Bearer(token) => request.bearer_auth(token),
            Self::None => request,
        }
    }

    /// True when an explicit header credential is configured
    pub fn has_token(&self) -> bool {
        matches!(self, Self::Bearer(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_provider_creation() {
        let bearer = AuthProvider::bearer("token123");
        assert!(bearer.has_token());

        let none = AuthProvider::none();
        assert!(!none.has_token());
    }

    #[test]
    fn test_apply_does_not_error() {
        let client = reqwest::Client::new();
        let request = client.get("http://localhost:8080/api/hotels/all");
        let _ = AuthProvider::bearer("abc").apply_to_request(request);
    }
}
