//! Main Staybook client with builder pattern.
//!
//! Provides the primary interface for connecting to a Staybook backend
//! and executing typed operations against its REST endpoints.

use std::time::Duration;

use log::debug;

use crate::{
    auth::AuthProvider,
    error::{ApiError, Result},
    models::{LoginReply, LoginRequest, RegisterRequest, Role},
    session::Identity,
    transport::Transport,
};

/// Main Staybook API client.
///
/// Wraps a fixed base URL and a cookie-holding HTTP client; every request
/// carries the session credential automatically. Use
/// [`ApiClientBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust,no_run
/// use staybook_link::ApiClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::builder()
///     .base_url("http://localhost:8080/api")
///     .timeout(std::time::Duration::from_secs(30))
///     .build()?;
///
/// let hotels = client.hotels().await?;
/// println!("{} hotels", hotels.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) transport: Transport,
}

impl ApiClient {
    /// Create a new builder for configuring the client
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    /// The configured base URL
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Authenticate with username and password.
    ///
    /// On success the backend sets the session cookie on this client and
    /// returns the identity it vouches for. The role string is normalized
    /// (a `ROLE_` prefix is stripped and case is ignored); an
    /// unrecognized role is an authentication error.
    pub async fn login(&self, username: &str, password: &str) -> Result<Identity> {
        debug!("[LOGIN] Authenticating user '{}'", username);
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let reply: LoginReply = self
            .transport
            .post_json("/auth/login", &request)
            .await
            .map_err(|e| match e {
                // Login failures should read as auth errors, not generic
                // server errors
                ApiError::Server { message, .. } => ApiError::Authentication(if message.is_empty() {
                    "Invalid username or password".to_string()
                } else {
                    message
                }),
                other => other,
            })?;

        let role = Role::parse_normalized(&reply.role).ok_or_else(|| {
            ApiError::Authentication("Unknown role. Please contact support.".to_string())
        })?;
        debug!("[LOGIN] Authenticated '{}' as {}", reply.username, role);
        Ok(Identity {
            username: reply.username,
            role,
        })
    }

    /// Register a new account (USER role by default).
    ///
    /// Local validation runs first; nothing is sent if it fails.
    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        request.validate()?;
        self.transport.post_unit("/auth/register", request).await
    }
}

/// Builder for configuring [`ApiClient`] instances.
pub struct ApiClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
    connect_timeout: Duration,
    max_retries: u32,
    auth: AuthProvider,
}

impl ApiClientBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_retries: 3,
            auth: AuthProvider::none(),
        }
    }

    /// Set the base URL for the backend, including the API prefix
    /// (e.g. `http://localhost:8080/api`)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        while url.ends_with('/') {
            url.pop();
        }
        self.base_url = Some(url);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connection timeout (TCP + TLS handshake)
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set maximum number of retries for transport-level failures
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set an explicit authentication provider (bearer token deployments)
    pub fn auth(mut self, auth: AuthProvider) -> Self {
        self.auth = auth;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ApiError::Configuration("base_url is required".into()))?;

        // Cookie store carries the login credential; keep-alive pooling
        // keeps repeated dashboard fetches on warm connections.
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .cookie_store(true)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        Ok(ApiClient {
            transport: Transport::new(base_url, http, self.auth, self.max_retries),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_pattern() {
        let result = ApiClient::builder()
            .base_url("http://localhost:8080/api")
            .timeout(Duration::from_secs(10))
            .max_retries(1)
            .build();

        assert!(result.is_ok());
        assert_eq!(result.unwrap().base_url(), "http://localhost:8080/api");
    }

    #[test]
    fn test_builder_missing_url() {
        let result = ApiClient::builder().build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_strips_trailing_slash() {
        let client = ApiClient::builder()
            .base_url("http://localhost:8080/api/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api");
    }
}
