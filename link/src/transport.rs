//! HTTP plumbing shared by all endpoint operations.
//!
//! Wraps a single `reqwest::Client` with the base URL, authentication and
//! retry policy. Transport-level failures (connect errors, timeouts) are
//! retried with linear backoff; business failures are never retried, the
//! server message is extracted from the response body and surfaced to the
//! caller verbatim.

use crate::{
    auth::AuthProvider,
    error::{ApiError, Result},
    models::ErrorBody,
};
use log::{debug, warn};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Clone)]
enum Payload {
    None,
    Json(serde_json::Value),
}

#[derive(Clone)]
pub(crate) struct Transport {
    base_url: String,
    http: reqwest::Client,
    auth: AuthProvider,
    max_retries: u32,
}

impl Transport {
    pub(crate) fn new(
        base_url: String,
        http: reqwest::Client,
        auth: AuthProvider,
        max_retries: u32,
    ) -> Self {
        Self {
            base_url,
            http,
            auth,
            max_retries,
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET returning a JSON body
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self.execute(Method::GET, path, query, Payload::None).await?;
        decode_json(response).await
    }

    /// GET returning raw bytes (file downloads)
    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let response = self.execute(Method::GET, path, &[], Payload::None).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// POST with a JSON body, returning a JSON body
    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let payload = to_payload(body)?;
        let response = self.execute(Method::POST, path, &[], payload).await?;
        decode_json(response).await
    }

    /// POST with a JSON body, discarding the response body
    pub(crate) async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let payload = to_payload(body)?;
        self.execute(Method::POST, path, &[], payload).await?;
        Ok(())
    }

    /// PUT with a JSON body, returning a JSON body
    pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let payload = to_payload(body)?;
        let response = self.execute(Method::PUT, path, &[], payload).await?;
        decode_json(response).await
    }

    /// PUT with a JSON body, discarding the response body
    pub(crate) async fn put_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let payload = to_payload(body)?;
        self.execute(Method::PUT, path, &[], payload).await?;
        Ok(())
    }

    /// DELETE, discarding the response body
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.execute(Method::DELETE, path, &[], Payload::None)
            .await?;
        Ok(())
    }

    /// PUT a multipart form, returning a JSON body.
    ///
    /// Multipart bodies cannot be rebuilt after a send, so no retry is
    /// attempted.
    pub(crate) async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let url = self.url(path);
        debug!("[HTTP] PUT multipart {}", url);
        let request = self.auth.apply_to_request(self.http.put(&url)).multipart(form);
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(status, response).await);
        }
        decode_json(response).await
    }

    /// Send a request, retrying transport-level failures.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        payload: Payload,
    ) -> Result<Response> {
        let url = self.url(path);
        let mut retries = 0;
        let overall_start = Instant::now();

        loop {
            // Build the request fresh on each attempt
            let mut request = self.http.request(method.clone(), &url);
            if !query.is_empty() {
                request = request.query(query);
            }
            if let Payload::Json(ref value) = payload {
                request = request.json(value);
            }
            request = self.auth.apply_to_request(request);

            let attempt_start = Instant::now();
            debug!(
                "[HTTP] {} {} (attempt {}/{})",
                method,
                url,
                retries + 1,
                self.max_retries + 1
            );

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    debug!(
                        "[HTTP] Response: status={} duration_ms={}",
                        status,
                        attempt_start.elapsed().as_millis()
                    );

                    if status.is_success() {
                        return Ok(response);
                    }
                    return Err(error_from_response(status, response).await);
                }
                Err(e) if retries < self.max_retries && is_retriable(&e) => {
                    warn!(
                        "[HTTP] Retriable error (attempt {}/{}): {}",
                        retries + 1,
                        self.max_retries + 1,
                        e
                    );
                    retries += 1;
                    tokio::time::sleep(tokio::time::Duration::from_millis(100 * retries as u64))
                        .await;
                }
                Err(e) => {
                    warn!(
                        "[HTTP] Fatal error: {} total_ms={}",
                        e,
                        overall_start.elapsed().as_millis()
                    );
                    return Err(e.into());
                }
            }
        }
    }
}

fn is_retriable(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}

fn to_payload<B: Serialize>(body: &B) -> Result<Payload> {
    let value =
        serde_json::to_value(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(Payload::Json(value))
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ApiError::Serialization(e.to_string()))
}

/// Extract the user-facing message from a failed response.
///
/// The backend reports errors either as `{"message": …}`, as
/// `{"error": …}`, or as a bare string body. 404s become page-level
/// not-found errors; everything else keeps its status code.
async fn error_from_response(status: StatusCode, response: Response) -> ApiError {
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    let message = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.into_message().unwrap_or(text),
        Err(_) => text,
    };
    let message = if message.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        message
    };

    if status == StatusCode::NOT_FOUND {
        ApiError::NotFound(message)
    } else {
        ApiError::Server {
            status_code: status.as_u16(),
            message,
        }
    }
}
