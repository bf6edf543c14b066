//! Typed HTTP client for the notes service.
//!
//! Every request goes through [`ApiClient::execute`], which runs the auth
//! interceptor, sends once (no retries) and classifies the outcome.

use crate::error::ApiError;
use crate::session::AuthSession;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Longest slice of a non-JSON error body kept in an error message.
const MAX_ERROR_BODY: usize = 200;

pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    session: Arc<AuthSession>,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Arc<AuthSession>) -> Self {
        Self::with_client(base_url, reqwest::Client::new(), session)
    }

    pub fn with_client(base_url: &str, client: reqwest::Client, session: Arc<AuthSession>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<AuthSession> {
        &self.session
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(Method::GET, path, None::<&()>).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::PUT, path, Some(body)).await
    }

    /// DELETE whose success body is returned as raw text. Services answer a
    /// delete with anything from JSON to plain text, so it is never decoded.
    pub(crate) async fn delete(&self, path: &str) -> Result<String, ApiError> {
        self.dispatch(Method::DELETE, path, None::<&()>).await.map(|(_, text)| text)
    }

    async fn execute<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (status, text) = self.dispatch(method, path, body).await?;
        let text = if text.trim().is_empty() { "{}" } else { text.as_str() };
        serde_json::from_str(text).map_err(|e| ApiError::Server {
            status: status.as_u16(),
            message: format!("unexpected response body: {}", e),
        })
    }

    /// Send once and classify the status. Returns the body of a 2xx answer.
    async fn dispatch<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<(StatusCode, String), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request: RequestBuilder = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        // interceptor runs last so the token read is as late as possible
        let request = self.session.authorize(request);

        let resp = request.send().await.map_err(|e| {
            log::warn!("[API] {} {} failed: {}", method, path, e);
            ApiError::Network(e.to_string())
        })?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read response body: {}", e)))?;

        log::debug!("[API] {} {} -> {}", method, path, status);

        if !status.is_success() {
            let message = error_message(&text)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            return Err(ApiError::from_status(status, message));
        }

        Ok((status, text))
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"msg": ..}`, `{"message": ..}`, `{"error": ..}` and the
/// `{"errors": [{"msg": ..}, ..]}` list shape; anything else is returned as
/// truncated raw text.
fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["msg", "message", "error"] {
            if let Some(text) = json.get(key).and_then(|v| v.as_str()) {
                return Some(text.to_string());
            }
        }
        if let Some(errors) = json.get("errors").and_then(|v| v.as_array()) {
            let msgs: Vec<&str> = errors
                .iter()
                .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
                .collect();
            if !msgs.is_empty() {
                return Some(msgs.join("; "));
            }
        }
    }

    Some(body.chars().take(MAX_ERROR_BODY).collect())
}
