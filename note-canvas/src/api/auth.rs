//! Account routes: register, login and the current-user lookup.

use super::client::ApiClient;
use crate::error::ApiError;
use note_canvas_types::{AuthResponse, LoginRequest, RegisterRequest, UserInfo};
use std::sync::Arc;

pub struct AuthApi {
    api: Arc<ApiClient>,
}

impl AuthApi {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Create an account. A token in the response is stored right away, and
    /// failing to store it fails the call.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp: AuthResponse = self.api.post("/auth/register", &body).await?;
        self.adopt_token(&resp)?;
        log::info!("[AUTH] Registered {}", email);
        Ok(resp)
    }

    /// Log in and store the returned token. A success response without a
    /// token, or a token that cannot be persisted, is a failed login.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp: AuthResponse = self.api.post("/auth/login", &body).await?;
        if !self.adopt_token(&resp)? {
            return Err(ApiError::Auth("login response carried no token".to_string()));
        }
        log::info!("[AUTH] Logged in as {}", email);
        Ok(resp)
    }

    pub async fn current_user(&self) -> Result<UserInfo, ApiError> {
        self.api.get("/auth").await
    }

    /// Forget the credential. No request is made.
    pub fn logout(&self) {
        if let Err(e) = self.api.session().clear_token() {
            log::warn!("[AUTH] Failed to clear persisted token: {}", e);
        }
    }

    /// Persist the token carried by `resp`. `Ok(false)` when there is none.
    fn adopt_token(&self, resp: &AuthResponse) -> Result<bool, ApiError> {
        match resp.token.as_deref() {
            Some(token) if !token.is_empty() => {
                self.api.session().set_token(token).map_err(|e| {
                    log::error!("[AUTH] Failed to persist token: {}", e);
                    ApiError::Storage(e)
                })?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
