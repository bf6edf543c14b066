//! AuthSession: owns the credential and attaches it to outgoing requests.
//!
//! The token lives in two places: an in-memory slot and the durable local
//! store. `set_token`/`clear_token` write both; the request interceptor
//! reads the durable copy right before each dispatch, so a token written by
//! another session context sharing the same store is picked up too.

use crate::error::StorageError;
use crate::storage::{LocalStore, TOKEN_KEY};
use parking_lot::RwLock;
use reqwest::RequestBuilder;
use std::sync::Arc;

/// Header carrying the raw token value (no bearer scheme).
pub const AUTH_HEADER: &str = "x-auth-token";

pub struct AuthSession {
    store: Arc<dyn LocalStore>,
    token: RwLock<Option<String>>,
}

impl AuthSession {
    /// Empty session; nothing is read from the store.
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self {
            store,
            token: RwLock::new(None),
        }
    }

    /// Session reloaded from the durable store, as done at process start.
    pub fn restore(store: Arc<dyn LocalStore>) -> Self {
        let token = match store.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log::warn!("[AUTH] Could not read persisted token: {}", e);
                None
            }
        };
        if token.is_some() {
            log::debug!("[AUTH] Restored persisted token");
        }
        Self {
            store,
            token: RwLock::new(token),
        }
    }

    /// Store a token on disk, then in memory. If the store cannot be written
    /// nothing changes. An empty token clears instead.
    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        if token.is_empty() {
            return self.clear_token();
        }
        self.store.set(TOKEN_KEY, token)?;
        *self.token.write() = Some(token.to_string());
        log::info!("[AUTH] Token stored");
        Ok(())
    }

    /// Remove the token from the store, then from memory. If the store
    /// cannot be updated the session is left as it was.
    pub fn clear_token(&self) -> Result<(), StorageError> {
        self.store.remove(TOKEN_KEY)?;
        *self.token.write() = None;
        log::info!("[AUTH] Token cleared");
        Ok(())
    }

    /// Token held in the in-memory slot.
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Token currently persisted in the durable store.
    pub fn persisted_token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log::warn!("[AUTH] Could not read token, sending unauthenticated: {}", e);
                None
            }
        }
    }

    /// Request interceptor: attach the persisted token, if any.
    pub fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.persisted_token() {
            Some(token) => request.header(AUTH_HEADER, token),
            None => request,
        }
    }

    pub fn store(&self) -> &Arc<dyn LocalStore> {
        &self.store
    }
}
