//! NoteCanvas: one explicitly constructed session context.
//!
//! Bundles the credential, the account routes and the note cache so callers
//! pass a single value around instead of reaching for process globals.
//! Constructing it starts a session; `logout` tears the session state down.

use crate::api::{ApiClient, AuthApi, HttpNoteRepository, NoteRepository};
use crate::config::Config;
use crate::error::ApiError;
use crate::session::AuthSession;
use crate::storage::{FileStore, LocalStore, USER_NAME_KEY};
use crate::store::NoteStore;
use note_canvas_types::{AuthResponse, UserInfo};
use std::sync::Arc;

pub struct NoteCanvas {
    session: Arc<AuthSession>,
    auth: AuthApi,
    notes: NoteStore,
}

impl NoteCanvas {
    /// Context backed by the file store and HTTP client described by `config`.
    pub fn from_config(config: &Config) -> Self {
        let store: Arc<dyn LocalStore> = Arc::new(FileStore::new(config.storage_path()));
        let session = Arc::new(AuthSession::restore(store));
        let api = Arc::new(ApiClient::new(&config.api_url, session.clone()));
        let repo: Arc<dyn NoteRepository> = Arc::new(HttpNoteRepository::new(api.clone()));
        Self::new(session, AuthApi::new(api), repo)
    }

    pub fn new(session: Arc<AuthSession>, auth: AuthApi, repo: Arc<dyn NoteRepository>) -> Self {
        Self {
            session,
            auth,
            notes: NoteStore::new(repo),
        }
    }

    pub fn session(&self) -> &Arc<AuthSession> {
        &self.session
    }

    pub fn notes(&self) -> &NoteStore {
        &self.notes
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_authenticated()
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let resp = self.auth.register(name, email, password).await?;
        self.remember_user_name(Some(name));
        Ok(resp)
    }

    /// Log in, then look up and cache the display name. A failed lookup does
    /// not fail the login.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let resp = self.auth.login(email, password).await?;
        match self.auth.current_user().await {
            Ok(user) => self.remember_user_name(user.name.as_deref()),
            Err(e) => log::warn!("[AUTH] Could not fetch user info after login: {}", e),
        }
        Ok(resp)
    }

    pub async fn current_user(&self) -> Result<UserInfo, ApiError> {
        self.auth.current_user().await
    }

    /// Display name cached at login, if any.
    pub fn user_name(&self) -> Option<String> {
        self.session
            .store()
            .get(USER_NAME_KEY)
            .unwrap_or_else(|e| {
                log::warn!("[AUTH] Could not read cached user name: {}", e);
                None
            })
    }

    /// Clear the credential, the cached user name and the note cache.
    pub fn logout(&self) {
        self.auth.logout();
        if let Err(e) = self.session.store().remove(USER_NAME_KEY) {
            log::warn!("[AUTH] Could not clear cached user name: {}", e);
        }
        self.notes.clear();
        log::info!("[AUTH] Logged out");
    }

    fn remember_user_name(&self, name: Option<&str>) {
        let Some(name) = name.filter(|n| !n.is_empty()) else {
            return;
        };
        if let Err(e) = self.session.store().set(USER_NAME_KEY, name) {
            log::warn!("[AUTH] Could not cache user name: {}", e);
        }
    }
}
