//! NoteRepository: the only path by which notes cross the network.

use super::client::ApiClient;
use crate::error::ApiError;
use async_trait::async_trait;
use note_canvas_types::{Ack, Note, NoteDraft};
use std::sync::Arc;

/// Remote CRUD for notes. Each call is a single request/response exchange;
/// nothing here retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// The complete note collection of the authenticated user.
    async fn fetch_all(&self) -> Result<Vec<Note>, ApiError>;

    /// Create a note; the returned note carries the server-assigned id.
    async fn create(&self, draft: &NoteDraft) -> Result<Note, ApiError>;

    /// Replace the note stored under `id` with `note` in full.
    async fn update(&self, id: &str, note: &Note) -> Result<Note, ApiError>;

    async fn remove(&self, id: &str) -> Result<(), ApiError>;
}

/// NoteRepository over the service's REST routes.
pub struct HttpNoteRepository {
    api: Arc<ApiClient>,
}

impl HttpNoteRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

fn note_path(id: &str) -> String {
    format!("/notes/{}", urlencoding::encode(id))
}

/// Human-readable acknowledgement of a delete: the `msg` of a JSON ack, or
/// the body text as-is.
fn ack_message(body: &str) -> String {
    match serde_json::from_str::<Ack>(body) {
        Ok(Ack { msg: Some(msg), .. }) => msg,
        _ => body.trim().to_string(),
    }
}

#[async_trait]
impl NoteRepository for HttpNoteRepository {
    async fn fetch_all(&self) -> Result<Vec<Note>, ApiError> {
        let notes: Vec<Note> = self.api.get("/notes").await?;
        log::debug!("[API] Fetched {} notes", notes.len());
        Ok(notes)
    }

    async fn create(&self, draft: &NoteDraft) -> Result<Note, ApiError> {
        let note: Note = self.api.post("/notes", draft).await?;
        log::debug!("[API] Created note {}", note.id);
        Ok(note)
    }

    async fn update(&self, id: &str, note: &Note) -> Result<Note, ApiError> {
        self.api.put(&note_path(id), note).await
    }

    async fn remove(&self, id: &str) -> Result<(), ApiError> {
        let body = self.api.delete(&note_path(id)).await?;
        log::debug!("[API] Removed note {}: {}", id, ack_message(&body));
        Ok(())
    }
}
