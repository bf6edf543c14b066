//! Fixtures shared by unit tests.

use crate::api::NoteRepository;
use crate::error::ApiError;
use async_trait::async_trait;
use note_canvas_types::{Note, NoteDraft};
use parking_lot::Mutex;
use serde_json::Map;
use std::collections::VecDeque;
use std::time::Duration;

pub fn note(id: &str, title: &str) -> Note {
    Note {
        id: id.to_string(),
        title: title.to_string(),
        content: String::new(),
        created_at: "2024-09-23T10:00:00Z".to_string(),
        color_tag: "bg-blue-300".to_string(),
        is_favorite: false,
        is_task: false,
        is_completed: false,
        reminder: None,
        highlights: vec![],
        images: vec![],
        urls: vec![],
        extra: Map::new(),
    }
}

pub fn from_draft(id: &str, draft: &NoteDraft) -> Note {
    Note {
        id: id.to_string(),
        title: draft.title.clone(),
        content: draft.content.clone(),
        created_at: draft.created_at.clone(),
        color_tag: draft.color_tag.clone(),
        is_favorite: draft.is_favorite,
        is_task: draft.is_task,
        is_completed: draft.is_completed,
        reminder: draft.reminder.clone(),
        highlights: draft.highlights.clone(),
        images: draft.images.clone(),
        urls: draft.urls.clone(),
        extra: Map::new(),
    }
}

/// In-memory stand-in for the notes service.
///
/// Requests take effect on the "server" the moment they arrive. Updates can
/// be given a response latency (popped per call, in issue order) so that
/// responses complete out of order.
#[derive(Default)]
pub struct FakeRemote {
    notes: Mutex<Vec<Note>>,
    next_id: Mutex<u64>,
    update_delays: Mutex<VecDeque<Duration>>,
}

impl FakeRemote {
    pub fn with_notes(notes: Vec<Note>) -> Self {
        let remote = Self::default();
        *remote.notes.lock() = notes;
        *remote.next_id.lock() = 100;
        remote
    }

    pub fn delay_updates(&self, delays: &[Duration]) {
        self.update_delays.lock().extend(delays.iter().copied());
    }

    pub fn snapshot(&self) -> Vec<Note> {
        self.notes.lock().clone()
    }
}

#[async_trait]
impl NoteRepository for FakeRemote {
    async fn fetch_all(&self) -> Result<Vec<Note>, ApiError> {
        Ok(self.snapshot())
    }

    async fn create(&self, draft: &NoteDraft) -> Result<Note, ApiError> {
        let id = {
            let mut next = self.next_id.lock();
            *next += 1;
            next.to_string()
        };
        let note = from_draft(&id, draft);
        self.notes.lock().push(note.clone());
        Ok(note)
    }

    async fn update(&self, id: &str, note: &Note) -> Result<Note, ApiError> {
        let delay = self.update_delays.lock().pop_front();
        let stored = {
            let mut notes = self.notes.lock();
            let slot = notes
                .iter_mut()
                .find(|n| n.id == id)
                .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
            *slot = note.clone();
            slot.clone()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(stored)
    }

    async fn remove(&self, id: &str) -> Result<(), ApiError> {
        let mut notes = self.notes.lock();
        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() == before {
            return Err(ApiError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
