//! NoteStore: in-memory cache of the user's notes.
//!
//! Mutations are confirm-then-apply: the remote call runs first and the cache
//! changes only once it succeeds, so a failure never leaves a partial or
//! speculative entry behind. Updates submit and replace the whole note.
//!
//! Calls take `&self` and never hold the cache lock across an `.await`, so
//! several mutations can be in flight together. Their responses are applied
//! in completion order, not issue order: two updates of the same note racing
//! each other end with whichever response lands last, and the other change
//! is lost from the cache.

use crate::api::NoteRepository;
use crate::error::ApiError;
use crate::filter::NoteFilter;
use note_canvas_types::{Note, NoteDraft};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Cached notes in display order, plus the active selection.
#[derive(Default)]
struct CacheState {
    notes: Vec<Note>,
    active: Option<String>,
}

impl CacheState {
    fn position(&self, id: &str) -> Option<usize> {
        self.notes.iter().position(|n| n.id == id)
    }

    /// Replace in place when the id is known, append otherwise.
    fn upsert(&mut self, note: Note) {
        match self.position(&note.id) {
            Some(idx) => self.notes[idx] = note,
            None => self.notes.push(note),
        }
    }

    fn replace_all(&mut self, fetched: Vec<Note>) {
        self.notes.clear();
        for note in fetched {
            self.upsert(note);
        }
        if let Some(active) = self.active.take() {
            if self.position(&active).is_some() {
                self.active = Some(active);
            }
        }
    }
}

/// One in-flight remote call. Dropping it leaves the pending state.
struct PendingCall<'a> {
    counter: &'a AtomicUsize,
    op: &'static str,
    id: String,
}

impl<'a> PendingCall<'a> {
    fn start(counter: &'a AtomicUsize, op: &'static str, id: &str) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        log::debug!("[NOTE_STORE] {} {}: pending", op, id);
        Self {
            counter,
            op,
            id: id.to_string(),
        }
    }

    fn finish<T>(self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        match &result {
            Ok(_) => log::debug!("[NOTE_STORE] {} {}: applied", self.op, self.id),
            Err(e) => log::warn!("[NOTE_STORE] {} {}: failed: {}", self.op, self.id, e),
        }
        result
    }
}

impl Drop for PendingCall<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct NoteStore {
    repo: Arc<dyn NoteRepository>,
    state: Mutex<CacheState>,
    pending: AtomicUsize,
}

impl NoteStore {
    pub fn new(repo: Arc<dyn NoteRepository>) -> Self {
        Self {
            repo,
            state: Mutex::new(CacheState::default()),
            pending: AtomicUsize::new(0),
        }
    }

    // ── Remote round-trips ──────────────────────────────

    /// Replace the whole cache with the server's collection. On failure the
    /// cache is left as it was.
    pub async fn load(&self) -> Result<usize, ApiError> {
        let call = PendingCall::start(&self.pending, "load", "*");
        let fetched = call.finish(self.repo.fetch_all().await)?;

        let mut state = self.state.lock();
        state.replace_all(fetched);
        log::info!("[NOTE_STORE] Loaded {} notes", state.notes.len());
        Ok(state.notes.len())
    }

    /// Create a note remotely, then cache it and make it the active one.
    pub async fn create(&self, draft: NoteDraft) -> Result<Note, ApiError> {
        let call = PendingCall::start(&self.pending, "create", "-");
        let created = call.finish(self.repo.create(&draft).await)?;

        let mut state = self.state.lock();
        state.upsert(created.clone());
        state.active = Some(created.id.clone());
        Ok(created)
    }

    /// Submit `note` in full and replace the cached entry with the server's
    /// answer. The updated note becomes the active one.
    ///
    /// If the note was removed while this call was in flight the answer is
    /// dropped rather than re-inserted. An answer under a different id takes
    /// the submitted note's place and evicts any other entry with that id.
    pub async fn update(&self, note: Note) -> Result<Note, ApiError> {
        let call = PendingCall::start(&self.pending, "update", &note.id);
        let confirmed = call.finish(self.repo.update(&note.id, &note).await)?;

        let mut state = self.state.lock();
        if state.position(&note.id).is_none() {
            log::debug!(
                "[NOTE_STORE] update {}: no longer cached, response dropped",
                note.id
            );
            return Ok(confirmed);
        }
        if confirmed.id != note.id {
            log::warn!(
                "[NOTE_STORE] update {}: server answered with id {}",
                note.id,
                confirmed.id
            );
            state.notes.retain(|n| n.id != confirmed.id);
        }
        if let Some(idx) = state.position(&note.id) {
            state.notes[idx] = confirmed.clone();
        }
        state.active = Some(confirmed.id.clone());
        Ok(confirmed)
    }

    /// Delete remotely, then drop the entry (and the selection, if it was
    /// this note).
    pub async fn remove(&self, id: &str) -> Result<(), ApiError> {
        let call = PendingCall::start(&self.pending, "remove", id);
        call.finish(self.repo.remove(id).await)?;

        let mut state = self.state.lock();
        state.notes.retain(|n| n.id != id);
        if state.active.as_deref() == Some(id) {
            state.active = None;
        }
        Ok(())
    }

    // ── Derived mutations ───────────────────────────────
    //
    // Each reads the cached note, edits a copy and goes through `update`.
    // `Ok(None)` means the id was not cached and nothing was sent.

    pub async fn modify<F>(&self, id: &str, edit: F) -> Result<Option<Note>, ApiError>
    where
        F: FnOnce(&mut Note) + Send,
    {
        let Some(mut note) = self.get(id) else {
            log::debug!("[NOTE_STORE] modify {}: not cached", id);
            return Ok(None);
        };
        edit(&mut note);
        self.update(note).await.map(Some)
    }

    pub async fn toggle_favorite(&self, id: &str) -> Result<Option<Note>, ApiError> {
        self.modify(id, |n| n.is_favorite = !n.is_favorite).await
    }

    /// Flip the task flag. `is_completed` is kept as-is either way.
    pub async fn toggle_task(&self, id: &str) -> Result<Option<Note>, ApiError> {
        self.modify(id, |n| n.is_task = !n.is_task).await
    }

    pub async fn toggle_completed(&self, id: &str) -> Result<Option<Note>, ApiError> {
        self.modify(id, |n| n.is_completed = !n.is_completed).await
    }

    pub async fn set_reminder(&self, id: &str, reminder: Option<String>) -> Result<Option<Note>, ApiError> {
        self.modify(id, |n| n.reminder = reminder).await
    }

    pub async fn set_title(&self, id: &str, title: &str) -> Result<Option<Note>, ApiError> {
        let title = title.to_string();
        self.modify(id, |n| n.title = title).await
    }

    pub async fn set_content(&self, id: &str, content: &str) -> Result<Option<Note>, ApiError> {
        let content = content.to_string();
        self.modify(id, |n| n.content = content).await
    }

    pub async fn add_highlight(&self, id: &str, highlight: &str) -> Result<Option<Note>, ApiError> {
        let highlight = highlight.to_string();
        self.modify(id, |n| n.highlights.push(highlight)).await
    }

    /// Attach an image reference (typically a `data:` URL).
    pub async fn add_image(&self, id: &str, image: &str) -> Result<Option<Note>, ApiError> {
        let image = image.to_string();
        self.modify(id, |n| n.images.push(image)).await
    }

    pub async fn add_url(&self, id: &str, url: &str) -> Result<Option<Note>, ApiError> {
        let url = url.to_string();
        self.modify(id, |n| n.urls.push(url)).await
    }

    // ── Reads ───────────────────────────────────────────

    /// Snapshot of the cache in display order.
    pub fn notes(&self) -> Vec<Note> {
        self.state.lock().notes.clone()
    }

    pub fn get(&self, id: &str) -> Option<Note> {
        let state = self.state.lock();
        state.position(id).map(|idx| state.notes[idx].clone())
    }

    pub fn len(&self) -> usize {
        self.state.lock().notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().notes.is_empty()
    }

    /// Notes visible under `filter`, in cache order.
    pub fn visible(&self, filter: &NoteFilter) -> Vec<Note> {
        filter.apply(&self.state.lock().notes)
    }

    /// Number of remote calls currently awaiting a response.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    // ── Selection ───────────────────────────────────────

    pub fn active(&self) -> Option<Note> {
        let state = self.state.lock();
        let id = state.active.as_deref()?;
        state.position(id).map(|idx| state.notes[idx].clone())
    }

    pub fn active_id(&self) -> Option<String> {
        self.state.lock().active.clone()
    }

    /// Select a cached note. Returns false for an unknown id.
    pub fn select(&self, id: &str) -> bool {
        let mut state = self.state.lock();
        if state.position(id).is_some() {
            state.active = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&self) {
        self.state.lock().active = None;
    }

    /// Drop everything cached, e.g. on logout.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.notes.clear();
        state.active = None;
    }
}
