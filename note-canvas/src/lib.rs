//! Note Canvas client: keeps an in-memory note collection in step with the
//! notes service and derives filtered views of it.

pub mod api;
pub mod cli;
pub mod config;
pub mod context;
pub mod draft;
pub mod error;
pub mod filter;
pub mod session;
pub mod storage;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{ApiClient, AuthApi, HttpNoteRepository, NoteRepository};
pub use config::Config;
pub use context::NoteCanvas;
pub use error::{ApiError, StorageError};
pub use filter::{Category, NoteFilter, filter_notes};
pub use note_canvas_types::{Note, NoteDraft};
pub use session::{AUTH_HEADER, AuthSession};
pub use storage::{FileStore, LocalStore, MemoryStore};
pub use store::NoteStore;
