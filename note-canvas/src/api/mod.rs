pub mod auth;
pub mod client;
pub mod notes;

pub use auth::AuthApi;
pub use client::ApiClient;
pub use notes::{HttpNoteRepository, NoteRepository};

#[cfg(test)]
pub use notes::MockNoteRepository;
