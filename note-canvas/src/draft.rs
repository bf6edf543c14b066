//! Defaults for notes created by this client.

use note_canvas_types::NoteDraft;
use rand::seq::SliceRandom;

pub const DEFAULT_TITLE: &str = "New Note";
pub const DEFAULT_CONTENT: &str = "...";

/// Colour tags a new note is given, one picked at random.
pub const PALETTE: [&str; 6] = [
    "bg-red-400",
    "bg-green-300",
    "bg-blue-300",
    "bg-yellow-200",
    "bg-purple-300",
    "bg-gray-500",
];

pub fn random_color() -> String {
    PALETTE
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(PALETTE[0])
        .to_string()
}

/// Draft with the stock title and content, stamped now.
pub fn blank() -> NoteDraft {
    with_text(DEFAULT_TITLE, DEFAULT_CONTENT)
}

pub fn with_text(title: &str, content: &str) -> NoteDraft {
    NoteDraft {
        title: title.to_string(),
        content: content.to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
        color_tag: random_color(),
        is_favorite: false,
        is_task: false,
        is_completed: false,
        reminder: None,
        highlights: Vec::new(),
        images: Vec::new(),
        urls: Vec::new(),
    }
}
