//! View filtering: which cached notes are visible for a search term and a
//! category. Pure functions over the cache snapshot; nothing is stored.

use note_canvas_types::Note;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    All,
    Reminders,
    Tasks,
    Favorites,
    Highlights,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::All,
        Category::Reminders,
        Category::Tasks,
        Category::Favorites,
        Category::Highlights,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Reminders => "reminders",
            Category::Tasks => "tasks",
            Category::Favorites => "favorites",
            Category::Highlights => "highlights",
        }
    }

    pub fn includes(&self, note: &Note) -> bool {
        match self {
            Category::All => true,
            Category::Reminders => note.has_reminder(),
            Category::Tasks => note.is_task,
            Category::Favorites => note.is_favorite,
            Category::Highlights => note.has_highlights(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| {
                format!(
                    "unknown category '{}' (expected one of: all, reminders, tasks, favorites, highlights)",
                    s
                )
            })
    }
}

/// Search term plus category selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub search: String,
    pub category: Category,
}

impl NoteFilter {
    pub fn new(search: impl Into<String>, category: Category) -> Self {
        Self {
            search: search.into(),
            category,
        }
    }

    /// Case-insensitive substring match on title or content, and the
    /// category predicate. An empty search matches everything.
    pub fn matches(&self, note: &Note) -> bool {
        self.category.includes(note) && matches_search(note, &self.search.to_lowercase())
    }

    /// Notes that pass, in input order.
    pub fn apply(&self, notes: &[Note]) -> Vec<Note> {
        let needle = self.search.to_lowercase();
        notes
            .iter()
            .filter(|note| self.category.includes(note) && matches_search(note, &needle))
            .cloned()
            .collect()
    }
}

/// Convenience wrapper over [`NoteFilter::apply`].
pub fn filter_notes(notes: &[Note], search: &str, category: Category) -> Vec<Note> {
    NoteFilter::new(search, category).apply(notes)
}

fn matches_search(note: &Note, needle: &str) -> bool {
    needle.is_empty()
        || note.title.to_lowercase().contains(needle)
        || note.content.to_lowercase().contains(needle)
}
