//! Wire types shared by the note-canvas client and anything else that talks
//! to the notes service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =====================================================
// Notes
// =====================================================

/// A note as stored by the remote service.
///
/// Every mutation sends and receives the full object. Keys the client does
/// not model are kept in `extra` and sent back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Creation timestamp as the service stores it.
    #[serde(rename = "date", default)]
    pub created_at: String,
    #[serde(rename = "color", default)]
    pub color_tag: String,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub is_task: bool,
    #[serde(default)]
    pub is_completed: bool,
    /// Sent as `null` when unset so a cleared reminder reaches the service.
    #[serde(default)]
    pub reminder: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Note {
    /// A reminder counts only when it is set to something non-empty.
    pub fn has_reminder(&self) -> bool {
        self.reminder.as_deref().is_some_and(|r| !r.is_empty())
    }

    pub fn has_highlights(&self) -> bool {
        !self.highlights.is_empty()
    }
}

/// A note that has not been created yet; the service assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    #[serde(rename = "date")]
    pub created_at: String,
    #[serde(rename = "color")]
    pub color_tag: String,
    pub is_favorite: bool,
    pub is_task: bool,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub urls: Vec<String>,
}

// =====================================================
// Auth
// =====================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response of the register and login routes. Anything besides the token is
/// service-specific and kept as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The authenticated user, as returned by `GET /auth`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Acknowledgement body of a delete. Services answer with anything from
/// `{"msg": "..."}` to an empty body, so every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
