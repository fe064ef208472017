use serde::{Deserialize, Serialize};

/// A note as stored and returned by the notes service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Note ID, assigned by the server
    pub id: i64,
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
    /// Creation timestamp, opaque to the client
    pub created_at: String,
    /// Last update timestamp, opaque to the client
    pub updated_at: String,
}

/// Payload for creating a note. Identity and timestamps are assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
}

impl NewNote {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}
