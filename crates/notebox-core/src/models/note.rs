//! Note model

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend-issued note identifier.
///
/// The backend hands out UUID strings; the client treats them as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A note as stored by the backend.
///
/// Notes are never edited client side; the list is re-fetched after every
/// change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,
    /// Plain-text title (at most 200 characters when created by this client)
    pub title: String,
    /// Editor HTML
    pub content: String,
    /// Creation time reported by the backend
    pub timestamp: DateTime<Utc>,
}

/// Body of `POST /api/notes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_deserializes_backend_payload() {
        let note: Note = serde_json::from_str(
            r#"{
                "id": "0b7c5a36-64c4-4a5e-9a3e-3d1f1d2b9a10",
                "title": "Groceries",
                "content": "<p>milk</p>",
                "timestamp": "2024-05-01T12:30:00.123456+00:00"
            }"#,
        )
        .unwrap();

        assert_eq!(note.id.as_str(), "0b7c5a36-64c4-4a5e-9a3e-3d1f1d2b9a10");
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.timestamp.timestamp(), 1_714_566_600);
    }

    #[test]
    fn note_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&NoteId::new("abc")).unwrap();
        assert_eq!(json, r#""abc""#);
    }
}
