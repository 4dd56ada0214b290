//! Premium upgrade response

use serde::{Deserialize, Serialize};

/// Result of `POST /api/notes/premium-upgrade`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeOutcome {
    /// Human-readable explanation to show in the banner
    pub message: String,
    /// Whether the backend removed a note to make space
    #[serde(default)]
    pub deleted: bool,
    /// Title of the removed note, when one was removed
    #[serde(default)]
    pub deleted_note_title: Option<String>,
}
