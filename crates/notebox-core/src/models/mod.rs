//! Data models for notebox

mod note;
mod upgrade;

pub use note::{NewNote, Note, NoteId};
pub use upgrade::UpgradeOutcome;
