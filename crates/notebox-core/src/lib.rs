//! notebox-core - Core library for notebox
//!
//! This crate contains the note models, the rich-text editor buffer, draft
//! validation, the notes API client, HTML rendering, and the page controller
//! that ties them together. Front ends (currently the CLI) drive the page.

pub mod api;
pub mod config;
pub mod editor;
pub mod error;
pub mod models;
pub mod page;
pub mod render;
pub mod util;
pub mod validation;

pub use error::{Error, Result};
pub use models::{NewNote, Note, NoteId, UpgradeOutcome};
