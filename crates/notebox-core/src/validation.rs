//! Draft validation run before a note is submitted.

use thiserror::Error;

/// Maximum title length in characters.
pub const MAX_TITLE_CHARS: usize = 200;

/// Maximum editor-reported content length in characters (matches the backend).
pub const MAX_CONTENT_CHARS: usize = 20_000;

/// Form field that receives focus when validation fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Title,
    Content,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required.")]
    EmptyTitle,
    #[error("Title cannot exceed {max} characters.", max = MAX_TITLE_CHARS)]
    TitleTooLong,
    #[error("Content cannot be empty.")]
    EmptyContent,
    #[error("Content is too long. Max {max} characters. Current: {0}", max = MAX_CONTENT_CHARS)]
    ContentTooLong(usize),
}

impl ValidationError {
    /// The field the user has to fix.
    pub const fn field(&self) -> Field {
        match self {
            Self::EmptyTitle | Self::TitleTooLong => Field::Title,
            Self::EmptyContent | Self::ContentTooLong(_) => Field::Content,
        }
    }
}

/// Check a draft in form order: title first, then content.
///
/// `title` is expected to be trimmed already; `content_len` is the length
/// reported by the editor, not the length of its HTML.
pub fn validate_draft(title: &str, content_len: usize) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(ValidationError::TitleTooLong);
    }
    if content_len == 0 {
        return Err(ValidationError::EmptyContent);
    }
    if content_len > MAX_CONTENT_CHARS {
        return Err(ValidationError::ContentTooLong(content_len));
    }
    Ok(())
}
