//! Page controller for the notes screen.
//!
//! Holds everything the page shows: the title input, the editor buffer and
//! its counter, the inline form error, the notes info banner, and the notes
//! list. Handlers take `&mut self`, so only the handler that started a
//! request mutates the view when it completes. Each handler both updates the
//! view and returns its result, leaving the page usable after any failure.

use std::fmt::Write as _;
use std::time::Duration;

use tokio::time::Instant;

use crate::api::NotesBackend;
use crate::editor::{CharCounter, CounterTone, RichTextEditor};
use crate::error::Result;
use crate::models::{NewNote, Note, UpgradeOutcome};
use crate::render::{render_notes_list, sanitize_content};
use crate::util::html_escape;
use crate::validation::{validate_draft, Field};

/// How long the "note added" banner stays up.
pub const SUCCESS_BANNER_TTL: Duration = Duration::from_secs(3);

pub const EMPTY_LIST_MESSAGE: &str = "No notes yet. Add your first note above!";
pub const NOTE_ADDED_MESSAGE: &str = "Note added successfully!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
    Info,
    Success,
    Error,
}

impl BannerKind {
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Dismissible message above the notes list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub kind: BannerKind,
    expires_at: Option<Instant>,
}

impl Banner {
    fn is_visible(&self) -> bool {
        self.expires_at
            .is_none_or(|deadline| Instant::now() < deadline)
    }
}

/// The notes page view model.
#[derive(Debug)]
pub struct NotesPage<B> {
    backend: B,
    title_input: String,
    editor: RichTextEditor,
    counter: CharCounter,
    form_error: Option<String>,
    focused: Option<Field>,
    notes_info: Option<Banner>,
    notes: Vec<Note>,
}

impl<B: NotesBackend> NotesPage<B> {
    pub fn new(backend: B) -> Self {
        let editor = RichTextEditor::new();
        let counter = editor.counter();
        Self {
            backend,
            title_input: String::new(),
            editor,
            counter,
            form_error: None,
            focused: None,
            notes_info: None,
            notes: Vec::new(),
        }
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    pub fn title_input(&self) -> &str {
        &self.title_input
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        self.title_input = value.into();
    }

    pub const fn editor(&self) -> &RichTextEditor {
        &self.editor
    }

    /// Text-change event from the editor widget.
    pub fn edit_content(&mut self, html: impl Into<String>) -> CharCounter {
        self.counter = self.editor.set_html(html);
        self.counter
    }

    pub const fn counter(&self) -> CharCounter {
        self.counter
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    /// Field that last received focus because of a validation failure.
    pub const fn focused(&self) -> Option<Field> {
        self.focused
    }

    /// The current banner, if one is showing and has not expired.
    pub fn notes_info(&self) -> Option<&Banner> {
        self.notes_info.as_ref().filter(|banner| banner.is_visible())
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Re-fetch the list and rebuild the notes container.
    ///
    /// The container is left untouched when the fetch fails.
    pub async fn refresh(&mut self) -> Result<()> {
        self.clear_notes_info();

        match self.backend.list_notes().await {
            Ok(notes) => {
                tracing::debug!(count = notes.len(), "Loaded notes");
                self.notes = notes;
                if self.notes.is_empty() {
                    self.show_notes_info(EMPTY_LIST_MESSAGE, BannerKind::Info, None);
                }
                Ok(())
            }
            Err(error) => {
                self.show_notes_info(
                    format!("Error fetching notes: {error}"),
                    BannerKind::Error,
                    None,
                );
                Err(error)
            }
        }
    }

    /// Validate the draft and post it.
    ///
    /// A rejected draft never reaches the backend: the form error is set, the
    /// offending field is focused, and the validation error is returned.
    pub async fn submit(&mut self) -> Result<Option<Note>> {
        self.clear_form_error();

        let title = self.title_input.trim().to_string();
        if let Err(invalid) = validate_draft(&title, self.editor.text_length()) {
            tracing::debug!(%invalid, "Rejected note draft");
            self.form_error = Some(invalid.to_string());
            self.focused = Some(invalid.field());
            return Err(invalid.into());
        }

        let draft = NewNote {
            title,
            content: self.editor.html().to_string(),
        };

        match self.backend.create_note(&draft).await {
            Ok(created) => {
                if let Some(note) = &created {
                    tracing::info!(id = %note.id, "Created note");
                }
                self.title_input.clear();
                self.editor.clear();
                self.counter = self.editor.counter();

                // A failed refresh or an empty list keeps its own banner.
                if self.refresh().await.is_ok() && self.notes_info.is_none() {
                    self.show_notes_info(
                        NOTE_ADDED_MESSAGE,
                        BannerKind::Success,
                        Some(SUCCESS_BANNER_TTL),
                    );
                }
                Ok(created)
            }
            Err(error) => {
                self.form_error = Some(format!("Error adding note: {error}"));
                Err(error)
            }
        }
    }

    /// Premium upgrade button.
    ///
    /// The list is refreshed only when the backend reports a deletion; the
    /// backend's message is shown after the refresh so it stays visible.
    pub async fn premium_upgrade(&mut self) -> Result<UpgradeOutcome> {
        self.clear_form_error();

        match self.backend.premium_upgrade().await {
            Ok(outcome) => {
                if outcome.deleted {
                    tracing::info!(
                        title = outcome.deleted_note_title.as_deref().unwrap_or(""),
                        "Backend deleted a note during premium upgrade"
                    );
                    if self.refresh().await.is_err() {
                        return Ok(outcome);
                    }
                }
                let kind = if outcome.deleted {
                    BannerKind::Success
                } else {
                    BannerKind::Info
                };
                self.show_notes_info(outcome.message.clone(), kind, None);
                Ok(outcome)
            }
            Err(error) => {
                self.show_notes_info(
                    format!("Upgrade attempt failed: {error}"),
                    BannerKind::Error,
                    None,
                );
                Err(error)
            }
        }
    }

    /// Render the page body: form, counter, messages, and notes container.
    pub fn render_html(&self) -> String {
        let mut html = String::new();

        let _ = write!(
            html,
            r#"<form id="noteForm"><input id="noteTitle" type="text" maxlength="200" value="{}"><div id="editor">{}</div>"#,
            html_escape(&self.title_input),
            sanitize_content(self.editor.html()),
        );
        let tone = match self.counter.tone() {
            CounterTone::Normal => "normal",
            CounterTone::Danger => "danger",
        };
        let _ = write!(
            html,
            r#"<div id="charCount" class="char-count {tone}">{}</div>"#,
            self.counter.label(),
        );
        if let Some(message) = &self.form_error {
            let _ = write!(
                html,
                r#"<div id="formError" class="form-error">{}</div>"#,
                html_escape(message)
            );
        }
        html.push_str("</form>");

        if let Some(banner) = self.notes_info() {
            let _ = write!(
                html,
                r#"<div id="notesInfo" class="info-message {}">{}</div>"#,
                banner.kind.css_class(),
                html_escape(&banner.message)
            );
        }
        let _ = write!(
            html,
            r#"<div id="notesContainer">{}</div>"#,
            render_notes_list(&self.notes)
        );

        html
    }

    fn clear_form_error(&mut self) {
        self.form_error = None;
        self.focused = None;
    }

    fn clear_notes_info(&mut self) {
        self.notes_info = None;
    }

    fn show_notes_info(
        &mut self,
        message: impl Into<String>,
        kind: BannerKind,
        ttl: Option<Duration>,
    ) {
        self.notes_info = Some(Banner {
            message: message.into(),
            kind,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        });
    }
}
