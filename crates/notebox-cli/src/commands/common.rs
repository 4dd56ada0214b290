use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

use chrono::Local;
use notebox_core::api::NotesApiClient;
use notebox_core::config::{ClientConfig, API_URL_ENV};
use notebox_core::page::{Banner, NotesPage};
use notebox_core::util::html_escape;
use notebox_core::Note;
use serde::Serialize;

use crate::error::CliError;

pub type CliPage = NotesPage<NotesApiClient>;

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub timestamp: String,
}

/// Build a page wired to the configured backend.
pub fn open_page(api_url: Option<String>) -> Result<CliPage, CliError> {
    let config = ClientConfig::load()?;
    let base_url = config.resolve_api_base_url(api_url, env::var(API_URL_ENV).ok())?;
    tracing::debug!(%base_url, "Using notes API");
    Ok(NotesPage::new(NotesApiClient::new(base_url)?))
}

/// Content from a file, the arguments, or piped stdin, in that order.
pub fn resolve_note_content(
    content_parts: &[String],
    file: Option<&Path>,
) -> Result<String, CliError> {
    if let Some(path) = file {
        return normalize_content(&std::fs::read_to_string(path)?).ok_or(CliError::EmptyContent);
    }

    if let Some(content) = normalize_content(&content_parts.join(" ")) {
        return Ok(content);
    }

    if let Some(content) = read_piped_stdin()? {
        return Ok(content);
    }

    Err(CliError::EmptyContent)
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

/// Turn CLI input into editor markup.
///
/// Input that already looks like markup is passed through; plain text
/// becomes one paragraph per line, with blank lines kept as empty paragraphs.
pub fn to_editor_html(content: &str) -> String {
    if content.trim_start().starts_with('<') {
        return content.to_string();
    }

    content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                "<p><br></p>".to_string()
            } else {
                format!("<p>{}</p>", html_escape(line))
            }
        })
        .collect()
}

pub fn format_note_lines(notes: &[Note]) -> Vec<String> {
    notes
        .iter()
        .map(|note| {
            let short_id = note.id.as_str().chars().take(13).collect::<String>();
            let created = format_timestamp(note);
            let title = note_title_preview(note, 50);
            format!("{short_id:<13}  {created}  {title}")
        })
        .collect()
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    NoteListItem {
        id: note.id.to_string(),
        title: note.title.clone(),
        content: note.content.clone(),
        timestamp: note.timestamp.to_rfc3339(),
    }
}

pub fn note_title_preview(note: &Note, max_chars: usize) -> String {
    let collapsed = note.title.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_timestamp(note: &Note) -> String {
    note.timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Print the page banner, if one is showing, to stderr.
pub fn print_banner(banner: Option<&Banner>) {
    if let Some(banner) = banner {
        eprintln!("[{}] {}", banner.kind.css_class(), banner.message);
    }
}
