use chrono::{TimeZone, Utc};
use clap::Parser;
use notebox_core::api::NotesApiClient;
use notebox_core::page::NotesPage;
use notebox_core::{Note, NoteId};
use pretty_assertions::assert_eq;

use crate::cli::{Cli, Commands, CompletionShell};
use crate::commands::add::run_add;
use crate::commands::common::{
    normalize_content, note_title_preview, note_to_list_item, resolve_note_content,
    to_editor_html,
};
use crate::commands::completions::completion_script;
use crate::commands::list::run_list;
use crate::error::CliError;

fn sample_note(title: &str) -> Note {
    Note {
        id: NoteId::new("0b7c5a36-64c4-4a5e-9a3e-3d1f1d2b9a10"),
        title: title.to_string(),
        content: "<p>body</p>".to_string(),
        timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
    }
}

async fn unreachable_page() -> NotesPage<NotesApiClient> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    NotesPage::new(NotesApiClient::new(format!("http://{addr}")).unwrap())
}

#[test]
fn normalize_content_trims_and_rejects_empty() {
    assert_eq!(normalize_content("  hello  "), Some("hello".to_string()));
    assert_eq!(normalize_content(" \n\t "), None);
}

#[test]
fn plain_text_becomes_paragraphs() {
    assert_eq!(
        to_editor_html("first <line>\n\nthird"),
        "<p>first &lt;line&gt;</p><p><br></p><p>third</p>"
    );
}

#[test]
fn markup_passes_through() {
    assert_eq!(
        to_editor_html("<h1>Title</h1><p>x</p>"),
        "<h1>Title</h1><p>x</p>"
    );
}

#[test]
fn title_preview_collapses_and_truncates() {
    let note = sample_note("A   very long\ttitle that keeps going");
    assert_eq!(note_title_preview(&note, 15), "A very long ...");
    assert_eq!(note_title_preview(&note, 100), "A very long title that keeps going");
}

#[test]
fn list_item_uses_rfc3339_timestamp() {
    let item = note_to_list_item(&sample_note("Groceries"));
    assert_eq!(item.title, "Groceries");
    assert_eq!(item.timestamp, "2024-05-01T12:30:00+00:00");
}

#[test]
fn resolve_note_content_prefers_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("note.html");
    std::fs::write(&path, "  <p>from file</p>\n").unwrap();

    let content = resolve_note_content(&["ignored".to_string()], Some(path.as_path())).unwrap();
    assert_eq!(content, "<p>from file</p>");
}

#[test]
fn resolve_note_content_rejects_blank_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blank.html");
    std::fs::write(&path, "   \n").unwrap();

    assert!(matches!(
        resolve_note_content(&[], Some(path.as_path())),
        Err(CliError::EmptyContent)
    ));
}

#[test]
fn cli_parses_add_with_global_api_url() {
    let cli = Cli::try_parse_from([
        "notebox",
        "add",
        "--title",
        "Groceries",
        "milk",
        "eggs",
        "--api-url",
        "http://localhost:5000",
    ])
    .unwrap();

    assert_eq!(cli.api_url.as_deref(), Some("http://localhost:5000"));
    match cli.command {
        Commands::Add { title, content, file } => {
            assert_eq!(title, "Groceries");
            assert_eq!(content, vec!["milk".to_string(), "eggs".to_string()]);
            assert!(file.is_none());
        }
        _ => panic!("expected add command"),
    }
}

#[test]
fn cli_rejects_content_with_file() {
    let result = Cli::try_parse_from([
        "notebox", "add", "--title", "t", "--file", "note.html", "inline",
    ]);
    assert!(result.is_err());
}

#[test]
fn completion_script_names_binary() {
    let script = String::from_utf8(completion_script(CompletionShell::Bash)).unwrap();
    assert!(script.contains("notebox"));
}

#[tokio::test(flavor = "current_thread")]
async fn add_rejects_blank_title_before_network() {
    let mut page = unreachable_page().await;

    let error = run_add(&mut page, "  ", &["<p>body</p>".to_string()], None)
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "Title is required.");
}

#[tokio::test(flavor = "current_thread")]
async fn add_reports_backend_failure_as_form_error() {
    let mut page = unreachable_page().await;

    let error = run_add(&mut page, "Title", &["body".to_string()], None)
        .await
        .unwrap_err();

    assert!(error.to_string().starts_with("Error adding note: "));
    assert_eq!(page.title_input(), "Title");
}

#[tokio::test(flavor = "current_thread")]
async fn list_surfaces_fetch_banner() {
    let mut page = unreachable_page().await;

    let error = run_list(&mut page, false).await.unwrap_err();

    assert!(error.to_string().starts_with("Error fetching notes: "));
}
