//! HTML rendering for note cards and the notes page.
//!
//! Titles are plain text and always escaped. Content is editor markup and is
//! passed through an allow-list sanitizer before it reaches the page, so a
//! note created outside the editor cannot inject script.

use std::collections::HashSet;
use std::fmt::{Display, Write as _};
use std::sync::LazyLock;

use chrono::{Local, TimeZone};

use crate::models::Note;
use crate::util::html_escape;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Inline style properties the editor's color pickers write.
const ALLOWED_STYLE_PROPERTIES: &[&str] = &["color", "background-color"];

/// Sanitizer tuned for the editor's formatting output.
///
/// Keeps `class` (alignment, indentation, code-block markers), list markers,
/// and text colors on `span`; drops scripts, event handlers, other inline
/// styles, and iframes.
static CONTENT_SANITIZER: LazyLock<ammonia::Builder<'static>> = LazyLock::new(|| {
    let mut builder = ammonia::Builder::default();
    builder
        .add_generic_attributes(&["class"])
        .add_tag_attributes("li", &["data-list"])
        .add_tag_attributes("span", &["style"])
        .filter_style_properties(
            ALLOWED_STYLE_PROPERTIES
                .iter()
                .copied()
                .collect::<HashSet<_>>(),
        );
    builder
});

/// Sanitize editor HTML for display.
pub fn sanitize_content(html: &str) -> String {
    CONTENT_SANITIZER.clean(html).to_string()
}

/// Render one note card using the local time zone for the timestamp.
pub fn render_note_card(note: &Note) -> String {
    render_note_card_in(note, &Local)
}

/// Render one note card with timestamps shown in `tz`.
pub fn render_note_card_in<Tz>(note: &Note, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let created = note.timestamp.with_timezone(tz).format(TIMESTAMP_FORMAT);

    let mut html = String::new();
    let _ = write!(
        html,
        concat!(
            r#"<div class="note-card" data-id="{id}">"#,
            "<h3>{title}</h3>",
            r#"<div class="note-card-content">{content}</div>"#,
            r#"<p class="note-card-timestamp">Created: {created}</p>"#,
            "</div>"
        ),
        id = html_escape(note.id.as_str()),
        title = html_escape(&note.title),
        content = sanitize_content(&note.content),
        created = created,
    );
    html
}

/// Render the cards for a list of notes, in order.
pub fn render_notes_list(notes: &[Note]) -> String {
    notes.iter().map(render_note_card).collect()
}

/// Wrap a rendered body in a standalone HTML document.
pub fn render_document(title: &str, body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<title>{title}</title>\n",
            "</head>\n",
            "<body>\n",
            "{body}\n",
            "</body>\n",
            "</html>\n"
        ),
        title = html_escape(title),
        body = body,
    )
}
