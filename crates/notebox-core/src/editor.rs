//! Rich-text editor buffer and character counter.
//!
//! The widget itself lives in the front end; this buffer holds the HTML it
//! emits and reports lengths the way the widget does, so validation and the
//! counter agree with what the user sees.

use std::sync::LazyLock;

use regex::Regex;

use crate::validation::MAX_CONTENT_CHARS;

/// Markup of a freshly cleared editor.
pub const EMPTY_DOCUMENT: &str = "<p><br></p>";

const BLOCK_TAGS: &[&str] = &[
    "p",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "li",
    "blockquote",
    "pre",
    "div",
];

const EMBED_TAGS: &[&str] = &["img", "iframe", "video"];

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"<(/?)([a-zA-Z][a-zA-Z0-9]*)[^>]*>|&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);|[^<&]+|[<&]",
    )
    .expect("Invalid regex")
});

/// Counter color state. Cosmetic only: it never blocks a submit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterTone {
    Normal,
    Danger,
}

/// Snapshot of the character counter shown under the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharCounter {
    pub count: usize,
}

impl CharCounter {
    pub const fn tone(&self) -> CounterTone {
        if self.count > MAX_CONTENT_CHARS {
            CounterTone::Danger
        } else {
            CounterTone::Normal
        }
    }

    pub fn label(&self) -> String {
        format!("Characters: {} / {MAX_CONTENT_CHARS}", self.count)
    }
}

/// HTML buffer backing the note editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichTextEditor {
    html: String,
}

impl Default for RichTextEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl RichTextEditor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            html: EMPTY_DOCUMENT.to_string(),
        }
    }

    #[must_use]
    pub fn with_html(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Replace the document, as on a text-change event, and return the
    /// refreshed counter.
    pub fn set_html(&mut self, html: impl Into<String>) -> CharCounter {
        self.html = html.into();
        self.counter()
    }

    pub fn clear(&mut self) {
        self.html = EMPTY_DOCUMENT.to_string();
    }

    /// Editor-reported length, excluding the trailing newline every document keeps.
    pub fn text_length(&self) -> usize {
        let text = plain_text(&self.html);
        let count = text.chars().count();
        if text.ends_with('\n') {
            count - 1
        } else {
            count
        }
    }

    pub fn counter(&self) -> CharCounter {
        CharCounter {
            count: self.text_length(),
        }
    }
}

/// Flatten editor HTML into the text model the widget counts.
///
/// Closed block elements contribute a newline, embeds one placeholder
/// character, and `<br>` nothing (the widget only emits it inside empty
/// blocks). A code block already carries its line's newline in its text, so
/// its closing tag adds none. Whitespace between blocks is markup layout and
/// is not counted.
fn plain_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut block_depth = 0_usize;
    let mut pre_start: Option<usize> = None;

    for caps in TOKEN_RE.captures_iter(html) {
        if let Some(name) = caps.get(2) {
            let name = name.as_str().to_ascii_lowercase();
            let closing = caps.get(1).is_some_and(|slash| !slash.as_str().is_empty());
            if BLOCK_TAGS.contains(&name.as_str()) {
                if closing {
                    block_depth = block_depth.saturating_sub(1);
                    let code_line_closed = name == "pre"
                        && pre_start.take().is_some_and(|start| {
                            text.len() > start && text.ends_with('\n')
                        });
                    if !code_line_closed {
                        text.push('\n');
                    }
                } else {
                    block_depth += 1;
                    if name == "pre" {
                        pre_start = Some(text.len());
                    }
                }
            } else if !closing && EMBED_TAGS.contains(&name.as_str()) {
                text.push('\u{fffc}');
            }
        } else if let Some(entity) = caps.get(3) {
            match decode_entity(entity.as_str()) {
                Some(ch) => text.push(ch),
                None => text.push_str(&caps[0]),
            }
        } else {
            let run = &caps[0];
            if block_depth == 0 && run.trim().is_empty() {
                continue;
            }
            text.push_str(run);
        }
    }

    text
}

fn decode_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(decimal) = entity.strip_prefix('#') {
        return decimal.parse::<u32>().ok().and_then(char::from_u32);
    }
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_has_zero_length() {
        assert_eq!(RichTextEditor::new().text_length(), 0);
        assert_eq!(RichTextEditor::with_html("").text_length(), 0);
    }

    #[test]
    fn paragraphs_count_separating_newlines() {
        let editor = RichTextEditor::with_html("<p>Hello</p><p>World</p>");
        assert_eq!(editor.text_length(), 11);
    }

    #[test]
    fn inline_formatting_is_not_counted() {
        let editor =
            RichTextEditor::with_html(r#"<p><strong>bold</strong> <a href="x">link</a></p>"#);
        assert_eq!(editor.text_length(), 9);
    }

    #[test]
    fn entities_count_as_one_character() {
        let editor = RichTextEditor::with_html("<p>a &amp; b &lt;3 &#233;&#x41;</p>");
        assert_eq!(plain_text(editor.html()), "a & b <3 éA\n");
        assert_eq!(editor.text_length(), 11);
    }

    #[test]
    fn unknown_entity_is_kept_verbatim() {
        let editor = RichTextEditor::with_html("<p>&bogus;</p>");
        assert_eq!(editor.text_length(), 7);
    }

    #[test]
    fn embeds_count_as_one_character() {
        let editor = RichTextEditor::with_html(r#"<p>x<img src="a.png"></p>"#);
        assert_eq!(editor.text_length(), 2);
    }

    #[test]
    fn empty_lines_count() {
        let editor = RichTextEditor::with_html("<p>a</p><p><br></p><p>b</p>");
        assert_eq!(editor.text_length(), 4);
    }

    #[test]
    fn code_block_line_newline_is_not_doubled() {
        let editor =
            RichTextEditor::with_html("<pre class=\"ql-syntax\" spellcheck=\"false\">ab\n</pre>");
        assert_eq!(editor.text_length(), 2);

        let two_lines = RichTextEditor::with_html(
            "<p>x</p><pre class=\"ql-syntax\" spellcheck=\"false\">ab\ncd\n</pre><p>y</p>",
        );
        assert_eq!(plain_text(two_lines.html()), "x\nab\ncd\ny\n");
        assert_eq!(two_lines.text_length(), 9);
    }

    #[test]
    fn code_block_without_trailing_newline_still_closes_line() {
        let editor = RichTextEditor::with_html("<pre>ab</pre><p>c</p>");
        assert_eq!(plain_text(editor.html()), "ab\nc\n");
    }

    #[test]
    fn whitespace_between_blocks_is_ignored() {
        let editor = RichTextEditor::with_html("<h1>T</h1>\n<p>x</p>");
        assert_eq!(editor.text_length(), 3);

        let list = RichTextEditor::with_html("<ol>\n  <li>a</li>\n  <li>b</li>\n</ol>\n");
        assert_eq!(list.text_length(), 3);
    }

    #[test]
    fn whitespace_inside_blocks_is_counted() {
        let editor = RichTextEditor::with_html("<p>a <strong>b</strong> </p>");
        assert_eq!(editor.text_length(), 4);
    }

    #[test]
    fn clear_resets_to_empty_document() {
        let mut editor = RichTextEditor::with_html("<p>draft</p>");
        editor.clear();
        assert_eq!(editor.html(), EMPTY_DOCUMENT);
        assert_eq!(editor.counter().label(), "Characters: 0 / 20000");
    }

    #[test]
    fn counter_turns_danger_past_limit() {
        let mut editor = RichTextEditor::new();
        let at_limit = editor.set_html(format!("<p>{}</p>", "a".repeat(MAX_CONTENT_CHARS)));
        assert_eq!(at_limit.tone(), CounterTone::Normal);

        let over = editor.set_html(format!("<p>{}</p>", "a".repeat(MAX_CONTENT_CHARS + 1)));
        assert_eq!(over.tone(), CounterTone::Danger);
        assert_eq!(over.label(), "Characters: 20001 / 20000");
    }
}
