use std::path::Path;

use crate::commands::common::{print_banner, resolve_note_content, to_editor_html, CliPage};
use crate::error::CliError;

pub async fn run_add(
    page: &mut CliPage,
    title: &str,
    content_parts: &[String],
    file: Option<&Path>,
) -> Result<(), CliError> {
    let content = resolve_note_content(content_parts, file)?;

    page.set_title(title);
    let counter = page.edit_content(to_editor_html(&content));
    tracing::debug!(count = counter.count, "Prepared note content");

    match page.submit().await {
        Ok(created) => {
            if let Some(note) = created {
                println!("{}", note.id);
            }
            print_banner(page.notes_info());
            Ok(())
        }
        Err(error) => Err(page
            .form_error()
            .map_or(CliError::Core(error), |message| {
                CliError::Page(message.to_string())
            })),
    }
}
