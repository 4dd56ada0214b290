use crate::commands::common::{
    format_note_lines, note_to_list_item, print_banner, CliPage, NoteListItem,
};
use crate::error::CliError;

pub async fn run_list(page: &mut CliPage, as_json: bool) -> Result<(), CliError> {
    if page.refresh().await.is_err() {
        return Err(banner_error(page));
    }

    if as_json {
        let json_items = page
            .notes()
            .iter()
            .map(note_to_list_item)
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        for line in format_note_lines(page.notes()) {
            println!("{line}");
        }
        print_banner(page.notes_info());
    }

    Ok(())
}

/// Error carrying the banner the page put up for a failed action.
pub fn banner_error(page: &CliPage) -> CliError {
    CliError::Page(
        page.notes_info()
            .map(|banner| banner.message.clone())
            .unwrap_or_default(),
    )
}
