use crate::commands::common::CliPage;
use crate::commands::list::banner_error;
use crate::error::CliError;

pub async fn run_upgrade(page: &mut CliPage) -> Result<(), CliError> {
    let Ok(outcome) = page.premium_upgrade().await else {
        return Err(banner_error(page));
    };

    println!("{}", outcome.message);
    if let Some(title) = outcome.deleted_note_title {
        println!("Deleted: {title}");
    }
    Ok(())
}
