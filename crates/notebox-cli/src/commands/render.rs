use std::path::Path;

use notebox_core::render::render_document;

use crate::commands::common::CliPage;
use crate::error::CliError;

pub async fn run_render(page: &mut CliPage, output_path: Option<&Path>) -> Result<(), CliError> {
    // A failed fetch still renders: the error banner is part of the page.
    if let Err(error) = page.refresh().await {
        tracing::warn!(%error, "Rendering page without a fresh notes list");
    }
    let rendered = render_document("Notes", &page.render_html());

    if let Some(path) = output_path {
        std::fs::write(path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}
