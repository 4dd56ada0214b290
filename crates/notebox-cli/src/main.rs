//! notebox CLI - write and browse rich-text notes from the command line
//!
//! Drives the same page controller a browser front end would, against the
//! notes API.

mod cli;
mod commands;
mod error;

#[cfg(test)]
mod tests;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::common::open_page;
use crate::commands::completions::run_completions;
use crate::commands::list::run_list;
use crate::commands::render::run_render;
use crate::commands::upgrade::run_upgrade;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("notebox=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Add {
            title,
            content,
            file,
        } => {
            let mut page = open_page(cli.api_url)?;
            run_add(&mut page, &title, &content, file.as_deref()).await?;
        }
        Commands::List { json } => {
            let mut page = open_page(cli.api_url)?;
            run_list(&mut page, json).await?;
        }
        Commands::Upgrade => {
            let mut page = open_page(cli.api_url)?;
            run_upgrade(&mut page).await?;
        }
        Commands::Render { output } => {
            let mut page = open_page(cli.api_url)?;
            run_render(&mut page, output.as_deref()).await?;
        }
        Commands::Completions { shell, output } => {
            run_completions(shell, output.as_deref())?;
        }
    }

    Ok(())
}
