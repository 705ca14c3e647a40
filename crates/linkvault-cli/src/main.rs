//! LinkVault CLI - save, organize and share links from the terminal.

mod cli;
mod commands;
mod config_profiles;
mod error;


use clap::Parser;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::auth_cmd::run_auth;
use crate::commands::common::open_context;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::folders::run_folders;
use crate::commands::links::run_links;
use crate::commands::share::run_share;
use crate::commands::shared::run_shared;
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

    let directive: Directive = "linkvault=info"
        .parse()
        .map_err(|error| CliError::Config(format!("Invalid log directive: {error}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Config { command } => run_config(command, profile, cli.api_url)?,
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref())?,
        Commands::Auth { command } => {
            let context = open_context(profile, cli.api_url)?;
            run_auth(command, &context).await?;
        }
        Commands::Links { command } => {
            let context = open_context(profile, cli.api_url)?;
            run_links(command, &context).await?;
        }
        Commands::Folders { command } => {
            let context = open_context(profile, cli.api_url)?;
            run_folders(command, &context).await?;
        }
        Commands::Share { command } => {
            let context = open_context(profile, cli.api_url)?;
            run_share(command, &context).await?;
        }
        Commands::Shared { target, json } => {
            let context = open_context(profile, cli.api_url)?;
            run_shared(&target, json, &context).await?;
        }
    }

    Ok(())
}
