//! tripsync CLI - shared travel itinerary, synced through the cloud
//!
//! Two people edit the same plan; every command reconciles with the
//! remote copy before acting and keeps working locally when it can't.

use clap::Parser;

mod app_config;
mod cli;
mod commands;
mod error;

use cli::{Cli, Commands};
use commands::add::run_add;
use commands::common::resolve_cache_dir;
use commands::completions::run_completions;
use commands::config::run_config;
use commands::delete::run_delete;
use commands::edit::{run_edit, EditArgs};
use commands::export::run_export;
use commands::hero::run_hero;
use commands::show::run_show;
use commands::watch::run_watch;
use error::CliError;

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
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cache_dir = resolve_cache_dir(cli.cache_dir);

    match cli.command {
        Commands::Show { tab, json, offline } => {
            run_show(tab.as_deref(), json, offline, &cache_dir).await
        }
        Commands::Add { tab } => run_add(&tab, &cache_dir).await,
        Commands::Edit {
            tab,
            id,
            title,
            subtitle,
            time,
            content,
            detail,
            location,
            tags,
            image,
            kind,
        } => {
            let args = EditArgs {
                title,
                subtitle,
                time,
                content,
                detail,
                location,
                tags,
                image,
                kind,
            };
            run_edit(&tab, &id, args, &cache_dir).await
        }
        Commands::Delete { tab, id } => run_delete(&tab, &id, &cache_dir).await,
        Commands::Hero { image } => run_hero(&image, &cache_dir).await,
        Commands::Export { format, output } => {
            run_export(format, output.as_deref(), &cache_dir).await
        }
        Commands::Watch => run_watch(&cache_dir).await,
        Commands::Config { command } => run_config(command),
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref()),
    }
}
