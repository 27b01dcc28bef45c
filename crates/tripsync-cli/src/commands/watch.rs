use std::path::Path;

use tripsync_core::sync;

use crate::commands::common::{open_engine, status_label, Engine};
use crate::error::CliError;

pub async fn run_watch(cache_dir: &Path) -> Result<(), CliError> {
    let (mut engine, config) = open_engine(cache_dir)?;

    println!("Watching shared plan (Ctrl-C to stop)...");
    let mut last_line = String::new();
    let observer = move |engine: &Engine| {
        let line = match engine.last_error() {
            Some(message) => format!("status: {} ({message})", status_label(engine.status())),
            None => format!(
                "status: {} (record {})",
                status_label(engine.status()),
                engine
                    .record_id()
                    .map_or_else(|| "?".to_string(), |id| id.to_string()),
            ),
        };
        // Only report transitions, not every poll tick.
        if line != last_line {
            println!("{line}");
            last_line = line;
        }
    };

    let shutdown = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {error}");
            std::future::pending::<()>().await;
        }
    };

    sync::run(&mut engine, &config, shutdown, observer).await;
    println!("stopped");
    Ok(())
}
