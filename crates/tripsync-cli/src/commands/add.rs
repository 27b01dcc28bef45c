use std::path::Path;

use crate::commands::common::{bootstrap_or_warn, open_engine, parse_tab};
use crate::error::CliError;

pub async fn run_add(tab: &str, cache_dir: &Path) -> Result<(), CliError> {
    let section = parse_tab(tab)?;

    let (mut engine, _config) = open_engine(cache_dir)?;
    bootstrap_or_warn(&mut engine).await;

    let id = engine.add_item(section).await?;
    if let Some(message) = engine.last_error() {
        eprintln!("Warning: {message} (saved locally, will sync later)");
    }
    println!("{id}");
    Ok(())
}
