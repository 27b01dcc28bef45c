use std::path::Path;

use crate::commands::common::{
    bootstrap_or_warn, ensure_item_exists, normalize_item_id, open_engine, parse_tab,
};
use crate::error::CliError;

pub async fn run_delete(tab: &str, id: &str, cache_dir: &Path) -> Result<(), CliError> {
    let section = parse_tab(tab)?;
    let item_id = normalize_item_id(id)?;

    let (mut engine, _config) = open_engine(cache_dir)?;
    bootstrap_or_warn(&mut engine).await;
    ensure_item_exists(engine.plan(), section, &item_id)?;

    engine.delete_item(section, &item_id).await?;
    if let Some(message) = engine.last_error() {
        eprintln!("Warning: {message} (saved locally, will sync later)");
    }
    println!("deleted {item_id}");
    Ok(())
}
