use std::path::Path;

use crate::commands::common::{bootstrap_or_warn, open_engine, resolve_image_value};
use crate::error::CliError;

pub async fn run_hero(image: &str, cache_dir: &Path) -> Result<(), CliError> {
    let value = resolve_image_value(image)?;

    let (mut engine, _config) = open_engine(cache_dir)?;
    bootstrap_or_warn(&mut engine).await;

    engine.set_hero_image(value).await;
    if let Some(message) = engine.last_error() {
        eprintln!("Warning: {message} (saved locally, will sync later)");
    }
    println!("hero image updated");
    Ok(())
}
