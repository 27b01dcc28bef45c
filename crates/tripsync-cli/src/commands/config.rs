use std::env;

use tripsync_core::config::normalize_project_url;
use tripsync_core::util::normalize_text_option;

use crate::app_config::{default_config_path, resolve_sync_config, AppConfig};
use crate::cli::ConfigCommands;
use crate::error::CliError;

pub fn run_config(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            supabase_url,
            supabase_anon_key,
        } => run_config_init(supabase_url, supabase_anon_key),
        ConfigCommands::Show => run_config_show(),
    }
}

fn run_config_init(
    supabase_url: Option<String>,
    supabase_anon_key: Option<String>,
) -> Result<(), CliError> {
    let mut config = AppConfig::load()?;

    if let Some(url) = normalize_text_option(supabase_url) {
        let url = normalize_project_url(&url).map_err(|error| CliError::Config(error.to_string()))?;
        config.supabase_url = Some(url);
    }
    if let Some(key) = normalize_text_option(supabase_anon_key) {
        config.supabase_anon_key = Some(key);
    }

    let path = config.save()?;
    println!("Configuration written to {}", path.display());
    println!("Changes take effect on the next invocation.");
    Ok(())
}

fn run_config_show() -> Result<(), CliError> {
    let config = AppConfig::load()?;
    let resolved = resolve_sync_config(&config)?;

    let url_source = value_source(
        "TRIPSYNC_SUPABASE_URL",
        config.supabase_url.as_deref(),
    );
    let key_source = value_source(
        "TRIPSYNC_SUPABASE_ANON_KEY",
        config.supabase_anon_key.as_deref(),
    );

    println!("config file:  {}", default_config_path().display());
    println!("supabase url: {} ({url_source})", resolved.supabase_url);
    println!("anon key:     {} ({key_source})", resolved.supabase_anon_key);
    println!("table:        {}", resolved.table);
    Ok(())
}

fn value_source(env_var: &str, file_value: Option<&str>) -> &'static str {
    if normalize_text_option(env::var(env_var).ok()).is_some() {
        "environment"
    } else if file_value.is_some() {
        "config file"
    } else {
        "built-in"
    }
}
