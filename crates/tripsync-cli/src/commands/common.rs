use std::env;
use std::path::{Path, PathBuf};

use tripsync_core::cache::FilePlanCache;
use tripsync_core::config::SyncConfig;
use tripsync_core::media::{encode_image_data_url, is_image_url};
use tripsync_core::models::{LocationRef, SectionId, TravelSection};
use tripsync_core::store::SupabaseStore;
use tripsync_core::sync::{SyncEngine, SyncStatus};
use tripsync_core::TravelPlan;

use crate::app_config::{resolve_sync_config, AppConfig};
use crate::error::CliError;

pub type Engine = SyncEngine<SupabaseStore, FilePlanCache>;

pub fn resolve_cache_dir(cli_cache_dir: Option<PathBuf>) -> PathBuf {
    cli_cache_dir
        .or_else(|| env::var_os("TRIPSYNC_CACHE_DIR").map(PathBuf::from))
        .unwrap_or_else(default_cache_dir)
}

pub fn default_cache_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| panic!("Failed to resolve CLI data directory"))
        .join("tripsync")
}

/// Build an engine from the layered config and the local cache.
pub fn open_engine(cache_dir: &Path) -> Result<(Engine, SyncConfig), CliError> {
    let config = resolve_sync_config(&AppConfig::load()?)?;
    let store = SupabaseStore::new(&config)?;
    let cache = FilePlanCache::new(cache_dir);
    Ok((SyncEngine::new(store, cache), config))
}

/// Bootstrap, warning instead of failing: read paths keep working against
/// the cached (or default) plan when the remote store is unreachable.
pub async fn bootstrap_or_warn(engine: &mut Engine) {
    engine.bootstrap().await;
    if engine.status() == SyncStatus::Error {
        let message = engine.last_error().unwrap_or("unknown error");
        eprintln!("Warning: {message} (working from local data)");
    }
}

pub fn parse_tab(tab: &str) -> Result<SectionId, CliError> {
    tab.parse::<SectionId>().map_err(CliError::Core)
}

pub fn normalize_item_id(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyItemId)
    } else {
        Ok(trimmed.to_string())
    }
}

/// The engine treats absent item ids as a no-op; the CLI checks first so a
/// typo doesn't silently save an unchanged plan.
pub fn ensure_item_exists(
    plan: &TravelPlan,
    section: SectionId,
    item_id: &str,
) -> Result<(), CliError> {
    let present = plan
        .section(section)
        .is_some_and(|data| data.items.iter().any(|item| item.id == item_id));
    if present {
        Ok(())
    } else {
        Err(CliError::ItemNotFound(
            section.to_string(),
            item_id.to_string(),
        ))
    }
}

pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Accept a URL (kept as-is) or a local file path (embedded as a data URL).
pub fn resolve_image_value(value: &str) -> Result<String, CliError> {
    if is_image_url(value) {
        Ok(value.to_string())
    } else {
        Ok(encode_image_data_url(Path::new(value))?)
    }
}

pub const fn status_label(status: SyncStatus) -> &'static str {
    match status {
        SyncStatus::Idle => "idle",
        SyncStatus::Saving => "saving",
        SyncStatus::Synced => "synced",
        SyncStatus::Error => "error",
    }
}

pub fn format_section_lines(section: &TravelSection) -> Vec<String> {
    let mut lines = vec![
        format!("{} | {}", section.title, section.description),
        String::new(),
    ];

    if section.items.is_empty() {
        lines.push("  (no items)".to_string());
        return lines;
    }

    for item in &section.items {
        let time = item.time.as_deref().unwrap_or("");
        let tags = item
            .tags
            .as_deref()
            .map(|tags| tags.join(", "))
            .unwrap_or_default();

        if tags.is_empty() {
            lines.push(format!("  {:<16}  {:<12}  {}", item.id, time, item.title));
        } else {
            lines.push(format!(
                "  {:<16}  {:<12}  {}  [{}]",
                item.id, time, item.title, tags
            ));
        }

        let locations = item.map_locations();
        if !locations.is_empty() {
            let labels: Vec<String> = locations.iter().map(LocationRef::label).collect();
            lines.push(format!("  {:<16}  {:<12}  📍 {}", "", "", labels.join(" · ")));
        }
    }
    lines
}
