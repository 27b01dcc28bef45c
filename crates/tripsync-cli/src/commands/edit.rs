use std::path::Path;

use tripsync_core::models::ItemPatch;

use crate::cli::ItemKindArg;
use crate::commands::common::{
    bootstrap_or_warn, ensure_item_exists, normalize_item_id, open_engine, parse_tab, parse_tags,
    resolve_image_value,
};
use crate::error::CliError;

pub struct EditArgs {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub time: Option<String>,
    pub content: Option<String>,
    pub detail: Option<String>,
    pub location: Option<String>,
    pub tags: Option<String>,
    pub image: Option<String>,
    pub kind: Option<ItemKindArg>,
}

impl EditArgs {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.subtitle.is_none()
            && self.time.is_none()
            && self.content.is_none()
            && self.detail.is_none()
            && self.location.is_none()
            && self.tags.is_none()
            && self.image.is_none()
            && self.kind.is_none()
    }

    fn into_patch(self) -> Result<ItemPatch, CliError> {
        let image_url = self
            .image
            .as_deref()
            .map(resolve_image_value)
            .transpose()?;

        Ok(ItemPatch {
            title: self.title,
            subtitle: self.subtitle,
            time: self.time,
            content: self.content,
            detail_content: self.detail,
            location_keyword: self.location,
            tags: self.tags.as_deref().map(parse_tags),
            image_url,
            kind: self.kind.map(Into::into),
        })
    }
}

pub async fn run_edit(tab: &str, id: &str, args: EditArgs, cache_dir: &Path) -> Result<(), CliError> {
    let section = parse_tab(tab)?;
    let item_id = normalize_item_id(id)?;
    if args.is_empty() {
        return Err(CliError::EmptyEdit);
    }
    let patch = args.into_patch()?;

    let (mut engine, _config) = open_engine(cache_dir)?;
    bootstrap_or_warn(&mut engine).await;
    ensure_item_exists(engine.plan(), section, &item_id)?;

    engine.update_item(section, &item_id, patch).await?;
    if let Some(message) = engine.last_error() {
        eprintln!("Warning: {message} (saved locally, will sync later)");
    }
    println!("{item_id}");
    Ok(())
}
