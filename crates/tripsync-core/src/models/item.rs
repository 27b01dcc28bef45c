//! Itinerary item model

use serde::{Deserialize, Serialize};

use crate::util::unix_timestamp_ms;

/// Display category of an item, used only to select an icon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Alert,
    #[default]
    Itinerary,
    Hotel,
    Food,
    Activity,
    Tips,
}

/// A named map-search keyword attached to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRef {
    /// Display name, e.g. "索菲亚大教堂"
    pub name: String,
    /// Map search keyword, e.g. "哈尔滨圣索菲亚大教堂"
    pub keyword: String,
}

impl LocationRef {
    /// Short display label, collapsing the case where both fields match.
    #[must_use]
    pub fn label(&self) -> String {
        if self.name == self.keyword {
            self.keyword.clone()
        } else {
            format!("{} ({})", self.name, self.keyword)
        }
    }
}

/// One itinerary entry inside a section.
///
/// Field names follow the JSON document written by the web client, so
/// documents round-trip between both editors unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelItem {
    /// Unique within its section
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Human-readable time label, e.g. "2月7日出发"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Short content shown in the list view
    pub content: String,
    /// Long-form content for the detail view; falls back to `content`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_content: Option<String>,
    /// Single search keyword (legacy documents)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_keyword: Option<String>,
    /// Named location keywords (current documents)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<LocationRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Remote URL or inlined base64 data URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: ItemKind,
}

impl TravelItem {
    /// Create a freshly added item with placeholder content.
    ///
    /// The id is `new-<epoch-ms>`, matching ids generated by the web client.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            id: format!("new-{}", unix_timestamp_ms()),
            title: "新行程".to_string(),
            subtitle: None,
            time: Some("待定".to_string()),
            content: "点击编辑添加详细内容...".to_string(),
            detail_content: None,
            location_keyword: None,
            locations: None,
            tags: Some(vec!["新增".to_string()]),
            image_url: None,
            kind: ItemKind::Itinerary,
        }
    }

    /// Content for the detail view, falling back to the short content.
    #[must_use]
    pub fn detail_text(&self) -> &str {
        self.detail_content.as_deref().unwrap_or(&self.content)
    }

    /// Map-search entries: the named list when present, otherwise the
    /// legacy single keyword. Empty when the item carries no location.
    #[must_use]
    pub fn map_locations(&self) -> Vec<LocationRef> {
        if let Some(locations) = &self.locations {
            if !locations.is_empty() {
                return locations.clone();
            }
        }
        self.location_keyword
            .as_ref()
            .map(|keyword| {
                vec![LocationRef {
                    name: keyword.clone(),
                    keyword: keyword.clone(),
                }]
            })
            .unwrap_or_default()
    }

    /// Overwrite the fields present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: ItemPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(subtitle) = patch.subtitle {
            self.subtitle = Some(subtitle);
        }
        if let Some(time) = patch.time {
            self.time = Some(time);
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(detail_content) = patch.detail_content {
            self.detail_content = Some(detail_content);
        }
        if let Some(location_keyword) = patch.location_keyword {
            self.location_keyword = Some(location_keyword);
        }
        if let Some(tags) = patch.tags {
            self.tags = Some(tags);
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
    }
}

/// Partial item update; only present fields overwrite the target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub time: Option<String>,
    pub content: Option<String>,
    pub detail_content: Option<String>,
    pub location_keyword: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub kind: Option<ItemKind>,
}
