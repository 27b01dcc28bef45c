//! Root itinerary document

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ItemKind, SectionId, TravelItem, TravelSection};
use crate::util::unix_timestamp_ms;

/// Hero image used until someone uploads their own.
pub const DEFAULT_HERO_IMAGE: &str =
    "https://images.unsplash.com/photo-1547036967-23d11aacaee0?q=80&w=1600&auto=format&fit=crop";

/// Key of the canonical shared row in the remote store.
///
/// Exactly one remote record is canonical: the one with the numerically
/// smallest id. Clients re-derive it from the store instead of hardcoding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The whole itinerary state, stored as one JSON blob in one row.
///
/// Every save overwrites the entire document; `last_updated` exists purely
/// for conflict arbitration between two clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPlan {
    pub hero_image: String,
    pub sections: BTreeMap<String, TravelSection>,
    /// Epoch milliseconds of the last save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<i64>,
}

impl TravelPlan {
    /// The built-in default itinerary, used on first run and by whichever
    /// client first observes an empty remote table.
    #[must_use]
    pub fn initial() -> Self {
        let mut sections = BTreeMap::new();
        for (id, section) in seed_sections() {
            sections.insert(id.as_str().to_string(), section);
        }
        Self {
            hero_image: DEFAULT_HERO_IMAGE.to_string(),
            sections,
            last_updated: None,
        }
    }

    /// Set `last_updated` to the current wall clock.
    pub fn stamp(&mut self) {
        self.last_updated = Some(unix_timestamp_ms());
    }

    #[must_use]
    pub fn section(&self, id: SectionId) -> Option<&TravelSection> {
        self.sections.get(id.as_str())
    }

    pub fn section_mut(&mut self, id: SectionId) -> Option<&mut TravelSection> {
        self.sections.get_mut(id.as_str())
    }
}

impl Default for TravelPlan {
    fn default() -> Self {
        Self::initial()
    }
}

/// Upgrade a raw document to the current schema.
///
/// Legacy documents were the bare section map, without a `sections` wrapper
/// or hero image. Old shapes can reappear from stale caches at any time, so
/// this runs at every ingress point (cache load, fetch, push payload).
pub fn normalize_plan(value: Value) -> serde_json::Result<TravelPlan> {
    let is_legacy = value
        .as_object()
        .is_some_and(|object| !object.contains_key("sections"));

    if is_legacy {
        let wrapped = serde_json::json!({
            "heroImage": DEFAULT_HERO_IMAGE,
            "sections": value,
        });
        serde_json::from_value(wrapped)
    } else {
        serde_json::from_value(value)
    }
}

fn seed_item(
    id: &str,
    title: &str,
    time: Option<&str>,
    content: &str,
    tags: &[&str],
    kind: ItemKind,
    image_url: Option<&str>,
) -> TravelItem {
    TravelItem {
        id: id.to_string(),
        title: title.to_string(),
        subtitle: None,
        time: time.map(str::to_string),
        content: content.to_string(),
        detail_content: None,
        location_keyword: None,
        locations: None,
        tags: if tags.is_empty() {
            None
        } else {
            Some(tags.iter().map(|tag| (*tag).to_string()).collect())
        },
        image_url: image_url.map(str::to_string),
        kind,
    }
}

fn seed_sections() -> Vec<(SectionId, TravelSection)> {
    vec![
        (
            SectionId::Prep,
            TravelSection {
                id: "prep".to_string(),
                title: "行前准备".to_string(),
                description: "票务信息与核心装备".to_string(),
                items: vec![seed_item(
                    "p1",
                    "去程火车：G107 (已出票)",
                    Some("2月7日出发"),
                    "08:56 北京西站开 \n14:19 抵达哈尔滨西站\n\n提示：车程约5.5小时，建议准备颈枕和一些零食。",
                    &["已完成", "交通"],
                    ItemKind::Alert,
                    Some("https://images.unsplash.com/photo-1474487548417-781cb714c2f3?q=80&w=800&auto=format&fit=crop"),
                )],
            },
        ),
        (
            SectionId::Harbin,
            TravelSection {
                id: "harbin".to_string(),
                title: "哈尔滨：冰雪与建筑".to_string(),
                description: "2月7日 - 2月10日 · 住在老道外".to_string(),
                items: vec![
                    seed_item(
                        "h-hotel",
                        "住宿信息",
                        None,
                        "位置优势：位于“老道外”，出门就是中华巴洛克风情街。这里是哈尔滨的发源地，美食极多，且比中央大街更具烟火气。",
                        &["住宿", "老道外"],
                        ItemKind::Hotel,
                        Some("https://images.unsplash.com/photo-1571003123894-1f0594d2b5d9?q=80&w=800&auto=format&fit=crop"),
                    ),
                    seed_item(
                        "h-d3",
                        "Day 3: 冰雪大世界",
                        Some("2月9日 (周一)"),
                        "上午：睡个懒觉。\n12:30 前往【冰雪大世界】。白天看雪雕，下午排大滑梯/摩天轮。\n16:00 园区开灯，拍摄绝美蓝调时刻（务必贴好暖宝宝）。\n18:30 晚餐：铁锅炖大鹅或铜锅涮肉，暖暖身子。",
                        &["重点行程", "保暖"],
                        ItemKind::Activity,
                        Some("https://images.unsplash.com/photo-1639922240974-9f7062482346?q=80&w=800&auto=format&fit=crop"),
                    ),
                ],
            },
        ),
        (
            SectionId::Qiqihar,
            TravelSection {
                id: "qiqihar".to_string(),
                title: "齐齐哈尔：烤肉之都".to_string(),
                description: "2月10日 - 2月15日 · 纯粹的美食与雪原".to_string(),
                items: vec![
                    seed_item(
                        "q-food",
                        "必做：疯狂吃烤肉",
                        None,
                        "齐齐哈尔烤肉是必吃项！肉是按“斤”拌的。\n1. 传统老店：马家、顺玉、林家。\n2. 特色店：完美生活（环境好）、敬子烤肉。\n3. 搭配：必须喝“雪菲力”饮料，解腻一绝。",
                        &["美食", "核心"],
                        ItemKind::Food,
                        Some("https://images.unsplash.com/photo-1594041680508-e39846e34721?q=80&w=800&auto=format&fit=crop"),
                    ),
                    seed_item(
                        "q-crane",
                        "必做：扎龙观鹤",
                        None,
                        "前往扎龙自然保护区看丹顶鹤雪地放飞。\n提示：旷野风极大，体感温度比市区低10度，务必穿上最厚的装备（两层羽绒服也不为过）。",
                        &["景点", "视觉震撼"],
                        ItemKind::Activity,
                        Some("https://images.unsplash.com/photo-1535083252457-6080fe29be45?q=80&w=800&auto=format&fit=crop"),
                    ),
                ],
            },
        ),
        (
            SectionId::Tips,
            TravelSection {
                id: "tips".to_string(),
                title: "生存指南 & 装备".to_string(),
                description: "防寒与避坑".to_string(),
                items: vec![seed_item(
                    "t-electronic",
                    "【重要】电子设备保暖",
                    None,
                    "手机在室外极易冻关机（尤其是iPhone）。\n1. 贴暖宝宝在手机背面。\n2. 不用时立刻放回内层口袋。\n3. 携带大容量充电宝。\n4. 进屋前把相机/手机放入密封袋，防止冷凝水损坏电路。",
                    &["数码", "紧急"],
                    ItemKind::Alert,
                    Some("https://images.unsplash.com/photo-1512428559087-560fa5ce7d02?q=80&w=800&auto=format&fit=crop"),
                )],
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn initial_plan_has_all_four_tabs() {
        let plan = TravelPlan::initial();
        for id in super::super::SECTION_ORDER {
            assert!(plan.section(id).is_some(), "missing section {id}");
        }
        assert_eq!(plan.hero_image, DEFAULT_HERO_IMAGE);
        assert_eq!(plan.last_updated, None);
    }

    #[test]
    fn normalize_keeps_current_shape() {
        let mut plan = TravelPlan::initial();
        plan.stamp();
        let value = serde_json::to_value(&plan).unwrap();
        let normalized = normalize_plan(value).unwrap();
        assert_eq!(normalized, plan);
    }

    #[test]
    fn normalize_wraps_legacy_section_map() {
        let plan = TravelPlan::initial();
        // Legacy documents were the bare section map.
        let legacy = serde_json::to_value(&plan.sections).unwrap();

        let normalized = normalize_plan(legacy).unwrap();
        assert_eq!(normalized.hero_image, DEFAULT_HERO_IMAGE);
        assert_eq!(normalized.sections, plan.sections);
        assert_eq!(normalized.last_updated, None);
    }

    #[test]
    fn normalize_rejects_garbage() {
        assert!(normalize_plan(serde_json::json!({"sections": 42})).is_err());
    }

    #[test]
    fn plan_wire_format_uses_camel_case() {
        let plan = TravelPlan::initial();
        let value = serde_json::to_value(&plan).unwrap();
        assert!(value.get("heroImage").is_some());
        assert!(value.get("lastUpdated").is_none());
    }
}
