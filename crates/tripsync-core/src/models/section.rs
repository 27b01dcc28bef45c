//! Section model and the fixed tab set

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TravelItem;

/// Fixed display order of the tabs; also the export order.
pub const SECTION_ORDER: [SectionId; 4] = [
    SectionId::Prep,
    SectionId::Harbin,
    SectionId::Qiqihar,
    SectionId::Tips,
];

/// One of the fixed itinerary tabs. The set is not user-extensible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Prep,
    Harbin,
    Qiqihar,
    Tips,
}

impl SectionId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prep => "prep",
            Self::Harbin => "harbin",
            Self::Qiqihar => "qiqihar",
            Self::Tips => "tips",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "prep" => Ok(Self::Prep),
            "harbin" => Ok(Self::Harbin),
            "qiqihar" => Ok(Self::Qiqihar),
            "tips" => Ok(Self::Tips),
            other => Err(crate::Error::UnknownSection(other.to_string())),
        }
    }
}

/// A named, ordered list of items shown under one tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelSection {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub items: Vec<TravelItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn section_id_round_trips_through_str() {
        for id in SECTION_ORDER {
            assert_eq!(id.as_str().parse::<SectionId>().unwrap(), id);
        }
    }

    #[test]
    fn section_id_parse_rejects_unknown_tab() {
        assert!("beijing".parse::<SectionId>().is_err());
    }

    #[test]
    fn section_tolerates_missing_items_key() {
        let raw = r#"{"id": "prep", "title": "行前准备", "description": "票务"}"#;
        let section: TravelSection = serde_json::from_str(raw).unwrap();
        assert!(section.items.is_empty());
    }
}
