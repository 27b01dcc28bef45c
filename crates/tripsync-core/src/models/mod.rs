//! Data models for tripsync

mod item;
mod plan;
mod section;

pub use item::{ItemKind, ItemPatch, LocationRef, TravelItem};
pub use plan::{normalize_plan, RecordId, TravelPlan, DEFAULT_HERO_IMAGE};
pub use section::{SectionId, TravelSection, SECTION_ORDER};
