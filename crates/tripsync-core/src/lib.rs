//! tripsync-core - Core library for tripsync
//!
//! This crate contains the shared itinerary models, the last-write-wins
//! merge, the local plan cache, the Supabase store client, and the sync
//! engine used by the tripsync CLI.

pub mod cache;
pub mod config;
pub mod error;
pub mod export;
pub mod media;
pub mod merge;
pub mod models;
pub mod realtime;
pub mod store;
pub mod sync;
pub mod util;

pub use error::{Error, Result};
pub use models::{ItemKind, RecordId, TravelItem, TravelPlan, TravelSection};
