//! Local plan cache.
//!
//! A latency/offline optimization only, never a sync channel: the two
//! collaborators each have their own cache. Read synchronously on startup
//! for first paint, written on every successful fetch, push, or save.

use std::path::{Path, PathBuf};

use crate::models::{normalize_plan, RecordId, TravelPlan};

const PLAN_FILE_NAME: &str = "plan.json";
const RECORD_ID_FILE_NAME: &str = "record-id";

/// Persistence seam for the last-known document and record id.
///
/// Implementations must tolerate absence and corruption by returning `None`,
/// and must never surface store failures to the sync path.
pub trait PlanCache: Send + 'static {
    fn load(&self) -> Option<TravelPlan>;
    fn store(&self, plan: &TravelPlan);
    fn load_record_id(&self) -> Option<RecordId>;
    fn store_record_id(&self, id: RecordId);
}

/// File-backed cache under the per-user data directory.
#[derive(Debug, Clone)]
pub struct FilePlanCache {
    dir: PathBuf,
}

impl FilePlanCache {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn plan_path(&self) -> PathBuf {
        self.dir.join(PLAN_FILE_NAME)
    }

    fn record_id_path(&self) -> PathBuf {
        self.dir.join(RECORD_ID_FILE_NAME)
    }

    fn write_file(&self, path: &Path, contents: &str) {
        if let Err(error) = std::fs::create_dir_all(&self.dir) {
            tracing::warn!("Failed to create cache directory {}: {error}", self.dir.display());
            return;
        }
        if let Err(error) = std::fs::write(path, contents) {
            tracing::warn!("Failed to write cache file {}: {error}", path.display());
        }
    }
}

impl PlanCache for FilePlanCache {
    fn load(&self) -> Option<TravelPlan> {
        let raw = std::fs::read_to_string(self.plan_path()).ok()?;
        let value = serde_json::from_str(&raw).ok()?;
        match normalize_plan(value) {
            Ok(plan) => Some(plan),
            Err(error) => {
                tracing::warn!("Discarding corrupt cached plan: {error}");
                None
            }
        }
    }

    fn store(&self, plan: &TravelPlan) {
        match serde_json::to_string(plan) {
            Ok(serialized) => self.write_file(&self.plan_path(), &serialized),
            Err(error) => tracing::warn!("Failed to serialize plan for cache: {error}"),
        }
    }

    fn load_record_id(&self) -> Option<RecordId> {
        let raw = std::fs::read_to_string(self.record_id_path()).ok()?;
        raw.trim().parse::<i64>().ok().map(RecordId)
    }

    fn store_record_id(&self, id: RecordId) {
        self.write_file(&self.record_id_path(), &id.0.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_cache() -> (tempfile::TempDir, FilePlanCache) {
        let dir = tempfile::tempdir().unwrap();
        let cache = FilePlanCache::new(dir.path());
        (dir, cache)
    }

    #[test]
    fn load_returns_none_when_empty() {
        let (_dir, cache) = temp_cache();
        assert_eq!(cache.load(), None);
        assert_eq!(cache.load_record_id(), None);
    }

    #[test]
    fn plan_round_trips() {
        let (_dir, cache) = temp_cache();
        let mut plan = TravelPlan::initial();
        plan.stamp();

        cache.store(&plan);
        assert_eq!(cache.load(), Some(plan));
    }

    #[test]
    fn record_id_round_trips() {
        let (_dir, cache) = temp_cache();
        cache.store_record_id(RecordId(7));
        assert_eq!(cache.load_record_id(), Some(RecordId(7)));
    }

    #[test]
    fn corrupt_plan_file_loads_as_none() {
        let (dir, cache) = temp_cache();
        std::fs::write(dir.path().join(PLAN_FILE_NAME), "not json{").unwrap();
        assert_eq!(cache.load(), None);
    }

    #[test]
    fn legacy_cached_shape_is_upgraded() {
        let (dir, cache) = temp_cache();
        let sections = serde_json::to_string(&TravelPlan::initial().sections).unwrap();
        std::fs::write(dir.path().join(PLAN_FILE_NAME), sections).unwrap();

        let loaded = cache.load().unwrap();
        assert_eq!(loaded.hero_image, crate::models::DEFAULT_HERO_IMAGE);
    }
}
