//! Sync engine: fetch-or-create, poll, push ingress, and optimistic save.
//!
//! All four state triggers (bootstrap fetch, periodic poll, realtime push,
//! local save) converge through [`merge`], so there is no lock discipline:
//! a stale in-flight completion can only re-apply an equal-or-older
//! document, which the merge rule turns into a no-op.

use serde_json::Value;
use tokio::sync::mpsc;

use crate::cache::PlanCache;
use crate::config::SyncConfig;
use crate::merge::merge;
use crate::models::{normalize_plan, ItemPatch, RecordId, SectionId, TravelItem, TravelPlan};
use crate::store::{RemotePlan, RemoteStore};
use crate::{Error, Result};

/// Status label shown next to the itinerary. Labels only: apart from the
/// poll skip while a save is in flight, no operation is gated on them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncStatus {
    Idle,
    Saving,
    Synced,
    Error,
}

/// Owns the current document, the canonical record id, and the sync status.
pub struct SyncEngine<S: RemoteStore, C: PlanCache> {
    store: S,
    cache: C,
    plan: TravelPlan,
    record_id: Option<RecordId>,
    status: SyncStatus,
    last_error: Option<String>,
}

impl<S: RemoteStore, C: PlanCache> SyncEngine<S, C> {
    /// Synchronous first paint: cached plan (or the built-in default) and
    /// cached record id, no network.
    pub fn new(store: S, cache: C) -> Self {
        let plan = cache.load().unwrap_or_else(TravelPlan::initial);
        let record_id = cache.load_record_id();
        Self {
            store,
            cache,
            plan,
            record_id,
            status: SyncStatus::Idle,
            last_error: None,
        }
    }

    pub fn plan(&self) -> &TravelPlan {
        &self.plan
    }

    pub const fn record_id(&self) -> Option<RecordId> {
        self.record_id
    }

    pub const fn status(&self) -> SyncStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Fetch-or-create the canonical record and reconcile with local state.
    ///
    /// Never returns an error: failures land in `status`/`last_error` and
    /// the last-loaded (possibly cached) document stays usable.
    pub async fn bootstrap(&mut self) {
        match self.store.fetch_first().await {
            Ok(Some(remote)) => self.adopt_remote(remote, true).await,
            Ok(None) => self.create_initial_record().await,
            Err(error) => self.fail(error.to_string()),
        }
    }

    /// One fetch-and-merge cycle; the correctness fallback when the push
    /// channel is unavailable. Skipped while a save is in flight to avoid
    /// racing the pending write.
    pub async fn poll(&mut self) {
        if self.status == SyncStatus::Saving {
            return;
        }

        match self.store.fetch_first().await {
            Ok(Some(remote)) => self.adopt_remote(remote, false).await,
            Ok(None) => {}
            Err(error) => self.fail(error.to_string()),
        }
    }

    /// Push-payload ingress: normalize, merge, adopt, cache.
    pub fn apply_remote(&mut self, document: Value) {
        match normalize_plan(document) {
            Ok(remote_plan) => {
                self.plan = merge(remote_plan, self.plan.clone());
                self.cache.store(&self.plan);
                self.status = SyncStatus::Synced;
                self.last_error = None;
            }
            Err(error) => {
                tracing::warn!("Ignoring malformed remote change: {error}");
            }
        }
    }

    /// Stamp and adopt `new_plan` immediately, then write it through.
    ///
    /// The optimistic local state is never rolled back on failure: the
    /// user's edit stays visible, and its fresh stamp makes the next
    /// poll/push cycle recognize it as newer.
    pub async fn save(&mut self, mut new_plan: TravelPlan) {
        new_plan.stamp();
        self.plan = new_plan;
        self.cache.store(&self.plan);
        self.status = SyncStatus::Saving;
        self.last_error = None;

        let document = match serde_json::to_value(&self.plan) {
            Ok(document) => document,
            Err(error) => {
                self.fail(format!("Serialization error: {error}"));
                return;
            }
        };

        let outcome = match self.record_id {
            Some(id) => self.store.update(id, &document).await,
            None => match self.store.insert(&document).await {
                Ok(id) => {
                    self.record_id = Some(id);
                    self.cache.store_record_id(id);
                    Ok(())
                }
                Err(error) => Err(error),
            },
        };

        match outcome {
            Ok(()) => {
                self.status = SyncStatus::Synced;
                tracing::debug!("Plan saved to record {:?}", self.record_id);
            }
            Err(error) => self.fail(format!("Save failed: {error}")),
        }
    }

    /// Patch one item by id and save. Absent ids are a silent no-op, like
    /// the rest of the editing surface.
    pub async fn update_item(
        &mut self,
        section: SectionId,
        item_id: &str,
        patch: ItemPatch,
    ) -> Result<()> {
        let mut new_plan = self.plan.clone();
        let section_data = new_plan
            .section_mut(section)
            .ok_or_else(|| Error::UnknownSection(section.to_string()))?;
        if let Some(item) = section_data
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
        {
            item.apply(patch);
        }
        self.save(new_plan).await;
        Ok(())
    }

    /// Append a placeholder item and save; returns the generated id.
    pub async fn add_item(&mut self, section: SectionId) -> Result<String> {
        let mut new_plan = self.plan.clone();
        let section_data = new_plan
            .section_mut(section)
            .ok_or_else(|| Error::UnknownSection(section.to_string()))?;
        let item = TravelItem::placeholder();
        let id = item.id.clone();
        section_data.items.push(item);
        self.save(new_plan).await;
        Ok(id)
    }

    /// Remove one item by id and save. An emptied section keeps its empty
    /// item list.
    pub async fn delete_item(&mut self, section: SectionId, item_id: &str) -> Result<()> {
        let mut new_plan = self.plan.clone();
        let section_data = new_plan
            .section_mut(section)
            .ok_or_else(|| Error::UnknownSection(section.to_string()))?;
        section_data.items.retain(|item| item.id != item_id);
        self.save(new_plan).await;
        Ok(())
    }

    /// Replace the hero image (URL or data URL) and save.
    pub async fn set_hero_image(&mut self, value: String) {
        let mut new_plan = self.plan.clone();
        new_plan.hero_image = value;
        self.save(new_plan).await;
    }

    async fn adopt_remote(&mut self, remote: RemotePlan, reassert_local: bool) {
        let remote_plan = match normalize_plan(remote.data) {
            Ok(plan) => plan,
            Err(error) => {
                self.fail(format!("Malformed remote document: {error}"));
                return;
            }
        };

        let local_newer =
            self.plan.last_updated.unwrap_or(0) > remote_plan.last_updated.unwrap_or(0);

        self.plan = merge(remote_plan, self.plan.clone());
        self.record_id = Some(remote.id);
        self.cache.store(&self.plan);
        self.cache.store_record_id(remote.id);
        self.status = SyncStatus::Synced;
        self.last_error = None;

        if reassert_local && local_newer {
            // Self-healing: this client holds unsynced edits, push them back.
            tracing::info!("Local plan is newer than remote, re-asserting it");
            self.save(self.plan.clone()).await;
        }
    }

    async fn create_initial_record(&mut self) {
        let mut plan = TravelPlan::initial();
        plan.stamp();
        let document = match serde_json::to_value(&plan) {
            Ok(document) => document,
            Err(error) => {
                self.fail(format!("Serialization error: {error}"));
                return;
            }
        };

        match self.store.insert(&document).await {
            Ok(id) => {
                tracing::info!("Remote table was empty, created initial record {id}");
                self.plan = plan;
                self.record_id = Some(id);
                self.cache.store(&self.plan);
                self.cache.store_record_id(id);
                self.status = SyncStatus::Synced;
                self.last_error = None;
            }
            Err(error) => self.fail(error.to_string()),
        }
    }

    fn fail(&mut self, message: String) {
        tracing::warn!("Sync error: {message}");
        self.status = SyncStatus::Error;
        self.last_error = Some(message);
    }
}

/// Drive an engine until the `shutdown` future resolves.
///
/// Two independent producers feed one state-owning consumer: the realtime
/// listener publishes changed documents into an mpsc channel, and a
/// fixed-interval ticker triggers the polling fallback. Neither producer
/// touches engine state directly.
pub async fn run<S, C, F>(
    engine: &mut SyncEngine<S, C>,
    config: &SyncConfig,
    shutdown: impl std::future::Future<Output = ()>,
    mut observer: F,
) where
    S: RemoteStore,
    C: PlanCache,
    F: FnMut(&SyncEngine<S, C>),
{
    engine.bootstrap().await;
    observer(engine);

    let (events_tx, mut events_rx) = mpsc::channel::<Value>(16);
    let mut listener: Option<tokio::task::JoinHandle<()>> = None;

    let mut poll_tick = tokio::time::interval(config.poll_interval);
    poll_tick.tick().await; // skip the immediate first tick, bootstrap just ran

    tokio::pin!(shutdown);
    loop {
        // The record id may only become known on a later poll (first run
        // against an unreachable store); open the push channel as soon as
        // it is.
        if listener.is_none() {
            if let Some(record_id) = engine.record_id() {
                listener = Some(spawn_listener(config.clone(), record_id, events_tx.clone()));
            }
        }

        tokio::select! {
            () = &mut shutdown => break,
            _ = poll_tick.tick() => {
                engine.poll().await;
                observer(engine);
            }
            document = events_rx.recv() => {
                if let Some(document) = document {
                    engine.apply_remote(document);
                    observer(engine);
                }
            }
        }
    }

    if let Some(task) = listener {
        task.abort();
    }
}

fn spawn_listener(
    config: SyncConfig,
    record_id: RecordId,
    events: mpsc::Sender<Value>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(error) = crate::realtime::listen(config, record_id, events).await {
            tracing::warn!("Realtime listener unavailable, polling only: {error}");
        }
    })
}
