//! Remote plan store.
//!
//! The sync engine sees the remote side purely as a keyed document store
//! with three operations; the Supabase implementation lives in
//! [`supabase`].

mod supabase;

use serde_json::Value;
use thiserror::Error;

use crate::models::RecordId;

pub use supabase::SupabaseStore;

/// One remote row: the generated key plus the raw document column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePlan {
    pub id: RecordId,
    pub data: Value,
}

/// Remote-call failures, classified for a short user-facing message.
///
/// No variant is fatal: callers keep rendering the in-memory document and
/// let the periodic poll act as the retry mechanism.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Network unreachable: {0}")]
    Network(String),
    #[error("Access key rejected: {0}")]
    Unauthorized(String),
    #[error("Backing table missing: {0}")]
    TableMissing(String),
    #[error("Store API error: {0}")]
    Api(String),
    #[error("Invalid store payload: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Seam between the sync engine and the hosted backend.
pub trait RemoteStore: Send + Sync + 'static {
    /// The record with the numerically smallest id, if any.
    fn fetch_first(&self) -> impl std::future::Future<Output = StoreResult<Option<RemotePlan>>> + Send;

    /// Insert a new record, returning its generated id.
    fn insert(&self, data: &Value) -> impl std::future::Future<Output = StoreResult<RecordId>> + Send;

    /// Overwrite the document column of an existing record.
    fn update(&self, id: RecordId, data: &Value) -> impl std::future::Future<Output = StoreResult<()>> + Send;
}
