//! Push subscription over the Supabase Realtime websocket.
//!
//! Speaks just enough of the Phoenix channel protocol to join one topic
//! scoped to the canonical record and forward each change's new document
//! into the sync loop. Errors end the task with a warning; the periodic
//! poll remains the correctness fallback, so no reconnect logic lives here.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::config::SyncConfig;
use crate::models::RecordId;
use crate::{Error, Result};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(25);

/// Derive the realtime websocket endpoint from the project URL.
pub fn socket_url(config: &SyncConfig) -> Result<String> {
    let host = config
        .supabase_url
        .strip_prefix("https://")
        .map(|rest| format!("wss://{rest}"))
        .or_else(|| {
            config
                .supabase_url
                .strip_prefix("http://")
                .map(|rest| format!("ws://{rest}"))
        })
        .ok_or_else(|| {
            Error::InvalidConfiguration(
                "Supabase URL must include http:// or https://".to_string(),
            )
        })?;

    Ok(format!(
        "{host}/realtime/v1/websocket?apikey={}&vsn=1.0.0",
        config.supabase_anon_key
    ))
}

/// Phoenix join frame subscribing to changes on the one canonical row.
#[must_use]
pub fn join_message(table: &str, record_id: RecordId) -> Value {
    serde_json::json!({
        "topic": format!("realtime:room:{record_id}"),
        "event": "phx_join",
        "payload": {
            "config": {
                "postgres_changes": [{
                    "event": "*",
                    "schema": "public",
                    "table": table,
                    "filter": format!("id=eq.{record_id}"),
                }],
            },
        },
        "ref": "1",
    })
}

fn heartbeat_message(reference: u64) -> Value {
    serde_json::json!({
        "topic": "phoenix",
        "event": "heartbeat",
        "payload": {},
        "ref": reference.to_string(),
    })
}

/// Pull the changed row's document column out of a realtime frame.
///
/// Returns `None` for heartbeats, join replies, and frames without a new
/// row (deletes never happen in normal operation).
#[must_use]
pub fn extract_document(frame: &str) -> Option<Value> {
    let message: Value = serde_json::from_str(frame).ok()?;
    if message.get("event")?.as_str()? != "postgres_changes" {
        return None;
    }

    let record = message.get("payload")?.get("data")?.get("record")?;
    record.get("data").cloned()
}

/// Listen for remote changes until the socket closes or `events` is dropped.
///
/// Each received document is sent through `events` as-is; the consumer is
/// responsible for normalization and merge.
pub async fn listen(
    config: SyncConfig,
    record_id: RecordId,
    events: mpsc::Sender<Value>,
) -> Result<()> {
    let url = socket_url(&config)?;
    let (mut socket, _response) = connect_async(&url)
        .await
        .map_err(|error| Error::InvalidConfiguration(format!("realtime connect failed: {error}")))?;

    let join = join_message(&config.table, record_id);
    socket
        .send(Message::Text(join.to_string().into()))
        .await
        .map_err(|error| Error::InvalidConfiguration(format!("realtime join failed: {error}")))?;
    tracing::debug!("Realtime channel joined for record {record_id}");

    let mut heartbeat = tokio::time::interval(HEARTBEAT_INTERVAL);
    heartbeat.tick().await; // first tick completes immediately
    let mut heartbeat_ref = 1u64;

    loop {
        tokio::select! {
            _ = heartbeat.tick() => {
                heartbeat_ref += 1;
                let frame = heartbeat_message(heartbeat_ref);
                if let Err(error) = socket.send(Message::Text(frame.to_string().into())).await {
                    tracing::warn!("Realtime heartbeat failed, dropping to polling: {error}");
                    return Ok(());
                }
            }
            incoming = socket.next() => {
                match incoming {
                    Some(Ok(Message::Text(frame))) => {
                        if let Some(document) = extract_document(&frame) {
                            tracing::debug!("Remote change received");
                            if events.send(document).await.is_err() {
                                return Ok(()); // consumer gone, shut down
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::warn!("Realtime channel closed, dropping to polling");
                        return Ok(());
                    }
                    Some(Ok(_)) => {}
                    Some(Err(error)) => {
                        tracing::warn!("Realtime channel error, dropping to polling: {error}");
                        return Ok(());
                    }
                }
            }
        }
    }
}
