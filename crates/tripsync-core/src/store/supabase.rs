//! Supabase PostgREST implementation of the plan store.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use super::{RemotePlan, StoreError, StoreResult};
use crate::config::SyncConfig;
use crate::models::RecordId;
use crate::util::compact_text;
use crate::{Error, Result};

#[derive(Clone)]
pub struct SupabaseStore {
    rest_url: String,
    anon_key: String,
    table: String,
    client: Client,
}

impl SupabaseStore {
    /// Build a store client for the configured project.
    ///
    /// The request timeout makes a hung call resolve to a `Network` error
    /// instead of leaving the caller in `Saving` forever.
    pub fn new(config: &SyncConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|error| Error::InvalidConfiguration(error.to_string()))?;

        Ok(Self {
            rest_url: format!("{}/rest/v1", config.supabase_url),
            anon_key: config.supabase_anon_key.clone(),
            table: config.table.clone(),
            client,
        })
    }

    fn table_url(&self) -> String {
        format!("{}/{}", self.rest_url, self.table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
    }

    async fn send(&self, request: RequestBuilder) -> StoreResult<reqwest::Response> {
        let response = request.send().await.map_err(classify_transport)?;
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(classify_response(status, &body))
    }
}

impl super::RemoteStore for SupabaseStore {
    async fn fetch_first(&self) -> StoreResult<Option<RemotePlan>> {
        let request = self.authorized(
            self.client
                .get(self.table_url())
                .query(&[("select", "id,data"), ("order", "id.asc"), ("limit", "1")]),
        );

        let rows = self.send(request).await?.json::<Vec<PlanRow>>().await
            .map_err(classify_transport)?;
        Ok(rows.into_iter().next().map(PlanRow::into_remote_plan))
    }

    async fn insert(&self, data: &Value) -> StoreResult<RecordId> {
        let request = self.authorized(
            self.client
                .post(self.table_url())
                .header("Prefer", "return=representation")
                .json(&serde_json::json!([{ "data": data }])),
        );

        let rows = self.send(request).await?.json::<Vec<PlanRow>>().await
            .map_err(classify_transport)?;
        rows.into_iter()
            .next()
            .map(|row| RecordId(row.id))
            .ok_or_else(|| StoreError::Api("insert returned no row".to_string()))
    }

    async fn update(&self, id: RecordId, data: &Value) -> StoreResult<()> {
        let request = self.authorized(
            self.client
                .patch(self.table_url())
                .query(&[("id", format!("eq.{id}"))])
                .json(&serde_json::json!({ "data": data })),
        );

        self.send(request).await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct PlanRow {
    id: i64,
    #[serde(default)]
    data: Value,
}

impl PlanRow {
    fn into_remote_plan(self) -> RemotePlan {
        RemotePlan {
            id: RecordId(self.id),
            data: self.data,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    code: Option<String>,
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
    hint: Option<String>,
}

fn classify_transport(error: reqwest::Error) -> StoreError {
    if error.is_connect() || error.is_timeout() {
        StoreError::Network(error.to_string())
    } else if error.is_decode() {
        StoreError::Api(format!("unreadable response: {error}"))
    } else {
        StoreError::Network(error.to_string())
    }
}

/// Classify a non-success response by status code plus the PostgREST error
/// payload's code/message.
fn classify_response(status: StatusCode, body: &str) -> StoreError {
    let parsed = serde_json::from_str::<PostgrestErrorBody>(body).ok();
    let code = parsed
        .as_ref()
        .and_then(|payload| payload.code.clone())
        .unwrap_or_default();
    let message = parsed
        .and_then(|payload| payload.message.or(payload.details).or(payload.hint))
        .map_or_else(|| compact_text(body), |text| compact_text(&text));
    let detail = if message.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", message, status.as_u16())
    };

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return StoreError::Unauthorized(detail);
    }
    if detail.contains("Invalid API key") {
        return StoreError::Unauthorized(detail);
    }
    if status == StatusCode::NOT_FOUND
        || code == "PGRST205"
        || code == "42P01"
        || detail.contains("does not exist")
        || detail.contains("Could not find the table")
    {
        return StoreError::TableMissing(detail);
    }

    StoreError::Api(detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_unauthorized_status() {
        let error = classify_response(StatusCode::UNAUTHORIZED, r#"{"message":"JWT expired"}"#);
        assert!(matches!(error, StoreError::Unauthorized(_)));
        assert!(error.to_string().contains("JWT expired"));
    }

    #[test]
    fn classify_invalid_api_key_message() {
        let error = classify_response(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Invalid API key","hint":"Double check your anon key."}"#,
        );
        assert!(matches!(error, StoreError::Unauthorized(_)));
    }

    #[test]
    fn classify_missing_table_code() {
        let error = classify_response(
            StatusCode::NOT_ACCEPTABLE,
            r#"{"code":"PGRST205","message":"Could not find the table 'public.travel_plans'"}"#,
        );
        assert!(matches!(error, StoreError::TableMissing(_)));
    }

    #[test]
    fn classify_missing_relation_code() {
        let error = classify_response(
            StatusCode::BAD_REQUEST,
            r#"{"code":"42P01","message":"relation \"public.travel_plans\" does not exist"}"#,
        );
        assert!(matches!(error, StoreError::TableMissing(_)));
    }

    #[test]
    fn classify_falls_back_to_api_error() {
        let error = classify_response(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(matches!(error, StoreError::Api(_)));
        assert!(error.to_string().contains("boom (500)"));
    }

    #[test]
    fn classify_empty_body_reports_status() {
        let error = classify_response(StatusCode::BAD_GATEWAY, "");
        assert!(error.to_string().contains("HTTP 502"));
    }
}
