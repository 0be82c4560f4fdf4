//! Airtable REST backend
//!
//! Endpoints used:
//! - `GET    {api}/{base}/{table}?filterByFormula=..&maxRecords=..&pageSize=..&sort[0][field]=..`
//! - `POST   {api}/{base}/{table}` with `{ "records": [{ "fields": {..} }] }`
//! - `PATCH  {api}/{base}/{table}/{record}` with `{ "fields": {..} }`

use super::{DatastoreError, Fields, Filter, ListQuery, Record, TableStore};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Connection settings for the Airtable backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirtableSettings {
    pub api_url: String,
    pub token: Option<String>,
    pub base_id: Option<String>,
    pub timeout: Duration,
}

impl Default for AirtableSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.airtable.com/v0".to_string(),
            token: None,
            base_id: None,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone)]
pub struct AirtableStore {
    client: reqwest::Client,
    settings: Arc<AirtableSettings>,
}

impl AirtableStore {
    pub fn new(settings: AirtableSettings) -> Result<Self, DatastoreError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| DatastoreError::Network(format!("Failed to create HTTP client: {}", e)))?;

        tracing::debug!(api_url = %settings.api_url, "Airtable datastore configured");

        Ok(Self {
            client,
            settings: Arc::new(settings),
        })
    }

    fn token(&self) -> Result<&str, DatastoreError> {
        self.settings
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DatastoreError::Config("Missing setting: AIRTABLE_TOKEN".to_string()))
    }

    fn table_url(&self, table: &str) -> Result<String, DatastoreError> {
        let base_id = self
            .settings
            .base_id
            .as_deref()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| DatastoreError::Config("Missing setting: AIRTABLE_BASE_ID".to_string()))?;

        Ok(format!(
            "{}/{}/{}",
            self.settings.api_url.trim_end_matches('/'),
            base_id,
            urlencoding::encode(table)
        ))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, DatastoreError> {
        let response = request
            .bearer_auth(self.token()?)
            .send()
            .await
            .map_err(|e| DatastoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DatastoreError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

/// Query string pairs for a list request
pub(crate) fn list_params(query: &ListQuery) -> Vec<(String, String)> {
    let mut params = Vec::new();
    if let Some(n) = query.max_records {
        params.push(("maxRecords".to_string(), n.to_string()));
    }
    if let Some(n) = query.page_size {
        params.push(("pageSize".to_string(), n.to_string()));
    }
    if let Some(filter) = &query.filter {
        params.push(("filterByFormula".to_string(), formula(filter)));
    }
    if let Some(sort) = &query.sort {
        params.push(("sort[0][field]".to_string(), sort.field.clone()));
        params.push((
            "sort[0][direction]".to_string(),
            if sort.descending { "desc" } else { "asc" }.to_string(),
        ));
    }
    params
}

/// Render a filter as an Airtable formula
pub(crate) fn formula(filter: &Filter) -> String {
    match filter {
        Filter::FieldEqualsIgnoreCase { field, value } => {
            format!(
                "LOWER({{{}}})='{}'",
                field,
                escape_formula_string(&value.to_lowercase())
            )
        }
    }
}

/// Formula strings are single-quoted: escape backslashes and quotes
fn escape_formula_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    records: Vec<Record>,
}

impl TableStore for AirtableStore {
    fn name(&self) -> &'static str {
        "Airtable"
    }

    async fn list(&self, table: &str, query: ListQuery) -> Result<Vec<Record>, DatastoreError> {
        let url = self.table_url(table)?;
        let response = self
            .send(self.client.get(&url).query(&list_params(&query)))
            .await?;

        let body: ListResponse = response
            .json()
            .await
            .map_err(|e| DatastoreError::Decode(e.to_string()))?;

        tracing::debug!(table, count = body.records.len(), "Airtable list");
        Ok(body.records)
    }

    async fn create(&self, table: &str, fields: Fields) -> Result<Record, DatastoreError> {
        let url = self.table_url(table)?;
        let response = self
            .send(
                self.client
                    .post(&url)
                    .json(&json!({ "records": [{ "fields": fields }] })),
            )
            .await?;

        let body: ListResponse = response
            .json()
            .await
            .map_err(|e| DatastoreError::Decode(e.to_string()))?;

        body.records
            .into_iter()
            .next()
            .ok_or_else(|| DatastoreError::Decode("create returned no records".to_string()))
    }

    async fn update(
        &self,
        table: &str,
        record_id: &str,
        fields: Fields,
    ) -> Result<Record, DatastoreError> {
        let url = format!("{}/{}", self.table_url(table)?, urlencoding::encode(record_id));
        let response = self
            .send(self.client.patch(&url).json(&json!({ "fields": fields })))
            .await?;

        response
            .json()
            .await
            .map_err(|e| DatastoreError::Decode(e.to_string()))
    }
}
