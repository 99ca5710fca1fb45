use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::{json, Value};

use creatordb_core::creators::CreatorDocument;

use crate::error::StoreError;

/// Client for the cache collection's HTTP data API.
///
/// Every call is a single `POST {base}/action/{op}` round trip carrying the
/// data source, database, and collection names plus the operation payload.
/// No retries, no transactions, no local validation.
pub struct StoreClient {
    client: Client,
    base_url: Url,
    api_key: String,
    data_source: String,
    database: String,
    collection: String,
}

/// Result of an `updateOne` call.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    #[serde(default)]
    pub matched_count: u64,
    #[serde(default)]
    pub modified_count: u64,
}

impl StoreClient {
    /// Creates a new client for one collection of the remote store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`StoreError::InvalidUrl`] if `base_url`
    /// does not parse.
    pub fn new(
        base_url: &str,
        api_key: &str,
        data_source: &str,
        database: &str,
        collection: &str,
        timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("creatordb/0.1 (creator-discovery)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| StoreError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_owned(),
            data_source: data_source.to_owned(),
            database: database.to_owned(),
            collection: collection.to_owned(),
        })
    }

    /// Runs a `find` with the given filter, returning up to `limit` documents.
    ///
    /// Documents that no longer match the current schema are skipped with a
    /// warning rather than failing the whole call.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on network failure, a non-2xx response, or an
    /// undecodable response envelope.
    pub async fn find(
        &self,
        filter: Value,
        limit: Option<u32>,
    ) -> Result<Vec<CreatorDocument>, StoreError> {
        let mut payload = json!({ "filter": filter });
        if let Some(limit) = limit {
            payload["limit"] = json!(limit);
        }

        let body = self.action("find", payload).await?;
        let raw = body
            .get("documents")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let documents = raw
            .into_iter()
            .filter_map(|doc| match serde_json::from_value::<CreatorDocument>(doc) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed creator document");
                    None
                }
            })
            .collect();

        Ok(documents)
    }

    /// Inserts a new creator document, returning the stored id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on network failure, a non-2xx response, or a
    /// response without an `insertedId`.
    pub async fn insert_one(&self, document: &CreatorDocument) -> Result<String, StoreError> {
        let payload = json!({ "document": document });
        let body = self.action("insertOne", payload).await?;

        body.get("insertedId")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned)
            .ok_or_else(|| StoreError::Deserialize {
                context: "insertOne".to_string(),
                source: serde::de::Error::custom("response missing insertedId"),
            })
    }

    /// Applies `update` to the first document matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on network failure, a non-2xx response, or an
    /// undecodable response envelope.
    pub async fn update_one(
        &self,
        filter: Value,
        update: Value,
    ) -> Result<UpdateOutcome, StoreError> {
        let payload = json!({ "filter": filter, "update": update });
        let body = self.action("updateOne", payload).await?;

        serde_json::from_value(body).map_err(|e| StoreError::Deserialize {
            context: "updateOne".to_string(),
            source: e,
        })
    }

    /// Counts all documents in the collection via an `aggregate` `$count`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on network failure, a non-2xx response, or an
    /// undecodable response envelope.
    pub async fn count_documents(&self) -> Result<u64, StoreError> {
        let payload = json!({ "pipeline": [ { "$count": "count" } ] });
        let body = self.action("aggregate", payload).await?;

        // An empty collection aggregates to zero documents, not a zero count.
        Ok(body
            .get("documents")
            .and_then(Value::as_array)
            .and_then(|docs| docs.first())
            .and_then(|doc| doc.get("count"))
            .and_then(Value::as_u64)
            .unwrap_or(0))
    }

    /// Sends one data-API action, merging in the collection coordinates.
    async fn action(&self, action: &str, mut payload: Value) -> Result<Value, StoreError> {
        payload["dataSource"] = json!(self.data_source);
        payload["database"] = json!(self.database);
        payload["collection"] = json!(self.collection);

        let url = self
            .base_url
            .join(&format!("action/{action}"))
            .map_err(|e| StoreError::InvalidUrl {
                url: format!("{}action/{action}", self.base_url),
                reason: e.to_string(),
            })?;

        let response = self
            .client
            .post(url)
            .header("api-key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(StoreError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| StoreError::Deserialize {
            context: format!("action/{action}"),
            source: e,
        })
    }
}
