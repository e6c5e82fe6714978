use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};

use crate::config::StoreConfig;
use crate::item::{Item, ItemDraft, ItemId, ItemPatch};
use crate::store::error::StoreError;
use crate::store::wire::{is_not_found_sentinel, ItemPayload, ItemRecord};
use crate::store::{DeleteOutcome, ListedItem, RemoteStore};

/// [`RemoteStore`] speaking JSON over HTTP:
/// `GET /items`, `POST /items`, `PUT /items/{id}`, `DELETE /items/{id}`.
///
/// Timeouts come from the transport only. A call that exceeds them fails
/// as [`StoreError::Network`]. Item ids are opaque and always sent as one
/// percent-encoded path segment.
pub struct HttpStore {
    client: Client,
    collection_url: Url,
}

impl HttpStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.into()))
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .build()
            .map_err(|e| StoreError::Network {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        let collection_url =
            Url::parse(&config.collection_url()).map_err(|e| StoreError::Network {
                message: format!("Invalid store URL '{}': {}", config.collection_url(), e),
            })?;

        Ok(Self {
            client,
            collection_url,
        })
    }

    pub fn collection_url(&self) -> &str {
        self.collection_url.as_str()
    }

    fn item_url(&self, id: &ItemId) -> Result<Url, StoreError> {
        let mut url = self.collection_url.clone();
        url.path_segments_mut()
            .map_err(|()| StoreError::Network {
                message: format!("Store URL '{}' cannot take an item path", self.collection_url),
            })?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }
}

/// Read the body of a response, classifying non-success statuses.
async fn success_body(response: Response) -> Result<String, StoreError> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(StoreError::from_status(status, &body))
    }
}

fn parse_record(body: &str) -> Result<ItemRecord, StoreError> {
    if body.trim().is_empty() {
        return Ok(ItemRecord::default());
    }
    serde_json::from_str(body).map_err(|e| StoreError::Decode {
        message: e.to_string(),
    })
}

#[async_trait]
impl RemoteStore for HttpStore {
    async fn list(&self) -> Result<Vec<ListedItem>, StoreError> {
        tracing::debug!(url = %self.collection_url, "GET items");
        let response = self.client.get(self.collection_url.clone()).send().await?;
        let body = success_body(response).await?;

        let records: Vec<ItemRecord> =
            serde_json::from_str(&body).map_err(|e| StoreError::Decode {
                message: e.to_string(),
            })?;

        let mut items = Vec::with_capacity(records.len());
        for record in records {
            match record.into_listed() {
                Ok(item) => items.push(item),
                Err(err) => tracing::warn!(error = %err, "Skipping unusable listed item"),
            }
        }
        Ok(items)
    }

    async fn create(&self, draft: &ItemDraft) -> Result<Item, StoreError> {
        tracing::debug!(url = %self.collection_url, "POST item");
        let response = self
            .client
            .post(self.collection_url.clone())
            .json(&ItemPayload::create(draft))
            .send()
            .await?;
        let body = success_body(response).await?;
        parse_record(&body)?.into_created(draft)
    }

    async fn update(&self, id: &ItemId, patch: &ItemPatch) -> Result<Item, StoreError> {
        let url = self.item_url(id)?;
        tracing::debug!(url = %url, "PUT item");
        let response = self
            .client
            .put(url)
            .json(&ItemPayload::update(patch))
            .send()
            .await?;
        let body = success_body(response).await?;
        Ok(parse_record(&body)?.into_updated(id, patch))
    }

    async fn delete(&self, id: &ItemId) -> Result<DeleteOutcome, StoreError> {
        let url = self.item_url(id)?;
        tracing::debug!(url = %url, "DELETE item");
        let response = self.client.delete(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(DeleteOutcome::NotFound);
        }
        let body = success_body(response).await?;
        if is_not_found_sentinel(&body) {
            Ok(DeleteOutcome::NotFound)
        } else {
            Ok(DeleteOutcome::Deleted)
        }
    }
}
