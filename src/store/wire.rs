//! JSON bodies exchanged with the items endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::item::{Item, ItemDraft, ItemId, ItemPatch};
use crate::store::{ListedItem, StoreError};

/// Stores disagree on whether ids are strings or numbers; accept both.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(serde_json::Number),
}

impl WireId {
    fn into_item_id(self) -> ItemId {
        match self {
            WireId::Text(id) => ItemId::Store(id),
            WireId::Number(n) => ItemId::Store(n.to_string()),
        }
    }
}

/// An item as returned by the store. Every field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemRecord {
    #[serde(default)]
    id: Option<WireId>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    completed: Option<bool>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    created_at: Option<OffsetDateTime>,
}

impl ItemRecord {
    /// An entry of a list snapshot. Id and non-blank text are required.
    pub(crate) fn into_listed(self) -> Result<ListedItem, StoreError> {
        let id = self.id.ok_or_else(|| StoreError::Decode {
            message: "listed item has no id".to_string(),
        })?;
        let text = non_blank(self.text).ok_or_else(|| StoreError::Decode {
            message: "listed item has no text".to_string(),
        })?;
        Ok(ListedItem {
            id: id.into_item_id(),
            text,
            completed: self.completed.unwrap_or(false),
            created_at: self.created_at,
        })
    }

    /// The store's answer to a create. Only the id is mandatory; fields the
    /// store did not echo keep the values we sent.
    pub(crate) fn into_created(self, draft: &ItemDraft) -> Result<Item, StoreError> {
        let id = self.id.ok_or_else(|| StoreError::Decode {
            message: "created item has no id".to_string(),
        })?;
        Ok(Item {
            id: id.into_item_id(),
            text: non_blank(self.text).unwrap_or_else(|| draft.text.clone()),
            completed: self.completed.unwrap_or(draft.completed),
            created_at: draft.created_at,
        })
    }

    /// The store's answer to an update of `id`.
    pub(crate) fn into_updated(self, id: &ItemId, patch: &ItemPatch) -> Item {
        Item {
            id: id.clone(),
            text: non_blank(self.text).unwrap_or_else(|| patch.text.clone()),
            completed: self.completed.unwrap_or(patch.completed),
            created_at: patch.created_at,
        }
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

/// Request body for create and update. The identity of an update travels
/// in the path only, so the store keeps whatever id type it assigned.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemPayload<'a> {
    text: &'a str,
    completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl<'a> ItemPayload<'a> {
    pub(crate) fn create(draft: &'a ItemDraft) -> Self {
        Self {
            text: &draft.text,
            completed: draft.completed,
            created_at: draft.created_at,
        }
    }

    pub(crate) fn update(patch: &'a ItemPatch) -> Self {
        Self {
            text: &patch.text,
            completed: patch.completed,
            created_at: patch.created_at,
        }
    }
}

/// Some stores answer a delete of a missing item with 200 and a marker body
/// instead of a 404. Recognised markers: `{"notFound": true}` and
/// `{"error": "not found"}` (case-insensitive).
pub(crate) fn is_not_found_sentinel(body: &str) -> bool {
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) else {
        return false;
    };
    if map.get("notFound").and_then(Value::as_bool) == Some(true) {
        return true;
    }
    map.get("error")
        .and_then(Value::as_str)
        .is_some_and(|e| e.trim().eq_ignore_ascii_case("not found"))
}
