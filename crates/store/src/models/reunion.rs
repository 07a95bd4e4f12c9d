//! Family reunion events (`reunions.json`).

use kinfolk_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};

use super::lenient_text;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reunion {
    pub id: RecordId,
    #[serde(flatten)]
    pub info: ReunionInput,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// Editable reunion fields. Updates replace the whole set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReunionInput {
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub year: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub attendees: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Fields the admin UI adds that have no dedicated slot.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ReunionInput {
    /// Drop keys that belong to the stored record, not the payload.
    pub(crate) fn without_record_keys(mut self) -> Self {
        self.extra.remove("id");
        self.extra.remove("createdAt");
        self
    }
}
