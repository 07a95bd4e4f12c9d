//! Downloadable association documents (`documents.json`).

use kinfolk_core::types::RecordId;
use serde::{Deserialize, Serialize};

use super::{double_lenient_text, double_option, lenient_text};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    /// Free-form size label as entered by the admin (e.g. `"2.4 MB"`).
    #[serde(default, deserialize_with = "lenient_text")]
    pub file_size: Option<String>,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub upload_date: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocument {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub file_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub file_size: Option<String>,
    /// Defaults to today's date.
    pub upload_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocument {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub file_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_lenient_text")]
    pub file_size: Option<Option<String>>,
    pub upload_date: Option<String>,
}
