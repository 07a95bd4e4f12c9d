//! Photo gallery items (`gallery.json`).

use kinfolk_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};

pub const STATUS_PUBLISHED: &str = "published";
pub const DEFAULT_CATEGORY: &str = "family";
pub const DEFAULT_UPLOADER: &str = "Admin";
/// Category filter value that disables category filtering.
pub const CATEGORY_ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub uploaded_by: String,
    #[serde(default)]
    pub uploaded_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub photographer: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub date_taken: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Loose link to another record (a reunion, a member, ...).
    #[serde(default)]
    pub related_to: Option<serde_json::Value>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub view_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub uploaded_by: Option<String>,
    pub photographer: Option<String>,
    pub location: Option<String>,
    pub date_taken: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub related_to: Option<serde_json::Value>,
    pub status: Option<String>,
    pub featured: Option<bool>,
}

/// Merge update: only provided fields change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGalleryItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub photographer: Option<String>,
    pub location: Option<String>,
    pub date_taken: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub related_to: Option<serde_json::Value>,
    pub status: Option<String>,
    pub featured: Option<bool>,
}

/// Query filter for listing gallery items.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GalleryFilter {
    /// Defaults to `published`.
    pub status: Option<String>,
    /// `all` or absent disables the filter.
    pub category: Option<String>,
    /// Case-insensitive substring match against any tag.
    pub tag: Option<String>,
    /// Only `true` filters; anything else is ignored.
    pub featured: Option<String>,
}

impl GalleryFilter {
    pub fn matches(&self, item: &GalleryItem) -> bool {
        let status = self.status.as_deref().unwrap_or(STATUS_PUBLISHED);
        if item.status != status {
            return false;
        }
        if let Some(category) = self.category.as_deref() {
            if !category.is_empty() && category != CATEGORY_ALL && item.category != category {
                return false;
            }
        }
        if let Some(tag) = self.tag.as_deref().filter(|t| !t.is_empty()) {
            let needle = tag.to_lowercase();
            if !item.tags.iter().any(|t| t.to_lowercase().contains(&needle)) {
                return false;
            }
        }
        if self.featured.as_deref() == Some("true") && !item.featured {
            return false;
        }
        true
    }
}
