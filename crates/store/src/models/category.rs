//! Gallery categories (`categories.json`).

use serde::{Deserialize, Serialize};

/// Category id that stands for every published item.
pub const CATEGORY_ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Any presentation extras (icon, color, ...) kept as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A category with the number of published gallery items in it.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: Category,
    pub count: usize,
}
