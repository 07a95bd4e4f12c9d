//! Repository for `categories.json`.

use crate::error::StoreResult;
use crate::models::category::{CategoryWithCount, CATEGORY_ALL};
use crate::models::gallery::{GalleryItem, STATUS_PUBLISHED};
use crate::Store;

pub struct CategoryRepo;

impl CategoryRepo {
    /// Categories in file order, each with the number of published items in
    /// `gallery` that belong to it. The `all` category counts every
    /// published item.
    pub async fn list_with_counts(
        store: &Store,
        gallery: &[GalleryItem],
    ) -> StoreResult<Vec<CategoryWithCount>> {
        let categories = store.categories.load().await?;
        let published: Vec<&GalleryItem> = gallery
            .iter()
            .filter(|item| item.status == STATUS_PUBLISHED)
            .collect();

        Ok(categories
            .into_iter()
            .map(|category| {
                let count = if category.id == CATEGORY_ALL {
                    published.len()
                } else {
                    published
                        .iter()
                        .filter(|item| item.category == category.id)
                        .count()
                };
                CategoryWithCount { category, count }
            })
            .collect())
    }
}
