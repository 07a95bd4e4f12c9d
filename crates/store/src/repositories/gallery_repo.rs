//! Repository for `gallery.json`.

use chrono::Utc;

use crate::error::StoreResult;
use crate::models::gallery::{
    CreateGalleryItem, GalleryFilter, GalleryItem, UpdateGalleryItem, DEFAULT_CATEGORY,
    DEFAULT_UPLOADER, STATUS_PUBLISHED,
};
use crate::repositories::remove_by_id;
use crate::{new_id, Store};

pub struct GalleryRepo;

impl GalleryRepo {
    /// Items matching `filter`, most recently uploaded first.
    pub async fn list(store: &Store, filter: &GalleryFilter) -> StoreResult<Vec<GalleryItem>> {
        let mut items: Vec<GalleryItem> = store
            .gallery
            .load()
            .await?
            .into_iter()
            .filter(|item| filter.matches(item))
            .collect();
        items.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(items)
    }

    /// Every stored item, unfiltered.
    pub async fn all(store: &Store) -> StoreResult<Vec<GalleryItem>> {
        store.gallery.load().await
    }

    pub async fn create(store: &Store, input: CreateGalleryItem) -> StoreResult<GalleryItem> {
        let image_url = input.image_url.unwrap_or_default();
        let item = GalleryItem {
            id: format!("gallery-{}", new_id()),
            title: input.title.unwrap_or_default(),
            description: input.description.unwrap_or_default(),
            thumbnail_url: input
                .thumbnail_url
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| image_url.clone()),
            image_url,
            uploaded_by: input
                .uploaded_by
                .unwrap_or_else(|| DEFAULT_UPLOADER.to_string()),
            uploaded_at: Some(Utc::now()),
            updated_at: None,
            photographer: input.photographer.unwrap_or_default(),
            location: input.location.unwrap_or_default(),
            date_taken: input.date_taken.unwrap_or_default(),
            category: input
                .category
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            tags: input.tags.unwrap_or_default(),
            related_to: input.related_to,
            status: input
                .status
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| STATUS_PUBLISHED.to_string()),
            featured: input.featured.unwrap_or(false),
            view_count: 0,
        };

        store
            .gallery
            .update(|items| {
                items.push(item.clone());
                Ok(())
            })
            .await?;

        tracing::info!(item_id = %item.id, "Gallery item created");
        Ok(item)
    }

    /// Merge `input` into the item and stamp `updatedAt`.
    pub async fn update(
        store: &Store,
        id: &str,
        input: UpdateGalleryItem,
    ) -> StoreResult<Option<GalleryItem>> {
        let updated = store
            .gallery
            .update_found(|items| {
                let Some(item) = items.iter_mut().find(|i| i.id == id) else {
                    return Ok(None);
                };
                macro_rules! merge {
                    ($($field:ident),*) => {
                        $(if let Some(v) = input.$field { item.$field = v; })*
                    };
                }
                merge!(
                    title,
                    description,
                    image_url,
                    thumbnail_url,
                    photographer,
                    location,
                    date_taken,
                    category,
                    tags,
                    status,
                    featured
                );
                if input.related_to.is_some() {
                    item.related_to = input.related_to;
                }
                item.updated_at = Some(Utc::now());
                Ok(Some(item.clone()))
            })
            .await?;

        if updated.is_some() {
            tracing::info!(item_id = %id, "Gallery item updated");
        }
        Ok(updated)
    }

    pub async fn delete(store: &Store, id: &str) -> StoreResult<bool> {
        let deleted = store
            .gallery
            .update_if(|items| {
                let removed = remove_by_id(items, id, |i| &i.id);
                Ok((removed, removed))
            })
            .await?;
        if deleted {
            tracing::info!(item_id = %id, "Gallery item deleted");
        }
        Ok(deleted)
    }
}
