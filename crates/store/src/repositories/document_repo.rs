//! Repository for `documents.json`.

use kinfolk_core::validation::require_non_blank;

use crate::error::StoreResult;
use crate::models::document::{CreateDocument, Document, UpdateDocument};
use crate::repositories::remove_by_id;
use crate::{new_id, Store};

pub struct DocumentRepo;

impl DocumentRepo {
    /// Newest `uploadDate` first. Dates are `YYYY-MM-DD`, so string order
    /// is date order.
    pub async fn list(store: &Store) -> StoreResult<Vec<Document>> {
        let mut documents = store.documents.load().await?;
        documents.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
        Ok(documents)
    }

    pub async fn create(store: &Store, input: CreateDocument) -> StoreResult<Document> {
        require_non_blank("Title", input.title.as_deref())?;

        let document = Document {
            id: new_id(),
            title: input.title.unwrap_or_default().trim().to_string(),
            description: input.description,
            category: input.category,
            file_url: input.file_url,
            file_size: input.file_size,
            upload_date: input
                .upload_date
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(today),
        };

        store
            .documents
            .update(|documents| {
                documents.push(document.clone());
                Ok(())
            })
            .await?;

        tracing::info!(document_id = %document.id, "Document created");
        Ok(document)
    }

    pub async fn update(
        store: &Store,
        id: &str,
        input: UpdateDocument,
    ) -> StoreResult<Option<Document>> {
        if let Some(title) = input.title.as_deref() {
            require_non_blank("Title", Some(title))?;
        }

        let updated = store
            .documents
            .update_found(|documents| {
                let Some(doc) = documents.iter_mut().find(|d| d.id == id) else {
                    return Ok(None);
                };
                if let Some(title) = input.title {
                    doc.title = title.trim().to_string();
                }
                if let Some(v) = input.description {
                    doc.description = v;
                }
                if let Some(v) = input.category {
                    doc.category = v;
                }
                if let Some(v) = input.file_url {
                    doc.file_url = v;
                }
                if let Some(v) = input.file_size {
                    doc.file_size = v;
                }
                if let Some(date) = input.upload_date.filter(|d| !d.trim().is_empty()) {
                    doc.upload_date = date;
                }
                Ok(Some(doc.clone()))
            })
            .await?;

        if updated.is_some() {
            tracing::info!(document_id = %id, "Document updated");
        }
        Ok(updated)
    }

    pub async fn delete(store: &Store, id: &str) -> StoreResult<bool> {
        let deleted = store
            .documents
            .update_if(|documents| {
                let removed = remove_by_id(documents, id, |d| &d.id);
                Ok((removed, removed))
            })
            .await?;
        if deleted {
            tracing::info!(document_id = %id, "Document deleted");
        }
        Ok(deleted)
    }
}

fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}
