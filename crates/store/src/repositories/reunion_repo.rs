//! Repository for `reunions.json`.

use chrono::Utc;
use kinfolk_core::validation::require_non_blank;

use crate::error::StoreResult;
use crate::models::reunion::{Reunion, ReunionInput};
use crate::repositories::remove_by_id;
use crate::{new_id, Store};

pub struct ReunionRepo;

impl ReunionRepo {
    pub async fn list(store: &Store) -> StoreResult<Vec<Reunion>> {
        store.reunions.load().await
    }

    pub async fn create(store: &Store, input: ReunionInput) -> StoreResult<Reunion> {
        require_non_blank("Title", Some(&input.title))?;

        let reunion = Reunion {
            id: new_id(),
            info: input.without_record_keys(),
            created_at: Some(Utc::now()),
        };
        store
            .reunions
            .update(|reunions| {
                reunions.push(reunion.clone());
                Ok(())
            })
            .await?;

        tracing::info!(reunion_id = %reunion.id, "Reunion created");
        Ok(reunion)
    }

    /// Replace every editable field of the reunion; `id` and `createdAt`
    /// are kept.
    pub async fn replace(
        store: &Store,
        id: &str,
        input: ReunionInput,
    ) -> StoreResult<Option<Reunion>> {
        require_non_blank("Title", Some(&input.title))?;
        let info = input.without_record_keys();

        let replaced = store
            .reunions
            .update_found(|reunions| {
                let Some(reunion) = reunions.iter_mut().find(|r| r.id == id) else {
                    return Ok(None);
                };
                reunion.info = info;
                Ok(Some(reunion.clone()))
            })
            .await?;

        if replaced.is_some() {
            tracing::info!(reunion_id = %id, "Reunion replaced");
        }
        Ok(replaced)
    }

    pub async fn delete(store: &Store, id: &str) -> StoreResult<bool> {
        let deleted = store
            .reunions
            .update_if(|reunions| {
                let removed = remove_by_id(reunions, id, |r| &r.id);
                Ok((removed, removed))
            })
            .await?;
        if deleted {
            tracing::info!(reunion_id = %id, "Reunion deleted");
        }
        Ok(deleted)
    }
}
