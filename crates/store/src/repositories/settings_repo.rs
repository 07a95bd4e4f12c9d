//! Repository for `site-settings.json`.

use chrono::Utc;
use serde_json::Value;

use crate::error::StoreResult;
use crate::models::settings::{carry_admin_password, SiteSettings};
use crate::Store;

pub struct SettingsRepo;

impl SettingsRepo {
    /// The stored settings, or `None` before the first save.
    pub async fn get(store: &Store) -> StoreResult<Option<SiteSettings>> {
        store.settings.load().await
    }

    /// Shallow-merge `patch` into the stored settings: each top-level key of
    /// the patch replaces the stored key. `updatedAt` is stamped. A
    /// replacement `general` section without an admin password keeps the
    /// stored one.
    pub async fn save(store: &Store, mut patch: SiteSettings) -> StoreResult<SiteSettings> {
        let saved = store
            .settings
            .update(|settings| {
                let current = settings.get_or_insert_with(SiteSettings::new);
                carry_admin_password(current, &mut patch);
                current.extend(patch);
                current.insert("updatedAt".into(), Value::String(Utc::now().to_rfc3339()));
                Ok(current.clone())
            })
            .await?;

        tracing::info!(sections = saved.len(), "Site settings saved");
        Ok(saved)
    }

    /// Merge `values` into one top-level section, creating the section
    /// when needed. Used for the admin profile.
    pub async fn set_in_section(
        store: &Store,
        section: &str,
        values: SiteSettings,
    ) -> StoreResult<SiteSettings> {
        let saved = store
            .settings
            .update(|settings| {
                let current = settings.get_or_insert_with(SiteSettings::new);
                let entry = current
                    .entry(section.to_string())
                    .or_insert_with(|| Value::Object(SiteSettings::new()));
                if !entry.is_object() {
                    *entry = Value::Object(SiteSettings::new());
                }
                if let Value::Object(map) = entry {
                    map.extend(values);
                }
                current.insert("updatedAt".into(), Value::String(Utc::now().to_rfc3339()));
                Ok(current.clone())
            })
            .await?;

        tracing::info!(section, "Site settings section updated");
        Ok(saved)
    }
}
