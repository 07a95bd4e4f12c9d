//! Site-wide settings (`site-settings.json`).
//!
//! Settings are a free-form object of sections (`general`, `hero`, `logo`,
//! `footer`, ...). Saving merges top-level sections shallowly.

use serde_json::{Map, Value};

pub type SiteSettings = Map<String, Value>;

pub const SECTION_GENERAL: &str = "general";
pub const KEY_ADMIN_EMAIL: &str = "adminEmail";
pub const KEY_ADMIN_PASSWORD: &str = "adminPassword";
pub const KEY_ADMIN_USERNAME: &str = "adminUsername";
pub const KEY_ADMIN_PHONE: &str = "adminPhone";
pub const KEY_ADMIN_AVATAR: &str = "adminAvatar";

/// Read a string from the `general` section.
pub fn general_str<'a>(settings: &'a SiteSettings, key: &str) -> Option<&'a str> {
    settings
        .get(SECTION_GENERAL)
        .and_then(|g| g.get(key))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Remove the admin password from a copy meant for clients.
pub fn redact_secrets(settings: &mut SiteSettings) {
    if let Some(Value::Object(general)) = settings.get_mut(SECTION_GENERAL) {
        general.remove(KEY_ADMIN_PASSWORD);
    }
}

/// A patch that replaces `general` without an admin password keeps the
/// stored one, so saving settings read from a redacted copy does not lose
/// the credential.
pub(crate) fn carry_admin_password(current: &SiteSettings, patch: &mut SiteSettings) {
    let Some(Value::Object(general)) = patch.get_mut(SECTION_GENERAL) else {
        return;
    };
    let provided = general
        .get(KEY_ADMIN_PASSWORD)
        .and_then(Value::as_str)
        .is_some_and(|p| !p.is_empty());
    if provided {
        return;
    }
    match general_str(current, KEY_ADMIN_PASSWORD) {
        Some(stored) => {
            general.insert(KEY_ADMIN_PASSWORD.into(), Value::String(stored.to_string()));
        }
        None => {
            general.remove(KEY_ADMIN_PASSWORD);
        }
    }
}
