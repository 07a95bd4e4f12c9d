//! The single admin account.
//!
//! The credential lives in the `general` section of the site settings
//! (`adminEmail`, `adminPassword`). Each field missing there falls back to
//! the configured default.

use kinfolk_store::models::settings::{
    general_str, SiteSettings, KEY_ADMIN_EMAIL, KEY_ADMIN_PASSWORD,
};

use super::password::verify_stored_password;

const DEFAULT_ADMIN_EMAIL: &str = "admin@rkb-amb.org";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// An admin email with its stored password (PHC hash or plaintext).
#[derive(Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AdminCredentials {
    /// Fallback credential from `ADMIN_EMAIL` / `ADMIN_PASSWORD`.
    pub fn from_env() -> Self {
        Self {
            email: std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.into()),
            password: std::env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.into()),
        }
    }

    /// The effective credential: settings first, `fallback` per field.
    pub fn resolve(settings: Option<&SiteSettings>, fallback: &AdminCredentials) -> Self {
        let from_settings = |key| settings.and_then(|s| general_str(s, key));
        Self {
            email: from_settings(KEY_ADMIN_EMAIL)
                .unwrap_or(&fallback.email)
                .to_string(),
            password: from_settings(KEY_ADMIN_PASSWORD)
                .unwrap_or(&fallback.password)
                .to_string(),
        }
    }

    /// Whether `email` / `password` match this credential. Emails compare
    /// case-insensitively.
    pub fn matches(&self, email: &str, password: &str) -> Result<bool, argon2::password_hash::Error> {
        if !self.email.eq_ignore_ascii_case(email.trim()) {
            return Ok(false);
        }
        verify_stored_password(password, &self.password)
    }
}
