use std::path::PathBuf;

use kinfolk_core::family_tree::RootPolicy;
use kinfolk_core::storage::DEFAULT_MAX_UPLOAD_BYTES;

use crate::auth::admin::AdminCredentials;
use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory holding the JSON data documents (default: `data`).
    pub data_dir: PathBuf,
    /// Directory served as static files and scanned by the file manager
    /// (default: `public`).
    pub public_dir: PathBuf,
    /// Largest accepted upload in bytes (default: 10 MiB).
    pub max_upload_bytes: u64,
    /// How `GET /family/tree` treats parentless members when no `mode` is
    /// given (default: forest).
    pub tree_root_policy: RootPolicy,
    /// Credential used when the settings file has none.
    pub admin: AdminCredentials,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DATA_DIR`             | `data`                     |
    /// | `PUBLIC_DIR`           | `public`                   |
    /// | `MAX_UPLOAD_BYTES`     | `10485760`                 |
    /// | `TREE_ROOT_POLICY`     | `forest`                   |
    /// | `ADMIN_EMAIL`          | `admin@rkb-amb.org`        |
    /// | `ADMIN_PASSWORD`       | `admin123`                 |
    ///
    /// See [`JwtConfig::from_env`] for the token settings.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let data_dir = PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| "data".into()));
        let public_dir =
            PathBuf::from(std::env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".into()));

        let max_upload_bytes: u64 = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid u64");

        let tree_root_policy: RootPolicy = std::env::var("TREE_ROOT_POLICY")
            .unwrap_or_else(|_| RootPolicy::default().as_str().into())
            .parse()
            .expect("TREE_ROOT_POLICY must be 'strict' or 'forest'");

        let admin = AdminCredentials::from_env();
        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            data_dir,
            public_dir,
            max_upload_bytes,
            tree_root_policy,
            admin,
            jwt,
        }
    }
}
