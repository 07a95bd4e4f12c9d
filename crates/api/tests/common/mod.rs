#![allow(dead_code)]

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use kinfolk_api::auth::admin::AdminCredentials;
use kinfolk_api::auth::jwt::{generate_access_token, JwtConfig};
use kinfolk_api::config::ServerConfig;
use kinfolk_api::router::build_app_router;
use kinfolk_api::state::AppState;
use kinfolk_core::family_tree::RootPolicy;
use kinfolk_core::storage::DEFAULT_MAX_UPLOAD_BYTES;
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@rkb-amb.org";
pub const ADMIN_PASSWORD: &str = "admin123";

/// A router over fresh temp `data/` and `public/` directories. The
/// directories live as long as this value.
pub struct TestApp {
    _root: TempDir,
    pub data_dir: PathBuf,
    pub public_dir: PathBuf,
    pub config: ServerConfig,
    pub router: Router,
}

impl TestApp {
    /// A clone of the router, ready for one `oneshot` call.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// A valid admin bearer token.
    pub fn admin_token(&self) -> String {
        generate_access_token(ADMIN_EMAIL, "admin", &self.config.jwt).unwrap()
    }

    pub fn write_public(&self, relative: &str, contents: &[u8]) -> PathBuf {
        write_file(&self.public_dir.join(relative), contents)
    }

    pub fn write_data(&self, relative: &str, contents: &[u8]) -> PathBuf {
        write_file(&self.data_dir.join(relative), contents)
    }
}

fn write_file(path: &Path, contents: &[u8]) -> PathBuf {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
    path.to_path_buf()
}

/// Build a test `ServerConfig` rooted at `root`.
pub fn test_config(root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        data_dir: root.join("data"),
        public_dir: root.join("public"),
        max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        tree_root_policy: RootPolicy::Forest,
        admin: AdminCredentials {
            email: ADMIN_EMAIL.to_string(),
            password: ADMIN_PASSWORD.to_string(),
        },
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router, exactly as `main.rs` does.
pub fn build_test_app() -> TestApp {
    build_test_app_with(|_| {})
}

/// [`build_test_app`] with a hook to adjust the config first.
pub fn build_test_app_with(adjust: impl FnOnce(&mut ServerConfig)) -> TestApp {
    let root = tempfile::tempdir().unwrap();
    let mut config = test_config(root.path());
    adjust(&mut config);
    std::fs::create_dir_all(&config.data_dir).unwrap();
    std::fs::create_dir_all(&config.public_dir).unwrap();

    let router = build_app_router(AppState::new(config.clone()), &config);
    TestApp {
        data_dir: config.data_dir.clone(),
        public_dir: config.public_dir.clone(),
        _root: root,
        config,
        router,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn with_auth(builder: axum::http::request::Builder, token: Option<&str>) -> axum::http::request::Builder {
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    with_auth(Request::builder().method(method).uri(uri), token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = with_auth(Request::builder().uri(uri), Some(token))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = with_auth(Request::builder().method(Method::DELETE).uri(uri), Some(token))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST a single-file multipart form.
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    token: &str,
    field: &str,
    file_name: &str,
    content_type: &str,
    contents: &[u8],
) -> Response<Body> {
    let boundary = "----kinfolk-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = with_auth(Request::builder().method(Method::POST).uri(uri), Some(token))
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}
