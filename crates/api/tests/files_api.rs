//! HTTP-level tests for the admin file manager.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, build_test_app_with, delete_auth, get, get_auth, post_multipart_auth};

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn listing_requires_admin() {
    let env = build_test_app();
    let response = get(env.app(), "/api/v1/files/gallery").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn listing_counts_by_type_and_filters() {
    let env = build_test_app();
    env.write_public("uploads/a.jpg", &[0u8; 100]);
    env.write_public("uploads/b.PNG", &[0u8; 100]);
    env.write_public("docs/c.pdf", &[0u8; 50]);
    env.write_public("robots.txt", b"User-agent: *");
    env.write_public("misc/d.bin", b"?");

    let response = get_auth(env.app(), "/api/v1/files/gallery", &env.admin_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["success"], true);
    assert_eq!(json["stats"]["totalFiles"], 5);
    assert_eq!(json["stats"]["byType"]["image"], 2);
    assert_eq!(json["stats"]["byType"]["document"], 2);
    assert_eq!(json["stats"]["byType"]["other"], 1);

    let response = get_auth(env.app(), "/api/v1/files/gallery?type=image", &env.admin_token()).await;
    let json = body_json(response).await;
    let files = json["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f["type"] == "image"));
    assert!(files.iter().any(|f| f["urlPath"] == "/uploads/a.jpg"));
    assert_eq!(json["stats"]["totalSize"], 200);
    assert_eq!(json["stats"]["formattedTotalSize"], "200 Bytes");
}

#[tokio::test]
async fn unknown_type_filter_is_400() {
    let env = build_test_app();
    let response = get_auth(env.app(), "/api/v1/files/gallery?type=hologram", &env.admin_token()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

#[tokio::test]
async fn analyze_splits_used_and_unused() {
    let env = build_test_app();
    env.write_public("uploads/used.jpg", &[0u8; 300]);
    env.write_public("uploads/stale.jpg", &[0u8; 100]);
    env.write_data("gallery.json", br#"[{"id":"g1","imageUrl":"/uploads/used.jpg"}]"#);

    let response = get_auth(env.app(), "/api/v1/files/analyze", &env.admin_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["success"], true);
    assert_eq!(json["stats"]["total"]["files"], 2);
    assert_eq!(json["stats"]["used"]["size"], 300);
    assert_eq!(json["stats"]["unused"]["files"], 1);
    assert_eq!(json["stats"]["unused"]["percentage"], 25.0);

    let used = &json["usedFiles"][0];
    assert_eq!(used["name"], "used.jpg");
    assert_eq!(used["isUsed"], true);
    assert_eq!(used["references"][0]["file"], "gallery.json");
    assert_eq!(used["references"][0]["type"], "data");
    assert_eq!(json["unusedFiles"][0]["name"], "stale.jpg");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_removes_file() {
    let env = build_test_app();
    let path = env.write_public("uploads/old.jpg", b"x");

    let response = delete_auth(env.app(), "/api/v1/files?path=/uploads/old.jpg", &env.admin_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "File deleted successfully");
    assert!(!path.exists());
}

#[tokio::test]
async fn delete_outside_public_dir_is_403() {
    let env = build_test_app();
    let outside = env.write_data("outside.txt", b"keep me");

    let response = delete_auth(env.app(), "/api/v1/files?path=../data/outside.txt", &env.admin_token()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(outside.exists());
}

#[tokio::test]
async fn delete_missing_or_absent_path() {
    let env = build_test_app();

    let response = delete_auth(env.app(), "/api/v1/files?path=/uploads/ghost.jpg", &env.admin_token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(env.app(), "/api/v1/files", &env.admin_token()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_directory_is_400() {
    let env = build_test_app();
    env.write_public("uploads/keep.jpg", b"x");

    let response = delete_auth(env.app(), "/api/v1/files?path=/uploads", &env.admin_token()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_stores_under_sanitized_unique_name() {
    let env = build_test_app();
    let token = env.admin_token();

    let response = post_multipart_auth(
        env.app(),
        "/api/v1/files/upload",
        &token,
        "file",
        "Family Photo.jpg",
        "image/jpeg",
        b"first",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["file"]["name"], "family-photo.jpg");
    assert_eq!(json["file"]["originalName"], "Family Photo.jpg");
    assert_eq!(json["file"]["url"], "/uploads/family-photo.jpg");
    assert_eq!(json["file"]["size"], 5);
    assert_eq!(json["file"]["type"], "image/jpeg");

    let response = post_multipart_auth(
        env.app(),
        "/api/v1/files/upload",
        &token,
        "file",
        "Family Photo.jpg",
        "image/jpeg",
        b"second",
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["file"]["name"], "family-photo-1.jpg");

    let stored = env.public_dir.join("uploads");
    assert_eq!(std::fs::read(stored.join("family-photo.jpg")).unwrap(), b"first");
    assert_eq!(std::fs::read(stored.join("family-photo-1.jpg")).unwrap(), b"second");

    // Uploaded files are served from the public directory.
    let response = get(env.app(), "/uploads/family-photo-1.jpg").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn upload_rejects_disallowed_type() {
    let env = build_test_app();
    let response = post_multipart_auth(
        env.app(),
        "/api/v1/files/upload",
        &env.admin_token(),
        "file",
        "script.exe",
        "application/octet-stream",
        b"MZ",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "File type not allowed");
    assert!(!env.public_dir.join("uploads/script.exe").exists());
}

#[tokio::test]
async fn upload_rejects_oversize_file() {
    let env = build_test_app_with(|config| config.max_upload_bytes = 16);
    let response = post_multipart_auth(
        env.app(),
        "/api/v1/files/upload",
        &env.admin_token(),
        "file",
        "big.png",
        "image/png",
        &[7u8; 64],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("File size exceeds maximum allowed size of"));
    assert!(!env.public_dir.join("uploads/big.png").exists());
}

#[tokio::test]
async fn upload_without_file_field_is_400() {
    let env = build_test_app();
    let response = post_multipart_auth(
        env.app(),
        "/api/v1/files/upload",
        &env.admin_token(),
        "attachment",
        "a.png",
        "image/png",
        b"x",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "No file provided");
}
