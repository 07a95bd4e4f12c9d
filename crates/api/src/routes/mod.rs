pub mod auth;
pub mod blog;
pub mod categories;
pub mod documents;
pub mod family;
pub mod files;
pub mod gallery;
pub mod health;
pub mod organization;
pub mod profile;
pub mod reunions;
pub mod settings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                              login (public)
///
/// /family                                  list (public), create (admin)
/// /family/tree                             nested tree (public)
/// /family/{id}                             get (public), update, delete (admin)
///
/// /organization                            list (public), create (admin)
/// /organization/{id}                       update, delete (admin)
///
/// /documents                               list (public), create (admin)
/// /documents/{id}                          update, delete (admin)
///
/// /gallery                                 filtered list (public), create (admin)
/// /gallery/{id}                            update, delete (admin)
/// /categories                              list with counts (public)
///
/// /reunions                                list (public), create (admin)
/// /reunions/{id}                           replace, delete (admin)
///
/// /blog                                    list (public), create (admin)
/// /blog/slug/{slug}                        read by slug, counts a view (public)
/// /blog/{id}                               get (public), update, delete (admin)
///
/// /settings                                get (public), save (admin)
/// /profile                                 update admin profile (admin)
///
/// /files                                   delete one public file (admin)
/// /files/gallery                           list public files (admin)
/// /files/analyze                           used/unused analysis (admin)
/// /files/upload                            multipart upload (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/family", family::router())
        .nest("/organization", organization::router())
        .nest("/documents", documents::router())
        .nest("/gallery", gallery::router())
        .nest("/categories", categories::router())
        .nest("/reunions", reunions::router())
        .nest("/blog", blog::router())
        .nest("/settings", settings::router())
        .nest("/profile", profile::router())
        .nest("/files", files::router())
}
