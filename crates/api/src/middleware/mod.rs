//! Request extractors guarding the admin surface.
//!
//! [`auth::AuthUser`] validates the bearer token; [`rbac::RequireAdmin`]
//! additionally requires the `admin` role.

pub mod auth;
pub mod rbac;
