//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation and validation.
//! - [`admin`] -- resolution and checking of the single admin credential.

pub mod admin;
pub mod jwt;
pub mod password;
