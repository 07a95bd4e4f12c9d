//! Domain logic for the Kinfolk family-association site.
//!
//! Types and synchronous logic only: no HTTP and no record persistence.

pub mod error;
pub mod family_tree;
pub mod roles;
pub mod slug;
pub mod storage;
pub mod types;
pub mod usage;
pub mod validation;
