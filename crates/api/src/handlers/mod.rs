pub mod auth;
pub mod blog;
pub mod categories;
pub mod documents;
pub mod family;
pub mod files;
pub mod gallery;
pub mod organization;
pub mod profile;
pub mod reunions;
pub mod settings;
