//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async operations that
//! accept `&Store` as the first argument. Lookups return `Option`, deletes
//! return whether a record was removed; callers decide what absence means.

pub mod blog_repo;
pub mod category_repo;
pub mod document_repo;
pub mod family_repo;
pub mod gallery_repo;
pub mod organization_repo;
pub mod reunion_repo;
pub mod settings_repo;

pub use blog_repo::BlogRepo;
pub use category_repo::CategoryRepo;
pub use document_repo::DocumentRepo;
pub use family_repo::FamilyRepo;
pub use gallery_repo::GalleryRepo;
pub use organization_repo::OrganizationRepo;
pub use reunion_repo::ReunionRepo;
pub use settings_repo::SettingsRepo;

/// Remove the record with `id` from `records`; `true` when one was removed.
pub(crate) fn remove_by_id<T>(records: &mut Vec<T>, id: &str, key: impl Fn(&T) -> &str) -> bool {
    let before = records.len();
    records.retain(|r| key(r) != id);
    records.len() != before
}
