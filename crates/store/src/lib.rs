//! JSON-file persistence for the association site.
//!
//! Each content domain lives in one JSON document under the data directory.
//! [`Store`] owns a [`JsonFile`] handle per document; the zero-sized
//! repositories in [`repositories`] take `&Store` and implement the
//! domain operations on top of it.

pub mod error;
pub mod json_file;
pub mod models;
pub mod repositories;

use std::path::{Path, PathBuf};

pub use error::{StoreError, StoreResult};
pub use json_file::JsonFile;

use models::blog::BlogPost;
use models::category::Category;
use models::document::Document;
use models::family::FamilyMember;
use models::gallery::GalleryItem;
use models::organization::OrganizationMember;
use models::reunion::Reunion;
use models::settings::SiteSettings;

pub const FAMILY_FILE: &str = "family-tree.json";
pub const ORGANIZATION_FILE: &str = "organization.json";
pub const DOCUMENTS_FILE: &str = "documents.json";
pub const GALLERY_FILE: &str = "gallery.json";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const REUNIONS_FILE: &str = "reunions.json";
pub const BLOG_FILE: &str = "blog-posts.json";
pub const SETTINGS_FILE: &str = "site-settings.json";

/// Handles to every data document. Cheap to share behind an `Arc`.
pub struct Store {
    data_dir: PathBuf,
    pub(crate) family: JsonFile<Vec<FamilyMember>>,
    pub(crate) organization: JsonFile<Vec<OrganizationMember>>,
    pub(crate) documents: JsonFile<Vec<Document>>,
    pub(crate) gallery: JsonFile<Vec<GalleryItem>>,
    pub(crate) categories: JsonFile<Vec<Category>>,
    pub(crate) reunions: JsonFile<Vec<Reunion>>,
    pub(crate) blog: JsonFile<Vec<BlogPost>>,
    pub(crate) settings: JsonFile<Option<SiteSettings>>,
}

impl Store {
    /// Bind a store to `data_dir`. Nothing is read until first use; files
    /// that do not exist yet load as empty.
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let file = |name: &str| data_dir.join(name);

        tracing::info!(data_dir = %data_dir.display(), "Opening JSON store");

        Self {
            family: JsonFile::new(file(FAMILY_FILE)),
            organization: JsonFile::new(file(ORGANIZATION_FILE)),
            documents: JsonFile::new(file(DOCUMENTS_FILE)),
            gallery: JsonFile::new(file(GALLERY_FILE)),
            categories: JsonFile::new(file(CATEGORIES_FILE)),
            reunions: JsonFile::new(file(REUNIONS_FILE)),
            blog: JsonFile::new(file(BLOG_FILE)),
            settings: JsonFile::new(file(SETTINGS_FILE)),
            data_dir,
        }
    }

    /// The directory holding every data document.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// New opaque record id.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
