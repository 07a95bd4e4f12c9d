//! Family member records (`family-tree.json`).

use kinfolk_core::family_tree::TreeRecord;
use kinfolk_core::types::{EpochMillis, RecordId};
use serde::{Deserialize, Serialize};

use super::{double_lenient_text, double_option, lenient_text};

/// One person in the family tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub spouse: Option<String>,
    #[serde(default)]
    pub parent_id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub birth_year: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub death_year: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub created_at: Option<EpochMillis>,
    #[serde(default)]
    pub updated_at: Option<EpochMillis>,
}

impl TreeRecord for FamilyMember {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref().filter(|p| !p.is_empty())
    }
}

/// DTO for creating a family member.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFamilyMember {
    pub name: Option<String>,
    pub spouse: Option<String>,
    pub parent_id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub birth_year: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub death_year: Option<String>,
    pub location: Option<String>,
    pub photo: Option<String>,
    pub bio: Option<String>,
}

/// DTO for updating a family member. Absent fields are left alone; a
/// `null` clears the field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFamilyMember {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub spouse: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<RecordId>>,
    #[serde(default, deserialize_with = "double_lenient_text")]
    pub birth_year: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_lenient_text")]
    pub death_year: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub photo: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub bio: Option<Option<String>>,
}
