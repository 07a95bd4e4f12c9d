//! Repository for `family-tree.json`.

use kinfolk_core::error::CoreError;
use kinfolk_core::family_tree::{would_create_cycle, TreeRecord};
use kinfolk_core::types::now_millis;
use kinfolk_core::validation::require_non_blank;

use crate::error::StoreResult;
use crate::models::blank_as_none;
use crate::models::family::{CreateFamilyMember, FamilyMember, UpdateFamilyMember};
use crate::repositories::remove_by_id;
use crate::{new_id, Store};

/// Provides CRUD operations for family members.
pub struct FamilyRepo;

impl FamilyRepo {
    /// Every member in file order.
    pub async fn list(store: &Store) -> StoreResult<Vec<FamilyMember>> {
        store.family.load().await
    }

    pub async fn find_by_id(store: &Store, id: &str) -> StoreResult<Option<FamilyMember>> {
        let members = store.family.load().await?;
        Ok(members.into_iter().find(|m| m.id == id))
    }

    /// Create a member. The name is required. The parent id is stored as
    /// given; one that names no member leaves the new member an orphan.
    pub async fn create(store: &Store, input: CreateFamilyMember) -> StoreResult<FamilyMember> {
        require_non_blank("Name", input.name.as_deref())?;
        let parent_id = blank_as_none(input.parent_id);

        let member = store
            .family
            .update(|members| {
                let now = now_millis();
                let member = FamilyMember {
                    id: new_id(),
                    name: input.name.unwrap_or_default().trim().to_string(),
                    spouse: input.spouse,
                    parent_id,
                    birth_year: input.birth_year,
                    death_year: input.death_year,
                    location: input.location,
                    photo: input.photo,
                    bio: input.bio,
                    created_at: Some(now),
                    updated_at: Some(now),
                };
                members.push(member.clone());
                Ok(member)
            })
            .await?;

        tracing::info!(member_id = %member.id, "Family member created");
        Ok(member)
    }

    /// Merge `input` into the member. Returns `None` when it does not exist.
    ///
    /// A new parent must not be the member or one of its descendants. An id
    /// naming no member is accepted, as on create.
    pub async fn update(
        store: &Store,
        id: &str,
        input: UpdateFamilyMember,
    ) -> StoreResult<Option<FamilyMember>> {
        if let Some(name) = input.name.as_deref() {
            require_non_blank("Name", Some(name))?;
        }

        let updated = store
            .family
            .update_found(|members| {
                let Some(index) = members.iter().position(|m| m.id == id) else {
                    return Ok(None);
                };

                let new_parent = input.parent_id.map(blank_as_none);
                if let Some(Some(parent)) = new_parent.as_ref() {
                    if parent == id {
                        return Err(CoreError::Validation(
                            "A member cannot be their own parent".into(),
                        )
                        .into());
                    }
                    if would_create_cycle(members.as_slice(), id, parent) {
                        return Err(CoreError::Validation(format!(
                            "Parent {parent} is a descendant of member {id}"
                        ))
                        .into());
                    }
                }

                let member = &mut members[index];
                if let Some(name) = input.name {
                    member.name = name.trim().to_string();
                }
                if let Some(parent) = new_parent {
                    member.parent_id = parent;
                }
                if let Some(v) = input.spouse {
                    member.spouse = v;
                }
                if let Some(v) = input.birth_year {
                    member.birth_year = v;
                }
                if let Some(v) = input.death_year {
                    member.death_year = v;
                }
                if let Some(v) = input.location {
                    member.location = v;
                }
                if let Some(v) = input.photo {
                    member.photo = v;
                }
                if let Some(v) = input.bio {
                    member.bio = v;
                }
                member.updated_at = Some(now_millis());
                Ok(Some(member.clone()))
            })
            .await?;

        if updated.is_some() {
            tracing::info!(member_id = %id, "Family member updated");
        }
        Ok(updated)
    }

    /// Delete a member. Fails with a conflict while anyone names it as
    /// parent; returns `false` when it does not exist.
    pub async fn delete(store: &Store, id: &str) -> StoreResult<bool> {
        let deleted = store
            .family
            .update_if(|members| {
                let children = members
                    .iter()
                    .filter(|m| TreeRecord::parent_id(*m) == Some(id))
                    .count();
                if children > 0 && members.iter().any(|m| m.id == id) {
                    return Err(CoreError::Conflict(format!(
                        "Cannot delete member with {children} child(ren). Remove or reassign them first."
                    ))
                    .into());
                }
                let removed = remove_by_id(members, id, |m| &m.id);
                Ok((removed, removed))
            })
            .await?;

        if deleted {
            tracing::info!(member_id = %id, "Family member deleted");
        }
        Ok(deleted)
    }
}
