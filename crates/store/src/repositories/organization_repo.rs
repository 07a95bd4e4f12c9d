//! Repository for `organization.json`.

use kinfolk_core::validation::require_non_blank;

use crate::error::StoreResult;
use crate::models::organization::{
    CreateOrganizationMember, OrganizationMember, UpdateOrganizationMember,
};
use crate::repositories::remove_by_id;
use crate::{new_id, Store};

pub struct OrganizationRepo;

impl OrganizationRepo {
    /// All members sorted by `order` ascending; ties keep file order.
    pub async fn list(store: &Store) -> StoreResult<Vec<OrganizationMember>> {
        let mut members = store.organization.load().await?;
        members.sort_by_key(|m| m.order);
        Ok(members)
    }

    pub async fn create(
        store: &Store,
        input: CreateOrganizationMember,
    ) -> StoreResult<OrganizationMember> {
        require_non_blank("Name", input.name.as_deref())?;

        let member = store
            .organization
            .update(|members| {
                let order = input
                    .order
                    .unwrap_or_else(|| members.iter().map(|m| m.order).max().unwrap_or(0) + 1);
                let member = OrganizationMember {
                    id: new_id(),
                    name: input.name.unwrap_or_default().trim().to_string(),
                    position: input.position,
                    photo: input.photo,
                    phone: input.phone,
                    email: input.email,
                    bio: input.bio,
                    order,
                };
                members.push(member.clone());
                Ok(member)
            })
            .await?;

        tracing::info!(member_id = %member.id, order = member.order, "Organization member created");
        Ok(member)
    }

    pub async fn update(
        store: &Store,
        id: &str,
        input: UpdateOrganizationMember,
    ) -> StoreResult<Option<OrganizationMember>> {
        if let Some(name) = input.name.as_deref() {
            require_non_blank("Name", Some(name))?;
        }

        let updated = store
            .organization
            .update_found(|members| {
                let Some(member) = members.iter_mut().find(|m| m.id == id) else {
                    return Ok(None);
                };
                if let Some(name) = input.name {
                    member.name = name.trim().to_string();
                }
                if let Some(v) = input.position {
                    member.position = v;
                }
                if let Some(v) = input.photo {
                    member.photo = v;
                }
                if let Some(v) = input.phone {
                    member.phone = v;
                }
                if let Some(v) = input.email {
                    member.email = v;
                }
                if let Some(v) = input.bio {
                    member.bio = v;
                }
                if let Some(order) = input.order {
                    member.order = order;
                }
                Ok(Some(member.clone()))
            })
            .await?;

        if updated.is_some() {
            tracing::info!(member_id = %id, "Organization member updated");
        }
        Ok(updated)
    }

    pub async fn delete(store: &Store, id: &str) -> StoreResult<bool> {
        let deleted = store
            .organization
            .update_if(|members| {
                let removed = remove_by_id(members, id, |m| &m.id);
                Ok((removed, removed))
            })
            .await?;
        if deleted {
            tracing::info!(member_id = %id, "Organization member deleted");
        }
        Ok(deleted)
    }
}
