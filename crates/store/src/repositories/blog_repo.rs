//! Repository for `blog-posts.json`.

use chrono::Utc;
use kinfolk_core::error::CoreError;
use kinfolk_core::slug::slugify;
use kinfolk_core::validation::require_non_blank;

use crate::error::StoreResult;
use crate::models::blog::{BlogPost, BlogPostInput, Revision, STATUS_DRAFT};
use crate::repositories::remove_by_id;
use crate::{new_id, Store};

pub struct BlogRepo;

impl BlogRepo {
    pub async fn list(store: &Store) -> StoreResult<Vec<BlogPost>> {
        store.blog.load().await
    }

    pub async fn find_by_id(store: &Store, id: &str) -> StoreResult<Option<BlogPost>> {
        let posts = store.blog.load().await?;
        Ok(posts.into_iter().find(|p| p.id == id))
    }

    pub async fn find_by_slug(store: &Store, slug: &str) -> StoreResult<Option<BlogPost>> {
        let posts = store.blog.load().await?;
        Ok(posts.into_iter().find(|p| p.slug == slug))
    }

    /// Bump the view counter of the post with `slug` and return it.
    pub async fn increment_views(store: &Store, slug: &str) -> StoreResult<Option<BlogPost>> {
        store
            .blog
            .update_found(|posts| {
                Ok(posts.iter_mut().find(|p| p.slug == slug).map(|post| {
                    post.views += 1;
                    post.clone()
                }))
            })
            .await
    }

    /// Create a post. A slug derived from the title gets a numeric suffix
    /// when taken; an explicit slug that is taken is a conflict.
    pub async fn create(store: &Store, input: BlogPostInput) -> StoreResult<BlogPost> {
        require_non_blank("Title", input.title.as_deref())?;
        let title = input.title.unwrap_or_default().trim().to_string();

        let post = store
            .blog
            .update(|posts| {
                let slug = match input.slug.as_deref().map(slugify).filter(|s| !s.is_empty()) {
                    Some(explicit) => {
                        ensure_slug_free(posts, &explicit, None)?;
                        explicit
                    }
                    None => unique_slug(posts, &slugify(&title))?,
                };

                let now = Utc::now();
                let post = BlogPost {
                    id: new_id(),
                    title,
                    slug,
                    content: input.content.unwrap_or_default(),
                    excerpt: input.excerpt,
                    featured_image: input.featured_image,
                    image_alt: input.image_alt,
                    image_caption: input.image_caption,
                    categories: input.categories.unwrap_or_default(),
                    tags: input.tags.unwrap_or_default(),
                    status: input
                        .status
                        .filter(|s| !s.is_empty())
                        .unwrap_or_else(|| STATUS_DRAFT.to_string()),
                    published_at: input.published_at,
                    seo_title: input.seo_title,
                    seo_description: input.seo_description,
                    author: input.author,
                    views: 0,
                    revisions: Vec::new(),
                    created_at: Some(now),
                    updated_at: Some(now),
                };
                posts.push(post.clone());
                Ok(post)
            })
            .await?;

        tracing::info!(post_id = %post.id, slug = %post.slug, "Blog post created");
        Ok(post)
    }

    /// Merge `input` into the post, first recording its current content as
    /// a revision.
    pub async fn update(
        store: &Store,
        id: &str,
        input: BlogPostInput,
    ) -> StoreResult<Option<BlogPost>> {
        if let Some(title) = input.title.as_deref() {
            require_non_blank("Title", Some(title))?;
        }

        let updated = store
            .blog
            .update_found(|posts| {
                let Some(index) = posts.iter().position(|p| p.id == id) else {
                    return Ok(None);
                };

                let new_slug = input.slug.as_deref().map(slugify).filter(|s| !s.is_empty());
                if let Some(slug) = new_slug.as_deref() {
                    ensure_slug_free(posts, slug, Some(id))?;
                }

                let now = Utc::now();
                let post = &mut posts[index];
                post.revisions.push(Revision {
                    date: now,
                    content: post.content.clone(),
                });

                if let Some(title) = input.title {
                    post.title = title.trim().to_string();
                }
                if let Some(slug) = new_slug {
                    post.slug = slug;
                }
                if let Some(content) = input.content {
                    post.content = content;
                }
                if let Some(status) = input.status.filter(|s| !s.is_empty()) {
                    post.status = status;
                }
                if let Some(v) = input.categories {
                    post.categories = v;
                }
                if let Some(v) = input.tags {
                    post.tags = v;
                }
                macro_rules! merge_opt {
                    ($($field:ident),*) => {
                        $(if input.$field.is_some() { post.$field = input.$field; })*
                    };
                }
                merge_opt!(
                    excerpt,
                    featured_image,
                    image_alt,
                    image_caption,
                    published_at,
                    seo_title,
                    seo_description,
                    author
                );
                post.updated_at = Some(now);
                Ok(Some(post.clone()))
            })
            .await?;

        if let Some(post) = &updated {
            tracing::info!(post_id = %id, revisions = post.revisions.len(), "Blog post updated");
        }
        Ok(updated)
    }

    pub async fn delete(store: &Store, id: &str) -> StoreResult<bool> {
        let deleted = store
            .blog
            .update_if(|posts| {
                let removed = remove_by_id(posts, id, |p| &p.id);
                Ok((removed, removed))
            })
            .await?;
        if deleted {
            tracing::info!(post_id = %id, "Blog post deleted");
        }
        Ok(deleted)
    }
}

fn ensure_slug_free(posts: &[BlogPost], slug: &str, except: Option<&str>) -> Result<(), CoreError> {
    let taken = posts
        .iter()
        .any(|p| p.slug == slug && Some(p.id.as_str()) != except);
    if taken {
        Err(CoreError::Conflict(format!("Slug '{slug}' is already in use")))
    } else {
        Ok(())
    }
}

/// `base`, or `base-2`, `base-3`, ... whichever is free first.
fn unique_slug(posts: &[BlogPost], base: &str) -> Result<String, CoreError> {
    if base.is_empty() {
        return Err(CoreError::Validation(
            "Title must contain at least one letter or digit".into(),
        ));
    }
    let taken = |s: &str| posts.iter().any(|p| p.slug == s);
    if !taken(base) {
        return Ok(base.to_string());
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken(&candidate) {
            return Ok(candidate);
        }
        n += 1;
    }
}
