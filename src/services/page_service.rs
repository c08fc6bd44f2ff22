use axum::http::StatusCode;
use chrono::Utc;
use sea_orm::*;
use slug::slugify;
use uuid::Uuid;

use crate::entities::page::{self, PageType};
use crate::utils::api_response::{db_error, not_found, ServiceResult};

/// Width of one materialized-path step; each tree level adds one step.
pub const STEP_LEN: usize = 4;
const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub fn encode_step(mut n: u64) -> String {
    let mut buf = [b'0'; STEP_LEN];
    for slot in buf.iter_mut().rev() {
        *slot = ALPHABET[(n % 36) as usize];
        n /= 36;
    }
    String::from_utf8_lossy(&buf).into_owned()
}

pub fn decode_step(step: &str) -> Option<u64> {
    step.chars().try_fold(0u64, |acc, c| c.to_digit(36).map(|d| acc * 36 + d as u64))
}

fn max_children() -> u64 {
    36u64.pow(STEP_LEN as u32) - 1
}

pub struct NewPage {
    pub title: String,
    pub slug: Option<String>,
    pub page_type: PageType,
}

pub struct PageService;

impl PageService {
    pub async fn root<C: ConnectionTrait>(db: &C) -> ServiceResult<page::Model> {
        page::Entity::find()
            .filter(page::Column::Depth.eq(1))
            .one(db).await
            .map_err(db_error("DB_ERR", "Root lookup failed"))?
            .ok_or_else(|| not_found("ROOT_NOT_FOUND", "Site root page is missing"))
    }

    pub async fn find_by_public_id<C: ConnectionTrait>(db: &C, public_id: Uuid) -> ServiceResult<page::Model> {
        page::Entity::find()
            .filter(page::Column::PublicId.eq(public_id))
            .one(db).await
            .map_err(db_error("DB_ERR", "Page lookup failed"))?
            .ok_or_else(|| not_found("PAGE_NOT_FOUND", "Page not found"))
    }

    /// Like [`find_by_public_id`](Self::find_by_public_id) but rejects pages of another type.
    pub async fn find_typed<C: ConnectionTrait>(db: &C, public_id: Uuid, page_type: PageType) -> ServiceResult<page::Model> {
        let page = Self::find_by_public_id(db, public_id).await?;
        if page.page_type != page_type {
            return Err(not_found("PAGE_NOT_FOUND", "Page not found"));
        }
        Ok(page)
    }

    /// Creates the tree root. Only the seeder calls this.
    pub async fn create_root<C: ConnectionTrait>(db: &C, title: &str) -> ServiceResult<page::Model> {
        let now = Utc::now();
        page::ActiveModel {
            id: NotSet,
            public_id: Set(Uuid::now_v7()),
            parent_id: Set(None),
            path: Set(encode_step(1)),
            depth: Set(1),
            title: Set(title.to_string()),
            slug: Set("root".to_string()),
            url_path: Set("/".to_string()),
            page_type: Set(PageType::Root),
            live: Set(true),
            first_published_at: Set(Some(now)),
            last_published_at: Set(Some(now)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db).await
        .map_err(db_error("DB_WRITE_ERR", "Failed to create root page"))
    }

    pub async fn add_child<C: ConnectionTrait>(db: &C, parent: &page::Model, new: NewPage) -> ServiceResult<page::Model> {
        if !parent.page_type.allows_child(new.page_type) {
            return Err((
                StatusCode::BAD_REQUEST,
                "INVALID_PARENT",
                format!("A {:?} page cannot be created below a {:?} page", new.page_type, parent.page_type),
            ));
        }

        let path = Self::next_child_path(db, parent).await?;
        let base = new.slug.unwrap_or_else(|| slugify(&new.title));
        let base = if base.is_empty() { "page".to_string() } else { base };
        let slug = Self::ensure_unique_slug(db, parent.id, &base, None).await?;
        let now = Utc::now();

        let saved = page::ActiveModel {
            id: NotSet,
            public_id: Set(Uuid::now_v7()),
            parent_id: Set(Some(parent.id)),
            path: Set(path),
            depth: Set(parent.depth + 1),
            title: Set(new.title),
            url_path: Set(format!("{}{}/", parent.url_path, slug)),
            slug: Set(slug),
            page_type: Set(new.page_type),
            live: Set(false),
            first_published_at: Set(None),
            last_published_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db).await
        .map_err(db_error("DB_WRITE_ERR", "Failed to create page"))?;

        tracing::debug!(page = %saved.public_id, url = %saved.url_path, "page created");
        Ok(saved)
    }

    async fn next_child_path<C: ConnectionTrait>(db: &C, parent: &page::Model) -> ServiceResult<String> {
        let last = page::Entity::find()
            .filter(page::Column::ParentId.eq(parent.id))
            .order_by_desc(page::Column::Path)
            .one(db).await
            .map_err(db_error("DB_ERR", "Path allocation failed"))?;

        let next = match last {
            Some(p) => {
                let step = p.path.get(p.path.len().saturating_sub(STEP_LEN)..).unwrap_or_default();
                decode_step(step).map(|n| n + 1).unwrap_or(1)
            }
            None => 1,
        };
        if next > max_children() {
            return Err((StatusCode::CONFLICT, "TREE_FULL", "Parent page has no room for more children".to_string()));
        }
        Ok(format!("{}{}", parent.path, encode_step(next)))
    }

    /// `base`, then `base-2`, `base-3`, ... until no sibling (other than `exclude`) uses it.
    pub async fn ensure_unique_slug<C: ConnectionTrait>(
        db: &C,
        parent_id: i64,
        base: &str,
        exclude: Option<i64>,
    ) -> ServiceResult<String> {
        let mut candidate = base.to_string();
        let mut count = 2;

        loop {
            let mut query = page::Entity::find()
                .filter(page::Column::ParentId.eq(parent_id))
                .filter(page::Column::Slug.eq(candidate.as_str()));
            if let Some(id) = exclude {
                query = query.filter(page::Column::Id.ne(id));
            }
            let taken = query.one(db).await
                .map_err(db_error("DB_ERR", "Slug check failed"))?
                .is_some();
            if !taken {
                return Ok(candidate);
            }
            candidate = format!("{}-{}", base, count);
            count += 1;
        }
    }

    /// Changes a page's slug and rewrites the url_path of the page and all its descendants.
    pub async fn change_slug<C: ConnectionTrait>(db: &C, page: page::Model, slug: &str) -> ServiceResult<page::Model> {
        let Some(parent_id) = page.parent_id else {
            return Err((StatusCode::BAD_REQUEST, "ROOT_IMMUTABLE", "The root page slug cannot change".to_string()));
        };
        if page.slug == slug {
            return Ok(page);
        }

        let slug = Self::ensure_unique_slug(db, parent_id, slug, Some(page.id)).await?;
        let old_url = page.url_path.clone();
        let parent_url = old_url
            .strip_suffix(&format!("{}/", page.slug))
            .unwrap_or("/")
            .to_string();
        let new_url = format!("{}{}/", parent_url, slug);

        let descendants = page::Entity::find()
            .filter(page::Column::Path.starts_with(&page.path))
            .filter(page::Column::Depth.gt(page.depth))
            .all(db).await
            .map_err(db_error("DB_ERR", "Descendant lookup failed"))?;

        for d in descendants {
            let tail = d.url_path.strip_prefix(&old_url).unwrap_or(&d.url_path).to_string();
            let mut active: page::ActiveModel = d.into();
            active.url_path = Set(format!("{}{}", new_url, tail));
            active.update(db).await
                .map_err(db_error("DB_WRITE_ERR", "Failed to move descendant page"))?;
        }

        let mut active: page::ActiveModel = page.into();
        active.slug = Set(slug);
        active.url_path = Set(new_url);
        active.updated_at = Set(Utc::now());
        active.update(db).await
            .map_err(db_error("DB_WRITE_ERR", "Failed to update page slug"))
    }

    pub async fn set_title<C: ConnectionTrait>(db: &C, page: page::Model, title: String) -> ServiceResult<page::Model> {
        let mut active: page::ActiveModel = page.into();
        active.title = Set(title);
        active.updated_at = Set(Utc::now());
        active.update(db).await
            .map_err(db_error("DB_WRITE_ERR", "Failed to update page"))
    }

    /// Makes the page live; `first_published_at` is only ever set once.
    pub async fn publish_page<C: ConnectionTrait>(db: &C, page: page::Model) -> ServiceResult<page::Model> {
        let now = Utc::now();
        let first = page.first_published_at.unwrap_or(now);
        let mut active: page::ActiveModel = page.into();
        active.live = Set(true);
        active.first_published_at = Set(Some(first));
        active.last_published_at = Set(Some(now));
        active.updated_at = Set(now);
        let saved = active.update(db).await
            .map_err(db_error("DB_WRITE_ERR", "Failed to publish page"))?;
        tracing::info!(page = %saved.public_id, url = %saved.url_path, "page published");
        Ok(saved)
    }

    pub async fn publish(db: &DatabaseConnection, public_id: Uuid) -> ServiceResult<page::Model> {
        let page = Self::find_by_public_id(db, public_id).await?;
        Self::publish_page(db, page).await
    }

    pub async fn unpublish(db: &DatabaseConnection, public_id: Uuid) -> ServiceResult<page::Model> {
        let page = Self::find_by_public_id(db, public_id).await?;
        if page.page_type == PageType::Root {
            return Err((StatusCode::BAD_REQUEST, "ROOT_IMMUTABLE", "The root page is always live".to_string()));
        }
        let mut active: page::ActiveModel = page.into();
        active.live = Set(false);
        active.updated_at = Set(Utc::now());
        let saved = active.update(db).await
            .map_err(db_error("DB_WRITE_ERR", "Failed to unpublish page"))?;
        tracing::info!(page = %saved.public_id, "page unpublished");
        Ok(saved)
    }

    /// Deletes the page and its whole subtree. Type tables follow by cascade.
    pub async fn delete_page<C: ConnectionTrait>(db: &C, page: &page::Model) -> ServiceResult<u64> {
        if page.page_type == PageType::Root {
            return Err((StatusCode::BAD_REQUEST, "ROOT_IMMUTABLE", "The root page cannot be deleted".to_string()));
        }
        let res = page::Entity::delete_many()
            .filter(page::Column::Path.starts_with(&page.path))
            .exec(db).await
            .map_err(db_error("DB_WRITE_ERR", "Failed to delete page"))?;
        tracing::info!(page = %page.public_id, removed = res.rows_affected, "page subtree deleted");
        Ok(res.rows_affected)
    }

    pub async fn delete(db: &DatabaseConnection, public_id: Uuid) -> ServiceResult<u64> {
        let page = Self::find_by_public_id(db, public_id).await?;
        Self::delete_page(db, &page).await
    }

    pub async fn live_children<C: ConnectionTrait>(db: &C, page: &page::Model) -> ServiceResult<Vec<page::Model>> {
        page::Entity::find()
            .filter(page::Column::ParentId.eq(page.id))
            .filter(page::Column::Live.eq(true))
            .order_by_asc(page::Column::Path)
            .all(db).await
            .map_err(db_error("DB_ERR", "Failed to fetch child pages"))
    }

    /// Pages whose url_path prefixes `path`, root first, each with the unmatched remainder.
    ///
    /// `path` must start and end with `/`.
    pub async fn pages_along_path<C: ConnectionTrait>(db: &C, path: &str) -> ServiceResult<Vec<(page::Model, String)>> {
        let candidates: Vec<String> = path
            .match_indices('/')
            .map(|(i, _)| path[..=i].to_string())
            .collect();

        let pages = page::Entity::find()
            .filter(page::Column::UrlPath.is_in(candidates))
            .order_by_asc(page::Column::Depth)
            .all(db).await
            .map_err(db_error("DB_ERR", "Page routing failed"))?;

        Ok(pages
            .into_iter()
            .map(|p| {
                let remainder = path[p.url_path.len().min(path.len())..].to_string();
                (p, remainder)
            })
            .collect())
    }
}
