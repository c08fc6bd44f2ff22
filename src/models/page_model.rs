use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::page::{self, PageType};
use crate::entities::{gallery_image, post};
use crate::models::image_model::ImageResponse;
use crate::models::taxonomy_model::{CategoryResponse, TagResponse};
use crate::utils::validator_utils::{validate_required, validate_slug};

#[derive(Serialize, Debug)]
pub struct PageResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub url: String,
    pub page_type: PageType,
    pub depth: i32,
    pub live: bool,
    pub first_published_at: Option<DateTime<Utc>>,
    pub last_published_at: Option<DateTime<Utc>>,
}

impl From<page::Model> for PageResponse {
    fn from(p: page::Model) -> Self {
        Self {
            id: p.public_id,
            title: p.title,
            slug: p.slug,
            url: p.url_path,
            page_type: p.page_type,
            depth: p.depth,
            live: p.live,
            first_published_at: p.first_published_at,
            last_published_at: p.last_published_at,
        }
    }
}

// --- Post index ---

#[derive(Deserialize, Validate)]
pub struct CreateIndexRequest {
    #[validate(custom(function = "validate_required"), length(max = 255))]
    pub title: String,
    #[validate(custom(function = "validate_slug"), length(max = 255))]
    pub slug: Option<String>,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub publish: bool,
}

#[derive(Deserialize, Validate)]
pub struct UpdateIndexRequest {
    #[validate(custom(function = "validate_required"), length(max = 255))]
    pub title: Option<String>,
    #[validate(custom(function = "validate_slug"), length(max = 255))]
    pub slug: Option<String>,
    pub intro: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct IndexResponse {
    #[serde(flatten)]
    pub page: PageResponse,
    pub intro: String,
}

// --- Post ---

#[derive(Deserialize, Validate)]
pub struct GalleryItemRequest {
    pub image: Uuid,
    #[serde(default)]
    #[validate(length(max = 255, message = "Caption must be at most 255 chars"))]
    pub caption: String,
}

#[derive(Deserialize, Validate)]
pub struct CreatePostRequest {
    /// Public id of the post index the post is created under.
    pub parent: Uuid,
    #[validate(custom(function = "validate_required"), length(max = 255))]
    pub title: String,
    #[validate(custom(function = "validate_slug"), length(max = 255))]
    pub slug: Option<String>,
    pub date: NaiveDate,
    #[validate(length(max = 255, message = "Intro must be at most 255 chars"))]
    pub intro: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub categories: Vec<Uuid>,
    #[serde(default)]
    #[validate(nested)]
    pub gallery: Vec<GalleryItemRequest>,
    #[serde(default)]
    pub publish: bool,
}

#[derive(Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(custom(function = "validate_required"), length(max = 255))]
    pub title: Option<String>,
    #[validate(custom(function = "validate_slug"), length(max = 255))]
    pub slug: Option<String>,
    pub date: Option<NaiveDate>,
    #[validate(length(max = 255, message = "Intro must be at most 255 chars"))]
    pub intro: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
    pub categories: Option<Vec<Uuid>>,
    #[validate(nested)]
    pub gallery: Option<Vec<GalleryItemRequest>>,
}

#[derive(Serialize, Debug)]
pub struct GalleryImageResponse {
    pub image: ImageResponse,
    pub caption: String,
    pub sort_order: i32,
}

impl GalleryImageResponse {
    pub fn new(item: gallery_image::Model, image: ImageResponse) -> Self {
        Self {
            image,
            caption: item.caption,
            sort_order: item.sort_order,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct PostResponse {
    #[serde(flatten)]
    pub page: PageResponse,
    pub date: NaiveDate,
    pub intro: String,
    pub body: String,
    pub tags: Vec<TagResponse>,
    pub categories: Vec<CategoryResponse>,
    pub gallery: Vec<GalleryImageResponse>,
    pub main_image: Option<ImageResponse>,
}

/// Compact post card used by listings.
#[derive(Serialize, Debug)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub date: NaiveDate,
    pub intro: String,
    pub first_published_at: Option<DateTime<Utc>>,
    pub main_image: Option<ImageResponse>,
}

impl PostSummary {
    pub fn new(page: page::Model, post: post::Model, main_image: Option<ImageResponse>) -> Self {
        Self {
            id: page.public_id,
            title: page.title,
            url: page.url_path,
            date: post.date,
            intro: post.intro,
            first_published_at: page.first_published_at,
            main_image,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ListingResponse {
    pub index: IndexResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<TagResponse>,
    pub posts: Vec<PostSummary>,
}

#[derive(Serialize, Debug)]
pub struct RootResponse {
    #[serde(flatten)]
    pub page: PageResponse,
    pub children: Vec<PageResponse>,
}

/// Whatever a site URL resolves to.
#[derive(Serialize, Debug)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderedPage {
    Root(RootResponse),
    Listing(ListingResponse),
    Post(PostResponse),
}

#[derive(Deserialize, Validate)]
pub struct SearchParams {
    #[validate(custom(function = "validate_required"), length(max = 255))]
    pub q: String,
}
