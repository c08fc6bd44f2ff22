use std::collections::HashSet;

use axum::http::StatusCode;
use sea_orm::*;
use uuid::Uuid;

use crate::entities::page::{self, PageType};
use crate::entities::{category, gallery_image, image, post, post_category, post_tag, tag};
use crate::models::image_model::ImageResponse;
use crate::models::page_model::*;
use crate::models::taxonomy_model::TagResponse;
use crate::services::image_service::ImageService;
use crate::services::page_service::{NewPage, PageService};
use crate::services::taxonomy_service::TaxonomyService;
use crate::utils::api_response::{db_error, not_found, ServiceResult};

pub struct PostService;

impl PostService {
    pub async fn create_post(db: &DatabaseConnection, payload: CreatePostRequest) -> ServiceResult<PostResponse> {
        let txn = db.begin().await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "TXN_ERR", "Transaction start failed".to_string()))?;

        let parent = PageService::find_by_public_id(&txn, payload.parent).await
            .map_err(|_| (StatusCode::BAD_REQUEST, "PARENT_NOT_FOUND", format!("Parent page {} not found", payload.parent)))?;

        let page = PageService::add_child(&txn, &parent, NewPage {
            title: payload.title,
            slug: payload.slug,
            page_type: PageType::Post,
        }).await?;

        post::ActiveModel {
            page_id: Set(page.id),
            date: Set(payload.date),
            intro: Set(payload.intro),
            body: Set(payload.body),
        }
        .insert(&txn).await
        .map_err(db_error("DB_WRITE_ERR", "Failed to create post"))?;

        Self::set_tags(&txn, page.id, &payload.tags).await?;
        Self::set_categories(&txn, page.id, &payload.categories).await?;
        Self::set_gallery(&txn, page.id, &payload.gallery).await?;

        let page = if payload.publish {
            PageService::publish_page(&txn, page).await?
        } else {
            page
        };

        txn.commit().await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "TXN_COMMIT_ERR", "Transaction commit failed".to_string()))?;

        Self::get_post(db, page.public_id).await
    }

    pub async fn get_post<C: ConnectionTrait>(db: &C, public_id: Uuid) -> ServiceResult<PostResponse> {
        let (page, post) = Self::find_post(db, public_id).await?;
        Self::render(db, page, post).await
    }

    pub async fn find_post<C: ConnectionTrait>(db: &C, public_id: Uuid) -> ServiceResult<(page::Model, post::Model)> {
        let page = PageService::find_typed(db, public_id, PageType::Post).await
            .map_err(|_| not_found("POST_NOT_FOUND", "Post not found"))?;
        let post = page.find_related(post::Entity)
            .one(db).await
            .map_err(db_error("DB_ERR", "Post lookup failed"))?
            .ok_or((StatusCode::INTERNAL_SERVER_ERROR, "DATA_CORRUPT", "Post page has no post row".to_string()))?;
        Ok((page, post))
    }

    pub async fn update_post(
        db: &DatabaseConnection,
        public_id: Uuid,
        payload: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let txn = db.begin().await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "TXN_ERR", "Transaction start failed".to_string()))?;

        let (mut page, post) = Self::find_post(&txn, public_id).await?;

        if let Some(title) = payload.title {
            page = PageService::set_title(&txn, page, title).await?;
        }
        if let Some(slug) = payload.slug {
            page = PageService::change_slug(&txn, page, &slug).await?;
        }

        let mut active: post::ActiveModel = post.into();
        if let Some(d) = payload.date { active.date = Set(d); }
        if let Some(i) = payload.intro { active.intro = Set(i); }
        if let Some(b) = payload.body { active.body = Set(b); }
        if active.is_changed() {
            active.update(&txn).await
                .map_err(db_error("DB_WRITE_ERR", "Failed to update post"))?;
        }

        if let Some(tags) = payload.tags {
            Self::set_tags(&txn, page.id, &tags).await?;
        }
        if let Some(categories) = payload.categories {
            Self::set_categories(&txn, page.id, &categories).await?;
        }
        if let Some(gallery) = payload.gallery {
            Self::set_gallery(&txn, page.id, &gallery).await?;
        }

        txn.commit().await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "TXN_COMMIT_ERR", "Transaction commit failed".to_string()))?;

        Self::get_post(db, page.public_id).await
    }

    pub async fn delete_post(db: &DatabaseConnection, public_id: Uuid) -> ServiceResult<()> {
        let (page, _) = Self::find_post(db, public_id).await?;
        PageService::delete_page(db, &page).await?;
        Ok(())
    }

    pub async fn main_image<C: ConnectionTrait>(db: &C, post: &post::Model) -> ServiceResult<Option<ImageResponse>> {
        post.main_image(db).await
            .map(|img| img.map(ImageResponse::from))
            .map_err(db_error("DB_ERR", "Main image lookup failed"))
    }

    pub async fn main_image_of(db: &DatabaseConnection, public_id: Uuid) -> ServiceResult<Option<ImageResponse>> {
        let (_, post) = Self::find_post(db, public_id).await?;
        Self::main_image(db, &post).await
    }

    /// Replaces the post's tags with the given free-text names.
    async fn set_tags<C: ConnectionTrait>(db: &C, post_id: i64, names: &[String]) -> ServiceResult<()> {
        post_tag::Entity::delete_many()
            .filter(post_tag::Column::PostId.eq(post_id))
            .exec(db).await
            .map_err(db_error("DB_WRITE_ERR", "Failed to clear tags"))?;

        let mut seen = HashSet::new();
        for name in names.iter().filter(|n| !n.trim().is_empty()) {
            let tag = TaxonomyService::get_or_create_tag(db, name).await?;
            if !seen.insert(tag.id) {
                continue;
            }
            post_tag::ActiveModel {
                post_id: Set(post_id),
                tag_id: Set(tag.id),
            }
            .insert(db).await
            .map_err(db_error("DB_WRITE_ERR", "Failed to tag post"))?;
        }
        Ok(())
    }

    async fn set_categories<C: ConnectionTrait>(db: &C, post_id: i64, ids: &[Uuid]) -> ServiceResult<()> {
        post_category::Entity::delete_many()
            .filter(post_category::Column::PostId.eq(post_id))
            .exec(db).await
            .map_err(db_error("DB_WRITE_ERR", "Failed to clear categories"))?;

        let mut seen = HashSet::new();
        for id in ids {
            let category = TaxonomyService::find_category(db, *id).await?;
            if !seen.insert(category.id) {
                continue;
            }
            post_category::ActiveModel {
                post_id: Set(post_id),
                category_id: Set(category.id),
            }
            .insert(db).await
            .map_err(db_error("DB_WRITE_ERR", "Failed to link category"))?;
        }
        Ok(())
    }

    /// Replaces the gallery; list order becomes sort order starting at 0.
    async fn set_gallery<C: ConnectionTrait>(db: &C, post_id: i64, items: &[GalleryItemRequest]) -> ServiceResult<()> {
        gallery_image::Entity::delete_many()
            .filter(gallery_image::Column::PostId.eq(post_id))
            .exec(db).await
            .map_err(db_error("DB_WRITE_ERR", "Failed to clear gallery"))?;

        for (position, item) in items.iter().enumerate() {
            let image = ImageService::find_by_public_id(db, item.image).await?;
            gallery_image::ActiveModel {
                id: NotSet,
                post_id: Set(post_id),
                image_id: Set(image.id),
                caption: Set(item.caption.clone()),
                sort_order: Set(position as i32),
            }
            .insert(db).await
            .map_err(db_error("DB_WRITE_ERR", "Failed to add gallery image"))?;
        }
        Ok(())
    }

    pub async fn tags_of<C: ConnectionTrait>(db: &C, post: &post::Model) -> ServiceResult<Vec<tag::Model>> {
        post.find_related(tag::Entity)
            .order_by_asc(tag::Column::Name)
            .all(db).await
            .map_err(db_error("DB_ERR", "Failed to fetch tags"))
    }

    pub async fn render<C: ConnectionTrait>(db: &C, page: page::Model, post: post::Model) -> ServiceResult<PostResponse> {
        let tags = Self::tags_of(db, &post).await?;

        let categories = post.find_related(category::Entity)
            .order_by_asc(category::Column::Name)
            .find_also_related(image::Entity)
            .all(db).await
            .map_err(db_error("DB_ERR", "Failed to fetch categories"))?;

        let gallery = gallery_image::Entity::find()
            .filter(gallery_image::Column::PostId.eq(post.page_id))
            .order_by_asc(gallery_image::Column::SortOrder)
            .find_also_related(image::Entity)
            .all(db).await
            .map_err(db_error("DB_ERR", "Failed to fetch gallery"))?;

        let main_image = Self::main_image(db, &post).await?;

        Ok(PostResponse {
            page: page.into(),
            date: post.date,
            intro: post.intro,
            body: post.body,
            tags: tags.into_iter().map(TagResponse::from).collect(),
            categories: categories
                .into_iter()
                .map(|(c, icon)| TaxonomyService::category_response(c, icon))
                .collect(),
            gallery: gallery
                .into_iter()
                .filter_map(|(item, img)| img.map(|img| GalleryImageResponse::new(item, img.into())))
                .collect(),
            main_image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use chrono::NaiveDate;

    fn request(parent: Uuid, title: &str) -> CreatePostRequest {
        CreatePostRequest {
            parent,
            title: title.into(),
            slug: None,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            intro: "A short intro".into(),
            body: "<p>Body</p>".into(),
            tags: vec![],
            categories: vec![],
            gallery: vec![],
            publish: true,
        }
    }

    #[tokio::test]
    async fn empty_gallery_has_no_main_image() {
        let db = test_support::setup_db().await;
        let blog = test_support::create_index(&db, "Blog").await;
        let created = PostService::create_post(&db, request(blog.public_id, "Bare")).await.unwrap();

        assert!(created.main_image.is_none());
        assert!(PostService::main_image_of(&db, created.page.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn main_image_is_the_first_gallery_item() {
        let db = test_support::setup_db().await;
        let blog = test_support::create_index(&db, "Blog").await;
        let first = test_support::create_image(&db, "first").await;
        let second = test_support::create_image(&db, "second").await;

        let mut req = request(blog.public_id, "Pictures");
        req.gallery = vec![
            GalleryItemRequest { image: first.public_id, caption: "one".into() },
            GalleryItemRequest { image: second.public_id, caption: "two".into() },
        ];
        let created = PostService::create_post(&db, req).await.unwrap();

        assert_eq!(created.gallery.len(), 2);
        assert_eq!(created.gallery[0].sort_order, 0);
        assert_eq!(created.main_image.as_ref().map(|i| i.id), Some(first.public_id));

        // Reordering the gallery changes the main image on the next call
        PostService::update_post(&db, created.page.id, UpdatePostRequest {
            title: None,
            slug: None,
            date: None,
            intro: None,
            body: None,
            tags: None,
            categories: None,
            gallery: Some(vec![GalleryItemRequest { image: second.public_id, caption: String::new() }]),
        }).await.unwrap();
        let main = PostService::main_image_of(&db, created.page.id).await.unwrap();
        assert_eq!(main.map(|i| i.id), Some(second.public_id));
    }

    #[tokio::test]
    async fn tags_and_categories_are_linked_once() {
        let db = test_support::setup_db().await;
        let blog = test_support::create_index(&db, "Blog").await;
        let cat = test_support::create_category(&db, "Travel").await;

        let mut req = request(blog.public_id, "Trip");
        req.tags = vec!["Rust".into(), "rust".into(), "Travel Notes".into(), " ".into()];
        req.categories = vec![cat.public_id, cat.public_id];
        let created = PostService::create_post(&db, req).await.unwrap();

        let slugs: Vec<_> = created.tags.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["rust", "travel-notes"]);
        assert_eq!(created.categories.len(), 1);
        assert_eq!(created.categories[0].name, "Travel");
    }

    #[tokio::test]
    async fn unknown_category_rolls_back_the_whole_post() {
        let db = test_support::setup_db().await;
        let blog = test_support::create_index(&db, "Blog").await;

        let mut req = request(blog.public_id, "Broken");
        req.categories = vec![Uuid::now_v7()];
        let err = PostService::create_post(&db, req).await.unwrap_err();
        assert_eq!(err.1, "CATEGORY_NOT_FOUND");

        let pages = page::Entity::find()
            .filter(page::Column::PageType.eq(PageType::Post))
            .count(&db).await.unwrap();
        assert_eq!(pages, 0);
    }

    #[tokio::test]
    async fn posts_must_live_under_an_index() {
        let db = test_support::setup_db().await;
        let root = PageService::root(&db).await.unwrap();
        let err = PostService::create_post(&db, request(root.public_id, "Orphan")).await.unwrap_err();
        assert_eq!(err.1, "INVALID_PARENT");
    }

    #[tokio::test]
    async fn deleting_a_post_cascades_to_links_and_gallery() {
        let db = test_support::setup_db().await;
        let blog = test_support::create_index(&db, "Blog").await;
        let img = test_support::create_image(&db, "pic").await;

        let mut req = request(blog.public_id, "Doomed");
        req.tags = vec!["gone".into()];
        req.gallery = vec![GalleryItemRequest { image: img.public_id, caption: String::new() }];
        let created = PostService::create_post(&db, req).await.unwrap();

        PostService::delete_post(&db, created.page.id).await.unwrap();

        assert_eq!(post::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(post_tag::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(gallery_image::Entity::find().count(&db).await.unwrap(), 0);
        // The tag and the image outlive the post
        assert_eq!(tag::Entity::find().count(&db).await.unwrap(), 1);
        assert_eq!(image::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn deleting_an_image_drops_its_gallery_items() {
        let db = test_support::setup_db().await;
        let blog = test_support::create_index(&db, "Blog").await;
        let img = test_support::create_image(&db, "pic").await;

        let mut req = request(blog.public_id, "Gallery");
        req.gallery = vec![GalleryItemRequest { image: img.public_id, caption: "c".into() }];
        let created = PostService::create_post(&db, req).await.unwrap();

        ImageService::delete_image(&db, img.public_id).await.unwrap();

        let post = PostService::get_post(&db, created.page.id).await.unwrap();
        assert!(post.gallery.is_empty());
        assert!(post.main_image.is_none());
    }
}
