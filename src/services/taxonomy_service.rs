use axum::http::StatusCode;
use chrono::Utc;
use sea_orm::*;
use slug::slugify;
use uuid::Uuid;

use crate::entities::{category, image, tag};
use crate::models::image_model::ImageResponse;
use crate::models::taxonomy_model::*;
use crate::services::image_service::ImageService;
use crate::utils::api_response::{db_error, not_found, ServiceResult};

pub struct TaxonomyService;

impl TaxonomyService {
    pub async fn list_tags(db: &DatabaseConnection) -> ServiceResult<Vec<TagResponse>> {
        let tags = tag::Entity::find()
            .order_by_asc(tag::Column::Name)
            .all(db).await
            .map_err(db_error("DB_ERR", "Failed to fetch tags"))?;

        Ok(tags.into_iter().map(TagResponse::from).collect())
    }

    /// First tag with the given slug, if any.
    pub async fn find_tag_by_slug<C: ConnectionTrait>(db: &C, slug: &str) -> ServiceResult<Option<tag::Model>> {
        tag::Entity::find_by_slug(slug)
            .one(db).await
            .map_err(db_error("DB_ERR", "Tag lookup failed"))
    }

    /// Looks a free-text tag up by name, then by slug, creating it when neither exists.
    pub async fn get_or_create_tag<C: ConnectionTrait>(db: &C, name: &str) -> ServiceResult<tag::Model> {
        let name = name.trim();
        let slug = slugify(name);
        if slug.is_empty() {
            return Err((StatusCode::BAD_REQUEST, "INVALID_TAG", format!("Tag '{}' has no usable characters", name)));
        }

        let existing = tag::Entity::find_by_name_or_slug(name, &slug)
            .one(db).await
            .map_err(db_error("DB_ERR", "Tag lookup failed"))?;
        if let Some(t) = existing {
            return Ok(t);
        }

        let saved = tag::ActiveModel {
            id: NotSet,
            public_id: Set(Uuid::now_v7()),
            name: Set(name.to_string()),
            slug: Set(slug),
            created_at: Set(Utc::now()),
        }
        .insert(db).await
        .map_err(db_error("DB_WRITE_ERR", "Failed to create tag"))?;

        tracing::info!(tag = %saved.name, slug = %saved.slug, "tag created");
        Ok(saved)
    }

    pub async fn list_categories(db: &DatabaseConnection) -> ServiceResult<Vec<CategoryResponse>> {
        let rows = category::Entity::find()
            .order_by_asc(category::Column::Name)
            .find_also_related(image::Entity)
            .all(db).await
            .map_err(db_error("DB_ERR", "Failed to fetch categories"))?;

        Ok(rows.into_iter().map(|(c, icon)| Self::category_response(c, icon)).collect())
    }

    pub async fn find_category<C: ConnectionTrait>(db: &C, public_id: Uuid) -> ServiceResult<category::Model> {
        category::Entity::find()
            .filter(category::Column::PublicId.eq(public_id))
            .one(db).await
            .map_err(db_error("DB_ERR", "Category lookup failed"))?
            .ok_or_else(|| (StatusCode::BAD_REQUEST, "CATEGORY_NOT_FOUND", format!("Category with ID {} not found", public_id)))
    }

    pub async fn create_category(db: &DatabaseConnection, payload: CreateCategoryRequest) -> ServiceResult<CategoryResponse> {
        let icon = match payload.icon {
            Some(id) => Some(ImageService::find_by_public_id(db, id).await?),
            None => None,
        };

        let saved = category::ActiveModel {
            id: NotSet,
            public_id: Set(Uuid::now_v7()),
            name: Set(payload.name.trim().to_string()),
            icon_id: Set(icon.as_ref().map(|i| i.id)),
            created_at: Set(Utc::now()),
        }
        .insert(db).await
        .map_err(db_error("DB_WRITE_ERR", "Failed to create category"))?;

        tracing::info!(category = %saved, "category created");
        Ok(Self::category_response(saved, icon))
    }

    pub async fn update_category(
        db: &DatabaseConnection,
        public_id: Uuid,
        payload: UpdateCategoryRequest,
    ) -> ServiceResult<CategoryResponse> {
        let existing = Self::find_category(db, public_id).await
            .map_err(|_| not_found("CATEGORY_NOT_FOUND", "Category not found"))?;

        let mut active: category::ActiveModel = existing.into();
        if let Some(name) = payload.name {
            active.name = Set(name.trim().to_string());
        }
        match payload.icon {
            Some(Some(id)) => {
                let icon = ImageService::find_by_public_id(db, id).await?;
                active.icon_id = Set(Some(icon.id));
            }
            Some(None) => active.icon_id = Set(None),
            None => {}
        }

        let updated = active.update(db).await
            .map_err(db_error("DB_WRITE_ERR", "Failed to update category"))?;
        let icon = Self::icon_of(db, &updated).await?;
        Ok(Self::category_response(updated, icon))
    }

    pub async fn delete_category(db: &DatabaseConnection, public_id: Uuid) -> ServiceResult<()> {
        let existing = Self::find_category(db, public_id).await
            .map_err(|_| not_found("CATEGORY_NOT_FOUND", "Category not found"))?;

        category::Entity::delete_by_id(existing.id).exec(db).await
            .map_err(db_error("DB_WRITE_ERR", "Failed to delete category"))?;
        tracing::info!(category = %existing, "category deleted");
        Ok(())
    }

    async fn icon_of<C: ConnectionTrait>(db: &C, category: &category::Model) -> ServiceResult<Option<image::Model>> {
        category.find_related(image::Entity)
            .one(db).await
            .map_err(db_error("DB_ERR", "Icon lookup failed"))
    }

    pub fn category_response(model: category::Model, icon: Option<image::Model>) -> CategoryResponse {
        CategoryResponse {
            id: model.public_id,
            name: model.name,
            icon: icon.map(ImageResponse::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[tokio::test]
    async fn tags_are_reused_by_name_or_slug() {
        let db = test_support::setup_db().await;

        let a = TaxonomyService::get_or_create_tag(&db, "Web Development").await.unwrap();
        let b = TaxonomyService::get_or_create_tag(&db, "  Web Development ").await.unwrap();
        let c = TaxonomyService::get_or_create_tag(&db, "web development").await.unwrap();

        assert_eq!(a.slug, "web-development");
        assert_eq!(a.id, b.id);
        assert_eq!(a.id, c.id);
        assert_eq!(c.to_string(), "Web Development");

        let err = TaxonomyService::get_or_create_tag(&db, "!!!").await.unwrap_err();
        assert_eq!(err.1, "INVALID_TAG");
    }

    #[tokio::test]
    async fn category_displays_as_its_name() {
        let db = test_support::setup_db().await;
        let created = TaxonomyService::create_category(&db, CreateCategoryRequest {
            name: "Travel".into(),
            icon: None,
        }).await.unwrap();

        let model = TaxonomyService::find_category(&db, created.id).await.unwrap();
        assert_eq!(model.to_string(), "Travel");
    }

    #[tokio::test]
    async fn deleting_an_icon_image_keeps_the_category() {
        let db = test_support::setup_db().await;
        let icon = test_support::create_image(&db, "Plane").await;
        let created = TaxonomyService::create_category(&db, CreateCategoryRequest {
            name: "Travel".into(),
            icon: Some(icon.public_id),
        }).await.unwrap();
        assert_eq!(created.icon.as_ref().map(|i| i.id), Some(icon.public_id));

        ImageService::delete_image(&db, icon.public_id).await.unwrap();

        let model = TaxonomyService::find_category(&db, created.id).await.unwrap();
        assert_eq!(model.icon_id, None);
        let listed = TaxonomyService::list_categories(&db).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].icon.is_none());
    }

    #[tokio::test]
    async fn update_can_clear_the_icon() {
        let db = test_support::setup_db().await;
        let icon = test_support::create_image(&db, "Leaf").await;
        let created = TaxonomyService::create_category(&db, CreateCategoryRequest {
            name: "Nature".into(),
            icon: Some(icon.public_id),
        }).await.unwrap();

        let updated = TaxonomyService::update_category(&db, created.id, UpdateCategoryRequest {
            name: Some("Outdoors".into()),
            icon: Some(None),
        }).await.unwrap();

        assert_eq!(updated.name, "Outdoors");
        assert!(updated.icon.is_none());
    }
}
