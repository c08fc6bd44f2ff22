use axum::http::StatusCode;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entities::image;
use crate::models::image_model::{CreateImageRequest, ImageListResponse, ImageResponse, PaginationMeta};
use crate::utils::api_response::{db_error, not_found, ServiceResult};

pub struct ImageService;

impl ImageService {
    pub async fn create_image(db: &DatabaseConnection, payload: CreateImageRequest) -> ServiceResult<ImageResponse> {
        let saved = image::ActiveModel {
            id: NotSet,
            public_id: Set(Uuid::now_v7()),
            title: Set(payload.title),
            url: Set(payload.url),
            alt_text: Set(payload.alt_text),
            created_at: Set(Utc::now()),
        }
        .insert(db).await
        .map_err(db_error("DB_WRITE_ERR", "Failed to save image record"))?;

        Ok(saved.into())
    }

    pub async fn find_by_public_id<C: ConnectionTrait>(db: &C, public_id: Uuid) -> ServiceResult<image::Model> {
        image::Entity::find()
            .filter(image::Column::PublicId.eq(public_id))
            .one(db).await
            .map_err(db_error("DB_ERR", "Image lookup failed"))?
            .ok_or_else(|| (StatusCode::BAD_REQUEST, "IMAGE_NOT_FOUND", format!("Image with ID {} not found", public_id)))
    }

    /// Deletes the image; gallery items using it go with it and category icons are nulled.
    pub async fn delete_image(db: &DatabaseConnection, public_id: Uuid) -> ServiceResult<()> {
        let image = Self::find_by_public_id(db, public_id).await
            .map_err(|_| not_found("IMAGE_NOT_FOUND", "Image not found"))?;

        image::Entity::delete_by_id(image.id).exec(db).await
            .map_err(db_error("DB_WRITE_ERR", "Failed to delete image"))?;
        tracing::info!(image = %image.public_id, "image deleted");
        Ok(())
    }

    pub async fn list_images(db: &DatabaseConnection, page: u64, limit: u64) -> ServiceResult<ImageListResponse> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);
        let paginator = image::Entity::find()
            .order_by_desc(image::Column::CreatedAt)
            .order_by_desc(image::Column::Id)
            .paginate(db, limit);

        let total = paginator.num_items().await.map_err(db_error("DB_ERR", "Count failed"))?;
        let items = paginator.fetch_page(page - 1).await.map_err(db_error("DB_ERR", "Fetch failed"))?;

        Ok(ImageListResponse {
            data: items.into_iter().map(ImageResponse::from).collect(),
            meta: PaginationMeta { total, page, limit },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[tokio::test]
    async fn lists_newest_images_first_with_pagination() {
        let db = test_support::setup_db().await;
        for title in ["one", "two", "three"] {
            test_support::create_image(&db, title).await;
        }

        let first = ImageService::list_images(&db, 1, 2).await.unwrap();
        assert_eq!(first.meta.total, 3);
        assert_eq!(first.data.len(), 2);
        assert_eq!(first.data[0].title, "three");

        let second = ImageService::list_images(&db, 2, 2).await.unwrap();
        assert_eq!(second.data.len(), 1);
        assert_eq!(second.data[0].title, "one");
    }

    #[tokio::test]
    async fn unknown_image_is_not_found_on_delete() {
        let db = test_support::setup_db().await;
        let err = ImageService::delete_image(&db, Uuid::now_v7()).await.unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }
}
