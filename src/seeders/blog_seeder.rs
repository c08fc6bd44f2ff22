use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entities::page::{self, PageType};
use crate::models::page_model::CreateIndexRequest;
use crate::services::index_service::IndexService;

/// Creates a live "Blog" index at `/blog/` unless any post index already exists.
pub async fn seed_blog_index(db: &DatabaseConnection) -> Result<(), String> {
    let exists = page::Entity::find()
        .filter(page::Column::PageType.eq(PageType::PostIndex))
        .one(db)
        .await
        .map_err(|e| e.to_string())?;

    if exists.is_none() {
        let index = IndexService::create_index(db, CreateIndexRequest {
            title: "Blog".to_string(),
            slug: Some("blog".to_string()),
            intro: String::new(),
            publish: true,
        })
        .await
        .map_err(|(_, _, msg)| msg)?;
        tracing::info!(url = %index.page.url, "Seeded blog index");
    }
    Ok(())
}
