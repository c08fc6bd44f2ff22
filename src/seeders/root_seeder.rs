use sea_orm::DatabaseConnection;

use crate::services::page_service::PageService;

/// Ensures the page tree has its root.
pub async fn seed_root(db: &DatabaseConnection) -> Result<(), String> {
    if PageService::root(db).await.is_ok() {
        return Ok(());
    }
    let root = PageService::create_root(db, "Root").await.map_err(|(_, _, msg)| msg)?;
    tracing::info!(page = %root.public_id, "Seeded root page");
    Ok(())
}
