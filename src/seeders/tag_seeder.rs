use sea_orm::DatabaseConnection;

use crate::services::taxonomy_service::TaxonomyService;

pub async fn seed_tags(db: &DatabaseConnection) -> Result<(), String> {
    let tags = ["Technology", "Programming", "Rust", "Web Development"];

    for name in tags {
        TaxonomyService::get_or_create_tag(db, name)
            .await
            .map_err(|(_, _, msg)| msg)?;
    }

    Ok(())
}
