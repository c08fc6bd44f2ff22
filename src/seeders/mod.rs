pub mod blog_seeder;
pub mod root_seeder;
pub mod tag_seeder;

use sea_orm::DatabaseConnection;

pub async fn run_seeders(db: &DatabaseConnection) -> Result<(), String> {
    // 1. Root page (everything else hangs below it)
    root_seeder::seed_root(db).await?;

    // 2. Default blog index
    blog_seeder::seed_blog_index(db).await?;

    // 3. Starter tags
    tag_seeder::seed_tags(db).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::site_service::{SiteResponse, SiteService};
    use crate::services::taxonomy_service::TaxonomyService;
    use crate::test_support;

    #[tokio::test]
    async fn seeding_is_idempotent_and_serves_the_blog() {
        let db = test_support::setup_db().await;
        run_seeders(&db).await.unwrap();
        run_seeders(&db).await.unwrap();

        assert_eq!(TaxonomyService::list_tags(&db).await.unwrap().len(), 4);
        assert!(matches!(SiteService::serve(&db, "/blog/").await.unwrap(), SiteResponse::Page(_)));
    }
}
