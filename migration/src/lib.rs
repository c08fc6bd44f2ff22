pub use sea_orm_migration::prelude::*;

mod m20260120_000001_create_page_tree;
mod m20260120_000002_create_blog_tables;
mod m20260121_000003_create_taxonomy_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260120_000001_create_page_tree::Migration),
            Box::new(m20260120_000002_create_blog_tables::Migration),
            Box::new(m20260121_000003_create_taxonomy_tables::Migration),
        ]
    }
}
