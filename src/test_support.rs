//! Fixtures shared by the unit tests: a migrated in-memory SQLite database
//! plus small builders for pages, images and categories.

use chrono::NaiveDate;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::entities::{category, image, page};
use crate::models::image_model::CreateImageRequest;
use crate::models::page_model::{CreateIndexRequest, CreatePostRequest};
use crate::models::taxonomy_model::CreateCategoryRequest;
use crate::services::image_service::ImageService;
use crate::services::index_service::IndexService;
use crate::services::page_service::PageService;
use crate::services::post_service::PostService;
use crate::services::taxonomy_service::TaxonomyService;

pub async fn setup_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    // One connection: every pooled connection would otherwise see its own database
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    crate::seeders::root_seeder::seed_root(&db).await.expect("seed root page");
    db
}

/// Creates a live post index directly below the root.
pub async fn create_index(db: &DatabaseConnection, title: &str) -> page::Model {
    let created = IndexService::create_index(db, CreateIndexRequest {
        title: title.to_string(),
        slug: None,
        intro: format!("All about {}", title),
        publish: true,
    })
    .await
    .expect("create index");
    PageService::find_by_public_id(db, created.page.id).await.expect("index page")
}

/// Creates a live post below `index` carrying the given tags.
pub async fn create_post(db: &DatabaseConnection, index: &page::Model, title: &str, tags: &[&str]) -> page::Model {
    let created = PostService::create_post(db, CreatePostRequest {
        parent: index.public_id,
        title: title.to_string(),
        slug: None,
        date: NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"),
        intro: format!("Intro for {}", title),
        body: format!("<p>{}</p>", title),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        categories: vec![],
        gallery: vec![],
        publish: true,
    })
    .await
    .expect("create post");
    PageService::find_by_public_id(db, created.page.id).await.expect("post page")
}

pub async fn create_image(db: &DatabaseConnection, title: &str) -> image::Model {
    let created = ImageService::create_image(db, CreateImageRequest {
        title: title.to_string(),
        url: format!("https://cdn.example.com/{}.webp", title),
        alt_text: None,
    })
    .await
    .expect("create image");
    ImageService::find_by_public_id(db, created.id).await.expect("image row")
}

pub async fn create_category(db: &DatabaseConnection, name: &str) -> category::Model {
    let created = TaxonomyService::create_category(db, CreateCategoryRequest {
        name: name.to_string(),
        icon: None,
    })
    .await
    .expect("create category");
    TaxonomyService::find_category(db, created.id).await.expect("category row")
}
