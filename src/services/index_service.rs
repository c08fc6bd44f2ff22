use axum::http::StatusCode;
use once_cell::sync::Lazy;
use sea_orm::*;
use uuid::Uuid;

use crate::entities::page::{self, PageType};
use crate::entities::{post, post_index, post_tag, tag};
use crate::models::page_model::*;
use crate::models::taxonomy_model::TagResponse;
use crate::services::page_service::{NewPage, PageService};
use crate::services::post_service::PostService;
use crate::services::taxonomy_service::TaxonomyService;
use crate::utils::api_response::{db_error, not_found, ServiceResult};
use crate::utils::route_table::RouteTable;

/// Sub-paths answered by a post index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexRoute {
    PostByTag { tag: Option<String> },
}

pub static INDEX_ROUTES: Lazy<RouteTable<IndexRoute>> = Lazy::new(|| {
    RouteTable::new()
        .route("post_by_tag", r"^tags/$", |_| IndexRoute::PostByTag { tag: None })
        .and_then(|t| {
            t.route("post_by_tag", r"^tags/([\w-]+)/$", |args| IndexRoute::PostByTag {
                tag: args.into_iter().next().flatten(),
            })
        })
        .expect("index route patterns are valid")
});

/// What a matched index route asks the server to do.
#[derive(Debug)]
pub enum RouteOutcome {
    Redirect(String),
    Render(ListingResponse),
}

pub struct IndexService;

impl IndexService {
    pub async fn create_index(db: &DatabaseConnection, payload: CreateIndexRequest) -> ServiceResult<IndexResponse> {
        let txn = db.begin().await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "TXN_ERR", "Transaction start failed".to_string()))?;

        let root = PageService::root(&txn).await?;
        let page = PageService::add_child(&txn, &root, NewPage {
            title: payload.title,
            slug: payload.slug,
            page_type: PageType::PostIndex,
        }).await?;

        let index = post_index::ActiveModel {
            page_id: Set(page.id),
            intro: Set(payload.intro),
        }
        .insert(&txn).await
        .map_err(db_error("DB_WRITE_ERR", "Failed to create post index"))?;

        let page = if payload.publish {
            PageService::publish_page(&txn, page).await?
        } else {
            page
        };

        txn.commit().await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "TXN_COMMIT_ERR", "Transaction commit failed".to_string()))?;

        Ok(IndexResponse { page: page.into(), intro: index.intro })
    }

    pub async fn find_index<C: ConnectionTrait>(db: &C, public_id: Uuid) -> ServiceResult<(page::Model, post_index::Model)> {
        let page = PageService::find_typed(db, public_id, PageType::PostIndex).await
            .map_err(|_| not_found("INDEX_NOT_FOUND", "Post index not found"))?;
        let index = Self::index_row(db, &page).await?;
        Ok((page, index))
    }

    async fn index_row<C: ConnectionTrait>(db: &C, page: &page::Model) -> ServiceResult<post_index::Model> {
        page.find_related(post_index::Entity)
            .one(db).await
            .map_err(db_error("DB_ERR", "Post index lookup failed"))?
            .ok_or((StatusCode::INTERNAL_SERVER_ERROR, "DATA_CORRUPT", "Index page has no index row".to_string()))
    }

    pub async fn get_index(db: &DatabaseConnection, public_id: Uuid) -> ServiceResult<IndexResponse> {
        let (page, index) = Self::find_index(db, public_id).await?;
        Ok(IndexResponse { page: page.into(), intro: index.intro })
    }

    pub async fn update_index(
        db: &DatabaseConnection,
        public_id: Uuid,
        payload: UpdateIndexRequest,
    ) -> ServiceResult<IndexResponse> {
        let txn = db.begin().await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "TXN_ERR", "Transaction start failed".to_string()))?;

        let (mut page, index) = Self::find_index(&txn, public_id).await?;
        if let Some(title) = payload.title {
            page = PageService::set_title(&txn, page, title).await?;
        }
        if let Some(slug) = payload.slug {
            page = PageService::change_slug(&txn, page, &slug).await?;
        }

        let index = match payload.intro {
            Some(intro) => {
                let mut active: post_index::ActiveModel = index.into();
                active.intro = Set(intro);
                active.update(&txn).await
                    .map_err(db_error("DB_WRITE_ERR", "Failed to update post index"))?
            }
            None => index,
        };

        txn.commit().await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "TXN_COMMIT_ERR", "Transaction commit failed".to_string()))?;

        Ok(IndexResponse { page: page.into(), intro: index.intro })
    }

    /// Live post pages strictly below `index`, optionally only those tagged `tag`.
    async fn posts_query<C: ConnectionTrait>(
        db: &C,
        index: &page::Model,
        tag: Option<&tag::Model>,
    ) -> Result<Select<page::Entity>, DbErr> {
        let mut query = page::Entity::find()
            .filter(page::Column::PageType.eq(PageType::Post))
            .filter(page::Column::Live.eq(true))
            .filter(page::Column::Path.starts_with(&index.path))
            .filter(page::Column::Depth.gt(index.depth));

        if let Some(tag) = tag {
            let tagged: Vec<i64> = post_tag::Entity::find()
                .filter(post_tag::Column::TagId.eq(tag.id))
                .all(db).await?
                .into_iter()
                .map(|link| link.post_id)
                .collect();
            query = query.filter(page::Column::Id.is_in(tagged));
        }
        Ok(query)
    }

    /// Members of the index in no particular order.
    pub async fn get_posts<C: ConnectionTrait>(
        db: &C,
        index: &page::Model,
        tag: Option<&tag::Model>,
    ) -> ServiceResult<Vec<(page::Model, post::Model)>> {
        let rows = Self::posts_query(db, index, tag).await
            .map_err(db_error("DB_ERR", "Post query failed"))?
            .find_also_related(post::Entity)
            .all(db).await
            .map_err(db_error("DB_ERR", "Post query failed"))?;

        Ok(rows.into_iter().filter_map(|(page, post)| post.map(|post| (page, post))).collect())
    }

    /// Listing context: members newest first, each with its main image.
    pub async fn listing<C: ConnectionTrait>(
        db: &C,
        index: page::Model,
        tag: Option<tag::Model>,
    ) -> ServiceResult<ListingResponse> {
        let mut rows = Self::get_posts(db, &index, tag.as_ref()).await?;
        rows.sort_by(|(a, _), (b, _)| {
            b.first_published_at
                .cmp(&a.first_published_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let mut posts = Vec::with_capacity(rows.len());
        for (page, post) in rows {
            let main_image = PostService::main_image(db, &post).await?;
            posts.push(PostSummary::new(page, post, main_image));
        }

        let intro = Self::index_row(db, &index).await?.intro;
        Ok(ListingResponse {
            index: IndexResponse { page: index.into(), intro },
            tag: tag.map(TagResponse::from),
            posts,
        })
    }

    /// Dispatches the part of a request path below the index URL.
    ///
    /// `None` when no index route matches, so the caller can try child pages.
    pub async fn serve_route<C: ConnectionTrait>(
        db: &C,
        index: page::Model,
        remainder: &str,
    ) -> ServiceResult<Option<RouteOutcome>> {
        let Some(route) = INDEX_ROUTES.resolve(remainder) else {
            return Ok(None);
        };

        let outcome = match route {
            IndexRoute::PostByTag { tag: None } => RouteOutcome::Redirect(index.url_path),
            IndexRoute::PostByTag { tag: Some(slug) } => {
                let tag = TaxonomyService::find_tag_by_slug(db, &slug).await?
                    .ok_or_else(|| not_found("TAG_NOT_FOUND", &format!("No tag with slug '{}'", slug)))?;
                RouteOutcome::Render(Self::listing(db, index, Some(tag)).await?)
            }
        };
        Ok(Some(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    fn ids(rows: &[(page::Model, post::Model)]) -> Vec<i64> {
        let mut ids: Vec<i64> = rows.iter().map(|(p, _)| p.id).collect();
        ids.sort();
        ids
    }

    #[test]
    fn route_table_matches_both_tag_routes() {
        assert_eq!(INDEX_ROUTES.resolve("tags/"), Some(IndexRoute::PostByTag { tag: None }));
        assert_eq!(
            INDEX_ROUTES.resolve("tags/web-dev_2/"),
            Some(IndexRoute::PostByTag { tag: Some("web-dev_2".into()) })
        );
        assert_eq!(INDEX_ROUTES.resolve("tags"), None);
        assert_eq!(INDEX_ROUTES.resolve("tags/a b/"), None);
    }

    #[tokio::test]
    async fn get_posts_returns_only_live_descendants() {
        let db = test_support::setup_db().await;
        let blog = test_support::create_index(&db, "Blog").await;
        let other = test_support::create_index(&db, "News").await;

        let a = test_support::create_post(&db, &blog, "A", &[]).await;
        let b = test_support::create_post(&db, &blog, "B", &[]).await;
        PageService::unpublish(&db, b.public_id).await.unwrap();
        test_support::create_post(&db, &other, "Elsewhere", &[]).await;

        let posts = IndexService::get_posts(&db, &blog, None).await.unwrap();
        assert_eq!(ids(&posts), vec![a.id]);
    }

    #[tokio::test]
    async fn get_posts_with_tag_returns_exactly_the_tagged_posts() {
        let db = test_support::setup_db().await;
        let blog = test_support::create_index(&db, "Blog").await;

        let a = test_support::create_post(&db, &blog, "A", &["rust"]).await;
        let b = test_support::create_post(&db, &blog, "B", &["rust", "web"]).await;
        test_support::create_post(&db, &blog, "C", &["web"]).await;
        let hidden = test_support::create_post(&db, &blog, "D", &["rust"]).await;
        PageService::unpublish(&db, hidden.public_id).await.unwrap();

        let rust = TaxonomyService::find_tag_by_slug(&db, "rust").await.unwrap().unwrap();
        let posts = IndexService::get_posts(&db, &blog, Some(&rust)).await.unwrap();
        assert_eq!(ids(&posts), {
            let mut v = vec![a.id, b.id];
            v.sort();
            v
        });
    }

    #[tokio::test]
    async fn listing_orders_newest_first() {
        let db = test_support::setup_db().await;
        let blog = test_support::create_index(&db, "Blog").await;

        let older = test_support::create_post(&db, &blog, "Older", &[]).await;
        let newer = test_support::create_post(&db, &blog, "Newer", &[]).await;

        let listing = IndexService::listing(&db, blog, None).await.unwrap();
        let titles: Vec<_> = listing.posts.iter().map(|p| p.id).collect();
        assert_eq!(titles, vec![newer.public_id, older.public_id]);
        assert!(listing.tag.is_none());
    }

    #[tokio::test]
    async fn bare_tags_route_redirects_to_the_index() {
        let db = test_support::setup_db().await;
        let blog = test_support::create_index(&db, "Blog").await;

        match IndexService::serve_route(&db, blog, "tags/").await.unwrap() {
            Some(RouteOutcome::Redirect(to)) => assert_eq!(to, "/blog/"),
            other => panic!("expected redirect, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unknown_tag_slug_is_not_found() {
        let db = test_support::setup_db().await;
        let blog = test_support::create_index(&db, "Blog").await;
        test_support::create_post(&db, &blog, "A", &["rust"]).await;

        let err = IndexService::serve_route(&db, blog.clone(), "tags/nonexistent-slug/").await.unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
        assert_eq!(err.1, "TAG_NOT_FOUND");

        assert!(IndexService::serve_route(&db, blog, "hello/").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn tag_route_renders_the_filtered_listing() {
        let db = test_support::setup_db().await;
        let blog = test_support::create_index(&db, "Blog").await;
        let tagged = test_support::create_post(&db, &blog, "Tagged", &["rust"]).await;
        test_support::create_post(&db, &blog, "Plain", &[]).await;

        match IndexService::serve_route(&db, blog, "tags/rust/").await.unwrap() {
            Some(RouteOutcome::Render(listing)) => {
                assert_eq!(listing.tag.map(|t| t.slug), Some("rust".to_string()));
                assert_eq!(listing.posts.len(), 1);
                assert_eq!(listing.posts[0].id, tagged.public_id);
            }
            other => panic!("expected listing, got {:?}", other),
        }
    }
}
