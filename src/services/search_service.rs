use sea_orm::sea_query::LikeExpr;
use sea_orm::*;

use crate::entities::page::{self, PageType};
use crate::entities::post;
use crate::models::page_model::PostSummary;
use crate::services::post_service::PostService;
use crate::utils::api_response::{db_error, ServiceResult};

/// Fields of a post that the search endpoint looks at.
pub const POST_SEARCH_FIELDS: &[&str] = &["title", "intro", "body"];

const LIKE_ESCAPE: char = '!';

/// `%q%` with LIKE wildcards in `q` escaped by [`LIKE_ESCAPE`].
fn contains_pattern(q: &str) -> String {
    let mut pattern = String::with_capacity(q.len() + 2);
    pattern.push('%');
    for c in q.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub struct SearchService;

impl SearchService {
    pub async fn search_posts(db: &DatabaseConnection, q: &str) -> ServiceResult<Vec<PostSummary>> {
        let q = q.trim();
        let pattern = contains_pattern(q);
        let like = || LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE);
        let rows = page::Entity::find()
            .filter(page::Column::PageType.eq(PageType::Post))
            .filter(page::Column::Live.eq(true))
            .find_also_related(post::Entity)
            .filter(
                Condition::any()
                    .add(page::Column::Title.like(like()))
                    .add(post::Column::Intro.like(like()))
                    .add(post::Column::Body.like(like()))
            )
            .order_by_desc(page::Column::FirstPublishedAt)
            .all(db).await
            .map_err(db_error("DB_ERR", "Search failed"))?;

        let mut results = Vec::with_capacity(rows.len());
        for (page, post) in rows {
            let Some(post) = post else { continue };
            let main_image = PostService::main_image(db, &post).await?;
            results.push(PostSummary::new(page, post, main_image));
        }
        tracing::debug!(query = %q, hits = results.len(), "post search");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[tokio::test]
    async fn matches_title_intro_and_body_of_live_posts() {
        let db = test_support::setup_db().await;
        let blog = test_support::create_index(&db, "Blog").await;
        test_support::create_post(&db, &blog, "Borrow checker tips", &[]).await;
        test_support::create_post(&db, &blog, "Cooking", &[]).await;
        let hidden = test_support::create_post(&db, &blog, "Borrow drafts", &[]).await;
        crate::services::page_service::PageService::unpublish(&db, hidden.public_id).await.unwrap();

        let hits = SearchService::search_posts(&db, "Borrow").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Borrow checker tips");

        // test_support posts carry "Intro for <title>" as intro
        let hits = SearchService::search_posts(&db, "Intro for Cooking").await.unwrap();
        assert_eq!(hits.len(), 1);

        assert!(SearchService::search_posts(&db, "nothing like this").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn like_wildcards_in_the_query_match_literally() {
        let db = test_support::setup_db().await;
        let blog = test_support::create_index(&db, "Blog").await;
        test_support::create_post(&db, &blog, "100% safe Rust", &[]).await;
        test_support::create_post(&db, &blog, "snake_case names", &[]).await;
        test_support::create_post(&db, &blog, "Plain title", &[]).await;

        let hits = SearchService::search_posts(&db, "%").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "100% safe Rust");

        let hits = SearchService::search_posts(&db, "_").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "snake_case names");
    }

    #[test]
    fn pattern_escapes_wildcards_and_the_escape_char() {
        assert_eq!(contains_pattern("50%_a!b"), "%50!%!_a!!b%");
        assert_eq!(contains_pattern("plain"), "%plain%");
    }
}
