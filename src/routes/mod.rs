use crate::config::AppState;
use crate::handlers::{health_check_handler, page_handler::serve_page_handler, search_handler::search_handler};
use crate::middleware::rate_limiter::rate_limit_middleware;
use axum::http::Method;
use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

pub mod admin_route;
pub mod blog_route;
pub mod image_route;
pub mod taxonomy_route;

pub fn create_routes(state: AppState) -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_origin(Any)
        .allow_headers(Any);

    let api = Router::new()
        .nest("/pages", blog_route::page_routes())
        .nest("/indexes", blog_route::index_routes())
        .nest("/posts", blog_route::post_routes())
        .nest("/tags", taxonomy_route::tag_routes())
        .nest("/categories", taxonomy_route::category_routes())
        .nest("/images", image_route::image_routes())
        .nest("/admin", admin_route::admin_routes())
        .route("/search", get(search_handler))
        .route("/health", get(health_check_handler))
        .layer(middleware::from_fn_with_state(state, rate_limit_middleware));

    Router::new()
        .nest("/api", api)
        // Everything else is the public page tree
        .route("/", get(serve_page_handler))
        .route("/{*path}", get(serve_page_handler))
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::test_support;

    fn test_config() -> Config {
        Config {
            server_host: "127.0.0.1".into(),
            server_port: 0,
            database_url: "sqlite::memory:".into(),
            auto_migrate: true,
            rate_limit_max: 1000,
            rate_limit_window: Duration::from_secs(60),
        }
    }

    async fn app() -> (Router, sea_orm::DatabaseConnection) {
        let db = test_support::setup_db().await;
        let state = AppState::new(db.clone(), &test_config());
        (create_routes(state.clone()).with_state(state), db)
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let headers = res.headers().clone();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, headers, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn bare_tags_path_redirects_302_to_the_index() {
        let (app, db) = app().await;
        test_support::create_index(&db, "Blog").await;

        let (status, headers, _) = send(&app, get("/blog/tags/")).await;
        assert_eq!(status, StatusCode::FOUND);
        assert_eq!(headers[header::LOCATION], "/blog/");
    }

    #[tokio::test]
    async fn tag_path_renders_filtered_listing_and_unknown_slug_is_404() {
        let (app, db) = app().await;
        let blog = test_support::create_index(&db, "Blog").await;
        test_support::create_post(&db, &blog, "Ferris", &["rust"]).await;
        test_support::create_post(&db, &blog, "Gophers", &["go"]).await;

        let (status, _, body) = send(&app, get("/blog/tags/rust/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["kind"], "listing");
        assert_eq!(body["data"]["tag"]["slug"], "rust");
        assert_eq!(body["data"]["posts"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["posts"][0]["title"], "Ferris");

        let (status, _, body) = send(&app, get("/blog/tags/nonexistent-slug/")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "TAG_NOT_FOUND");
    }

    #[tokio::test]
    async fn post_lifecycle_through_the_api() {
        let (app, db) = app().await;
        let blog = test_support::create_index(&db, "Blog").await;

        let (status, _, body) = send(&app, post_json("/api/images", json!({
            "title": "Sunset",
            "url": "https://cdn.example.com/sunset.webp"
        }))).await;
        assert_eq!(status, StatusCode::CREATED);
        let image_id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, _, body) = send(&app, post_json("/api/posts", json!({
            "parent": blog.public_id,
            "title": "First light",
            "date": "2024-03-01",
            "intro": "Morning photos",
            "body": "<p>hello</p>",
            "tags": ["photos"],
            "gallery": [{ "image": image_id, "caption": "sunrise" }],
            "publish": true
        }))).await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        assert_eq!(body["data"]["url"], "/blog/first-light/");
        assert_eq!(body["data"]["main_image"]["id"], image_id.as_str());
        let post_id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, _, body) = send(&app, get("/blog/first-light/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["kind"], "post");

        let (status, _, body) = send(&app, get("/blog/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["posts"][0]["main_image"]["id"], image_id.as_str());

        let (status, _, _) = send(&app, post_json(&format!("/api/pages/{}/unpublish", post_id), json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _, _) = send(&app, get("/blog/first-light/")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let req = Request::builder()
            .method("DELETE")
            .uri(format!("/api/posts/{}", post_id))
            .body(Body::empty())
            .unwrap();
        let (status, _, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _, _) = send(&app, get(&format!("/api/posts/{}", post_id))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn overlong_intro_is_a_validation_error() {
        let (app, db) = app().await;
        let blog = test_support::create_index(&db, "Blog").await;

        let (status, _, body) = send(&app, post_json("/api/posts", json!({
            "parent": blog.public_id,
            "title": "Too long",
            "date": "2024-03-01",
            "intro": "x".repeat(256),
        }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["data"][0]["field"], "intro");
    }

    #[tokio::test]
    async fn search_requires_a_query_and_schema_lookup_works() {
        let (app, _db) = app().await;

        let (status, _, body) = send(&app, get("/api/search?q=")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (status, _, body) = send(&app, get("/api/admin/schema/category")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["verbose_name_plural"], "categories");

        let (status, _, _) = send(&app, get("/api/admin/schema/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_paths_are_404_and_missing_slash_is_301() {
        let (app, _db) = app().await;

        let (status, _, body) = send(&app, get("/nowhere/")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "PAGE_NOT_FOUND");

        let (status, headers, _) = send(&app, get("/nowhere")).await;
        assert_eq!(status, StatusCode::MOVED_PERMANENTLY);
        assert_eq!(headers[header::LOCATION], "/nowhere/");
    }
}
