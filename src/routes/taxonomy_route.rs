use axum::{routing::get, Router};
use crate::config::AppState;
use crate::handlers::taxonomy_handler::*;

pub fn tag_routes() -> Router<AppState> {
    Router::new().route("/", get(list_tags_handler))
}

pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories_handler).post(create_category_handler))
        .route("/{id}", axum::routing::put(update_category_handler).delete(delete_category_handler))
}
