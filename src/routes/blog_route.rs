use axum::{routing::{get, post}, Router};
use crate::config::AppState;
use crate::handlers::{index_handler::*, page_handler::*, post_handler::*};

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", axum::routing::delete(delete_page_handler))
        .route("/{id}/publish", post(publish_page_handler))
        .route("/{id}/unpublish", post(unpublish_page_handler))
}

pub fn index_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_index_handler))
        .route("/{id}", get(get_index_handler).put(update_index_handler))
}

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_post_handler))
        .route("/{id}", get(get_post_handler).put(update_post_handler).delete(delete_post_handler))
        .route("/{id}/main-image", get(main_image_handler))
}
