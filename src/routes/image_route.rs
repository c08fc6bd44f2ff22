use axum::{routing::{delete, get}, Router};
use crate::config::AppState;
use crate::handlers::image_handler::*;

pub fn image_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_images_handler).post(create_image_handler))
        .route("/{id}", delete(delete_image_handler))
}
