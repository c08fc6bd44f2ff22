use axum::{routing::get, Router};
use crate::config::AppState;
use crate::handlers::admin_handler::*;

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/schema", get(list_schemas_handler))
        .route("/schema/{model}", get(get_schema_handler))
}
