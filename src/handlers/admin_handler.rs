use axum::{extract::Path, http::StatusCode, response::IntoResponse};

use crate::services::admin_schema_service::AdminSchemaService;
use crate::utils::api_response::ResponseBuilder;

pub async fn list_schemas_handler() -> impl IntoResponse {
    ResponseBuilder::success("SCHEMAS_FETCHED", "Success", AdminSchemaService::schemas())
}

pub async fn get_schema_handler(Path(model): Path<String>) -> impl IntoResponse {
    match AdminSchemaService::schema(&model) {
        Some(schema) => ResponseBuilder::success("SCHEMA_FETCHED", "Success", schema).into_response(),
        None => ResponseBuilder::error::<()>(StatusCode::NOT_FOUND, "MODEL_NOT_FOUND", "Unknown model").into_response(),
    }
}
