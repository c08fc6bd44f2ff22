use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::config::AppState;
use crate::models::page_model::{CreateIndexRequest, UpdateIndexRequest};
use crate::services::index_service::IndexService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn create_index_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateIndexRequest>,
) -> impl IntoResponse {
    match IndexService::create_index(&state.db, payload).await {
        Ok(res) => ResponseBuilder::created("INDEX_CREATED", "Post index created", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn get_index_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match IndexService::get_index(&state.db, id).await {
        Ok(res) => ResponseBuilder::success("INDEX_FETCHED", "Success", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn update_index_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateIndexRequest>,
) -> impl IntoResponse {
    match IndexService::update_index(&state.db, id, payload).await {
        Ok(res) => ResponseBuilder::success("INDEX_UPDATED", "Post index updated", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}
