use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::config::AppState;
use crate::models::taxonomy_model::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::services::taxonomy_service::TaxonomyService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn list_tags_handler(
    State(state): State<AppState>,
) -> impl IntoResponse {
    match TaxonomyService::list_tags(&state.db).await {
        Ok(res) => ResponseBuilder::success("TAGS_FETCHED", "Success", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn list_categories_handler(
    State(state): State<AppState>,
) -> impl IntoResponse {
    match TaxonomyService::list_categories(&state.db).await {
        Ok(res) => ResponseBuilder::success("CATEGORIES_FETCHED", "Success", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn create_category_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCategoryRequest>,
) -> impl IntoResponse {
    match TaxonomyService::create_category(&state.db, payload).await {
        Ok(res) => ResponseBuilder::created("CATEGORY_CREATED", "Category created", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn update_category_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateCategoryRequest>,
) -> impl IntoResponse {
    match TaxonomyService::update_category(&state.db, id, payload).await {
        Ok(res) => ResponseBuilder::success("CATEGORY_UPDATED", "Category updated", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn delete_category_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match TaxonomyService::delete_category(&state.db, id).await {
        Ok(_) => ResponseBuilder::success::<()>("CATEGORY_DELETED", "Category deleted", ()).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}
