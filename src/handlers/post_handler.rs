use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::config::AppState;
use crate::models::page_model::*;
use crate::services::post_service::PostService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn create_post_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreatePostRequest>,
) -> impl IntoResponse {
    match PostService::create_post(&state.db, payload).await {
        Ok(res) => ResponseBuilder::created("POST_CREATED", "Post created", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn get_post_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match PostService::get_post(&state.db, id).await {
        Ok(res) => ResponseBuilder::success("POST_FETCHED", "Success", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn update_post_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdatePostRequest>,
) -> impl IntoResponse {
    match PostService::update_post(&state.db, id, payload).await {
        Ok(res) => ResponseBuilder::success("POST_UPDATED", "Post updated", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn delete_post_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match PostService::delete_post(&state.db, id).await {
        Ok(_) => ResponseBuilder::success::<()>("POST_DELETED", "Post deleted", ()).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn main_image_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match PostService::main_image_of(&state.db, id).await {
        Ok(image) => ResponseBuilder::success("MAIN_IMAGE_FETCHED", "Success", image).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}
