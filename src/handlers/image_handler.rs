use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::config::AppState;
use crate::models::image_model::{CreateImageRequest, ImageFilterParams};
use crate::services::image_service::ImageService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn create_image_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateImageRequest>,
) -> impl IntoResponse {
    match ImageService::create_image(&state.db, payload).await {
        Ok(image) => ResponseBuilder::created("IMAGE_CREATED", "Image registered", image).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn delete_image_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match ImageService::delete_image(&state.db, id).await {
        Ok(_) => ResponseBuilder::success::<()>("IMAGE_DELETED", "Image deleted", ()).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn list_images_handler(
    State(state): State<AppState>,
    Query(params): Query<ImageFilterParams>,
) -> impl IntoResponse {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(10);

    match ImageService::list_images(&state.db, page, limit).await {
        Ok(res) => ResponseBuilder::success("IMAGES_FETCHED", "Success", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}
