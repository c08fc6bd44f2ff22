use axum::{
    extract::{Path, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::config::AppState;
use crate::models::page_model::PageResponse;
use crate::services::page_service::PageService;
use crate::services::site_service::{SiteResponse, SiteService};
use crate::utils::api_response::ResponseBuilder;

/// Public site entry point: every GET outside `/api` lands here.
pub async fn serve_page_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Response {
    match SiteService::serve(&state.db, uri.path()).await {
        Ok(SiteResponse::Page(page)) => ResponseBuilder::success("PAGE_RENDERED", "Success", page).into_response(),
        Ok(SiteResponse::Redirect(to)) => ResponseBuilder::found(&to),
        Ok(SiteResponse::AppendSlash(to)) => {
            (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, to)]).into_response()
        }
        Err(err) => ResponseBuilder::from_error(err),
    }
}

pub async fn publish_page_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match PageService::publish(&state.db, id).await {
        Ok(page) => ResponseBuilder::success("PAGE_PUBLISHED", "Page published", PageResponse::from(page)).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn unpublish_page_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match PageService::unpublish(&state.db, id).await {
        Ok(page) => ResponseBuilder::success("PAGE_UNPUBLISHED", "Page unpublished", PageResponse::from(page)).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn delete_page_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match PageService::delete(&state.db, id).await {
        Ok(removed) => ResponseBuilder::success("PAGE_DELETED", "Page deleted", serde_json::json!({ "removed": removed })).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}
