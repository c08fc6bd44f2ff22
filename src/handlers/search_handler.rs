use axum::{extract::State, response::IntoResponse};

use crate::config::AppState;
use crate::models::page_model::SearchParams;
use crate::services::search_service::SearchService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedQuery;

pub async fn search_handler(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<SearchParams>,
) -> impl IntoResponse {
    match SearchService::search_posts(&state.db, &params.q).await {
        Ok(res) => ResponseBuilder::success("SEARCH_RESULTS", "Success", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}
