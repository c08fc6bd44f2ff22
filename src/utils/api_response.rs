use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::Serialize;

/// Error triple returned by every service: HTTP status, machine code, message.
pub type ServiceError = (StatusCode, &'static str, String);
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Maps a database error to a 500 with the given code, logging the cause.
pub fn db_error(code: &'static str, context: &'static str) -> impl FnOnce(DbErr) -> ServiceError {
    move |e| {
        tracing::error!(code, "{}: {}", context, e);
        (StatusCode::INTERNAL_SERVER_ERROR, code, context.to_string())
    }
}

pub fn not_found(code: &'static str, message: &str) -> ServiceError {
    (StatusCode::NOT_FOUND, code, message.to_string())
}

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Serialize)]
pub struct ValidationErrorDetail {
    pub field: String,
    pub title: String,   // validator code, e.g. "length", "is_required"
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn new(status: &str, code: &str, message: &str, data: Option<T>) -> Self {
        Self {
            status: status.to_string(),
            code: code.to_string(),
            message: message.to_string(),
            data,
        }
    }
}

pub struct ApiResponseResult<T>(pub StatusCode, pub ApiResponse<T>);

impl<T> IntoResponse for ApiResponseResult<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        (self.0, Json(self.1)).into_response()
    }
}

pub struct ResponseBuilder;

impl ResponseBuilder {
    pub fn success<T: Serialize>(code: &str, message: &str, data: T) -> ApiResponseResult<T> {
        ApiResponseResult(
            StatusCode::OK,
            ApiResponse::new("success", code, message, Some(data)),
        )
    }

    pub fn created<T: Serialize>(code: &str, message: &str, data: T) -> ApiResponseResult<T> {
        ApiResponseResult(
            StatusCode::CREATED,
            ApiResponse::new("success", code, message, Some(data)),
        )
    }

    pub fn error<T: Serialize>(status_code: StatusCode, code: &str, message: &str) -> ApiResponseResult<T> {
        ApiResponseResult(
            status_code,
            ApiResponse::new("error", code, message, None),
        )
    }

    pub fn fail_with_data<T: Serialize>(
        status_code: StatusCode,
        code: &str,
        message: &str,
        data: T,
    ) -> ApiResponseResult<T> {
        ApiResponseResult(
            status_code,
            ApiResponse::new("error", code, message, Some(data)),
        )
    }

    pub fn from_error(err: ServiceError) -> Response {
        let (status, code, msg) = err;
        Self::error::<()>(status, code, &msg).into_response()
    }

    /// Plain `302 Found`, the status a page redirect answers with.
    pub fn found(location: &str) -> Response {
        (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
    }
}
