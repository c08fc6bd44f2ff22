use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::image;
use crate::utils::validator_utils::validate_required;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ImageResponse {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub alt_text: Option<String>,
}

impl From<image::Model> for ImageResponse {
    fn from(m: image::Model) -> Self {
        Self {
            id: m.public_id,
            title: m.title,
            url: m.url,
            alt_text: m.alt_text,
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct CreateImageRequest {
    #[validate(custom(function = "validate_required"), length(max = 255))]
    pub title: String,
    #[validate(url(message = "Must be a valid URL"))]
    pub url: String,
    #[validate(length(max = 255))]
    pub alt_text: Option<String>,
}

#[derive(Serialize)]
pub struct ImageListResponse {
    pub data: Vec<ImageResponse>,
    pub meta: PaginationMeta,
}

#[derive(Serialize)]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

#[derive(Deserialize)]
pub struct ImageFilterParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}
