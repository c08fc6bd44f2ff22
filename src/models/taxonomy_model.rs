use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::tag;
use crate::models::image_model::ImageResponse;
use crate::utils::validator_utils::validate_required;

#[derive(Serialize, Debug, Clone)]
pub struct TagResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<tag::Model> for TagResponse {
    fn from(t: tag::Model) -> Self {
        Self {
            id: t.public_id,
            name: t.name,
            slug: t.slug,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub icon: Option<ImageResponse>,
}

#[derive(Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(custom(function = "validate_required"), length(max = 255, message = "Name must be at most 255 chars"))]
    pub name: String,
    pub icon: Option<Uuid>,
}

#[derive(Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(custom(function = "validate_required"), length(max = 255, message = "Name must be at most 255 chars"))]
    pub name: Option<String>,
    /// `Some(None)` clears the icon.
    #[serde(default, deserialize_with = "double_option")]
    pub icon: Option<Option<Uuid>>,
}

fn double_option<'de, D>(de: D) -> Result<Option<Option<Uuid>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}
