pub mod admin_model;
pub mod image_model;
pub mod page_model;
pub mod taxonomy_model;
