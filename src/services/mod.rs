pub mod admin_schema_service;
pub mod image_service;
pub mod index_service;
pub mod page_service;
pub mod post_service;
pub mod search_service;
pub mod site_service;
pub mod taxonomy_service;
