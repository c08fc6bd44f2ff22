pub mod category;
pub mod gallery_image;
pub mod image;
pub mod page;
pub mod post;
pub mod post_category;
pub mod post_index;
pub mod post_tag;
pub mod tag;
