pub mod category;
pub mod image;
pub mod product;
pub mod product_tag;
pub mod profile;
pub mod review;
pub mod sale_item;
pub mod specification;
pub mod tag;
