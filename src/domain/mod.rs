pub mod category;
pub mod image;
pub mod product;
pub mod profile;
pub mod rating;
pub mod review;
pub mod sale_item;
pub mod specification;
pub mod tag;
