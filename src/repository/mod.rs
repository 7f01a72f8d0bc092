use chrono::NaiveDateTime;
use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::{
    category::{Category, CategoryListQuery, NewCategory, UpdateCategory},
    image::{Image, NewImage},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
    profile::{NewProfile, Profile},
    review::{NewReview, Review},
    sale_item::{NewSaleItem, SaleItem, SaleItemListQuery},
    specification::{NewSpecification, Specification},
    tag::{Tag, TagListQuery},
};

pub mod category;
pub mod product;
pub mod profile;
pub mod review;
pub mod sale_item;
pub mod tag;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over catalog categories.
pub trait CategoryReader {
    fn get_category_by_id(&self, category_id: i32) -> RepositoryResult<Option<Category>>;
    fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>>;
    /// Identifiers of the tags collected by the category.
    fn list_category_tag_ids(&self, category_id: i32) -> RepositoryResult<Vec<i32>>;
}

/// Write operations over catalog categories.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(
        &self,
        category_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category>;
    fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
    /// Add a tag to the category tag set.
    ///
    /// Returns `false` when the tag was already collected.
    fn add_category_tag(&self, category_id: i32, tag_id: i32) -> RepositoryResult<bool>;
    /// Create or replace the image of a category.
    fn set_category_image(&self, image: &NewImage) -> RepositoryResult<Image>;
}

/// Read-only operations over tags.
pub trait TagReader {
    fn list_tags(&self, query: TagListQuery) -> RepositoryResult<Vec<Tag>>;
}

/// Write operations over tags.
pub trait TagWriter {
    /// Return the tags named `names`, creating the missing ones.
    fn ensure_tags(&self, names: &[String]) -> RepositoryResult<Vec<Tag>>;
}

/// Read-only operations over products and their aggregates.
pub trait ProductReader {
    fn get_product_by_id(&self, product_id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    /// Products with the most reviews first, newest products filling the rest.
    fn list_popular_products(&self, limit: usize) -> RepositoryResult<Vec<Product>>;
    /// `COUNT(*)` of the product reviews.
    fn count_reviews(&self, product_id: i32) -> RepositoryResult<usize>;
    /// `AVG(rate)` of the product reviews, `None` without reviews.
    fn average_rate(&self, product_id: i32) -> RepositoryResult<Option<f64>>;
    fn list_specifications(&self, product_id: i32) -> RepositoryResult<Vec<Specification>>;
}

/// Write operations over products and their owned rows.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(
        &self,
        product_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    /// Replace the tag associations of a product and return the attached tags.
    fn replace_product_tags(&self, product_id: i32, tag_ids: &[i32]) -> RepositoryResult<Vec<Tag>>;
    /// Replace the images of a product and return the stored ones.
    fn replace_product_images(
        &self,
        product_id: i32,
        images: &[NewImage],
    ) -> RepositoryResult<Vec<Image>>;
    fn replace_specifications(
        &self,
        product_id: i32,
        specifications: &[NewSpecification],
    ) -> RepositoryResult<Vec<Specification>>;
}

/// Read-only operations over product reviews.
pub trait ReviewReader {
    fn list_reviews(&self, product_id: i32) -> RepositoryResult<Vec<Review>>;
}

/// Write operations over product reviews.
pub trait ReviewWriter {
    fn create_review(&self, new_review: &NewReview) -> RepositoryResult<Review>;
    /// Delete a review and return the removed row.
    fn delete_review(&self, review_id: i32) -> RepositoryResult<Review>;
}

/// Read-only operations over sales.
pub trait SaleItemReader {
    fn get_sale_item_by_product(&self, product_id: i32) -> RepositoryResult<Option<SaleItem>>;
    fn list_sale_items(
        &self,
        query: SaleItemListQuery,
    ) -> RepositoryResult<(usize, Vec<SaleItem>)>;
}

/// Write operations over sales.
pub trait SaleItemWriter {
    /// Create the sale of a product or replace the existing one.
    fn save_sale_item(&self, sale: &NewSaleItem) -> RepositoryResult<SaleItem>;
    /// Soft-delete every active sale that ended at or before `now`.
    fn expire_sale_items(&self, now: NaiveDateTime) -> RepositoryResult<usize>;
}

/// Read-only operations over customer profiles.
pub trait ProfileReader {
    fn get_profile_by_subject(&self, subject: &str) -> RepositoryResult<Option<Profile>>;
    fn get_profile_by_phone(&self, phone: &str) -> RepositoryResult<Option<Profile>>;
}

/// Write operations over customer profiles.
pub trait ProfileWriter {
    /// Create the profile of a user or replace the existing one.
    fn save_profile(&self, profile: &NewProfile) -> RepositoryResult<Profile>;
    /// Create or replace the avatar of a profile.
    fn set_avatar(&self, avatar: &NewImage) -> RepositoryResult<Image>;
}
