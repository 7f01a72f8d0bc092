use chrono::NaiveDateTime;
use mockall::mock;

use super::{
    CategoryReader, CategoryWriter, ProductReader, ProductWriter, ProfileReader, ProfileWriter,
    ReviewReader, ReviewWriter, SaleItemReader, SaleItemWriter, TagReader, TagWriter,
};
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
use pushkind_common::repository::errors::RepositoryResult;

// Services take a single repository implementing several traits, so one mock
// carries all of them.
mock! {
    pub ShopRepository {}

    impl CategoryReader for ShopRepository {
        fn get_category_by_id(&self, category_id: i32) -> RepositoryResult<Option<Category>>;
        fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>>;
        fn list_category_tag_ids(&self, category_id: i32) -> RepositoryResult<Vec<i32>>;
    }

    impl CategoryWriter for ShopRepository {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(&self, category_id: i32, updates: &UpdateCategory) -> RepositoryResult<Category>;
        fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
        fn add_category_tag(&self, category_id: i32, tag_id: i32) -> RepositoryResult<bool>;
        fn set_category_image(&self, image: &NewImage) -> RepositoryResult<Image>;
    }

    impl TagReader for ShopRepository {
        fn list_tags(&self, query: TagListQuery) -> RepositoryResult<Vec<Tag>>;
    }

    impl TagWriter for ShopRepository {
        fn ensure_tags(&self, names: &[String]) -> RepositoryResult<Vec<Tag>>;
    }

    impl ProductReader for ShopRepository {
        fn get_product_by_id(&self, product_id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
        fn list_popular_products(&self, limit: usize) -> RepositoryResult<Vec<Product>>;
        fn count_reviews(&self, product_id: i32) -> RepositoryResult<usize>;
        fn average_rate(&self, product_id: i32) -> RepositoryResult<Option<f64>>;
        fn list_specifications(&self, product_id: i32) -> RepositoryResult<Vec<Specification>>;
    }

    impl ProductWriter for ShopRepository {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
        fn replace_product_tags(&self, product_id: i32, tag_ids: &[i32]) -> RepositoryResult<Vec<Tag>>;
        fn replace_product_images(
            &self,
            product_id: i32,
            images: &[NewImage],
        ) -> RepositoryResult<Vec<Image>>;
        fn replace_specifications(&self, product_id: i32, specifications: &[NewSpecification]) -> RepositoryResult<Vec<Specification>>;
    }

    impl ReviewReader for ShopRepository {
        fn list_reviews(&self, product_id: i32) -> RepositoryResult<Vec<Review>>;
    }

    impl ReviewWriter for ShopRepository {
        fn create_review(&self, new_review: &NewReview) -> RepositoryResult<Review>;
        fn delete_review(&self, review_id: i32) -> RepositoryResult<Review>;
    }

    impl SaleItemReader for ShopRepository {
        fn get_sale_item_by_product(&self, product_id: i32) -> RepositoryResult<Option<SaleItem>>;
        fn list_sale_items(&self, query: SaleItemListQuery) -> RepositoryResult<(usize, Vec<SaleItem>)>;
    }

    impl SaleItemWriter for ShopRepository {
        fn save_sale_item(&self, sale: &NewSaleItem) -> RepositoryResult<SaleItem>;
        fn expire_sale_items(&self, now: NaiveDateTime) -> RepositoryResult<usize>;
    }

    impl ProfileReader for ShopRepository {
        fn get_profile_by_subject(&self, subject: &str) -> RepositoryResult<Option<Profile>>;
        fn get_profile_by_phone(&self, phone: &str) -> RepositoryResult<Option<Profile>>;
    }

    impl ProfileWriter for ShopRepository {
        fn save_profile(&self, profile: &NewProfile) -> RepositoryResult<Profile>;
        fn set_avatar(&self, avatar: &NewImage) -> RepositoryResult<Image>;
    }
}
