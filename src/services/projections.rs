//! JSON views of catalog entities.
//!
//! Views are built from already loaded domain values; the aggregates they
//! carry (review count, rating) are computed by the calling service.

use chrono::{NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

use crate::domain::{
    category::Category, image::Image, product::Product, profile::Profile, review::Review,
    sale_item::SaleItem, specification::Specification, tag::Tag,
};

/// Format used for every timestamp exposed by the API.
pub const DATE_FORMAT: &str = "%a %b %Y %H:%M:%S %Z%z";

/// Render a naive UTC timestamp, e.g. `Mon Jan 2024 10:00:00 UTC+0000`.
pub fn format_date(value: NaiveDateTime) -> String {
    Utc.from_utc_datetime(&value).format(DATE_FORMAT).to_string()
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImageView {
    pub src: String,
    pub alt: String,
}

impl From<&Image> for ImageView {
    fn from(image: &Image) -> Self {
        Self {
            src: image.src(),
            alt: image.alt.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TagView {
    pub id: i32,
    pub name: String,
}

impl From<&Tag> for TagView {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReviewView {
    pub author: String,
    pub email: String,
    pub text: String,
    pub rate: i32,
    pub date: String,
}

impl From<&Review> for ReviewView {
    fn from(review: &Review) -> Self {
        Self {
            author: review.author.clone(),
            email: review.email.clone(),
            text: review.text.clone(),
            rate: review.rate,
            date: format_date(review.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SpecificationView {
    pub name: String,
    pub value: String,
}

impl From<&Specification> for SpecificationView {
    fn from(specification: &Specification) -> Self {
        Self {
            name: specification.name.clone(),
            value: specification.value.clone(),
        }
    }
}

/// Catalog card of a product.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductShortView {
    pub id: i32,
    pub category: i32,
    pub price: f64,
    pub count: i32,
    pub date: String,
    pub title: String,
    pub description: String,
    pub free_delivery: bool,
    pub images: Vec<ImageView>,
    pub tags: Vec<TagView>,
    /// Number of reviews.
    pub reviews: usize,
    pub rating: f64,
}

impl ProductShortView {
    pub fn from_parts(product: &Product, review_count: usize, rating: f64) -> Self {
        Self {
            id: product.id,
            category: product.category_id,
            price: product.price,
            count: product.count,
            date: format_date(product.created_at),
            title: product.title.clone(),
            description: product.short_description.clone(),
            free_delivery: product.free_delivery(),
            images: product.images.iter().map(ImageView::from).collect(),
            tags: product.tags.iter().map(TagView::from).collect(),
            reviews: review_count,
            rating,
        }
    }
}

/// Product page payload.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductFullView {
    pub id: i32,
    pub category: i32,
    pub price: f64,
    pub count: i32,
    pub date: String,
    pub title: String,
    pub description: String,
    pub full_description: String,
    pub free_delivery: bool,
    pub images: Vec<ImageView>,
    pub tags: Vec<TagView>,
    pub reviews: Vec<ReviewView>,
    pub specifications: Vec<SpecificationView>,
    pub rating: f64,
}

impl ProductFullView {
    pub fn from_parts(
        product: &Product,
        reviews: &[Review],
        specifications: &[Specification],
        rating: f64,
    ) -> Self {
        Self {
            id: product.id,
            category: product.category_id,
            price: product.price,
            count: product.count,
            date: format_date(product.created_at),
            title: product.title.clone(),
            description: product.short_description.clone(),
            full_description: product.description.clone(),
            free_delivery: product.free_delivery(),
            images: product.images.iter().map(ImageView::from).collect(),
            tags: product.tags.iter().map(TagView::from).collect(),
            reviews: reviews.iter().map(ReviewView::from).collect(),
            specifications: specifications.iter().map(SpecificationView::from).collect(),
            rating,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemView {
    pub id: i32,
    pub product_id: i32,
    pub title: String,
    pub price: f64,
    pub sale_price: f64,
    pub discount: i32,
    pub date_from: String,
    pub date_to: String,
    pub images: Vec<ImageView>,
}

impl SaleItemView {
    /// Falls back to a zero discount when the product price is not positive.
    pub fn from_parts(sale: &SaleItem, product: &Product) -> Self {
        let discount = match sale.discount(product.price) {
            Ok(discount) => discount,
            Err(err) => {
                log::warn!("Sale {} of product {}: {err}", sale.id, product.id);
                0
            }
        };

        Self {
            id: sale.id,
            product_id: product.id,
            title: product.title.clone(),
            price: product.price,
            sale_price: sale.sale_price,
            discount,
            date_from: format_date(sale.date_from),
            date_to: format_date(sale.date_to),
            images: product.images.iter().map(ImageView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubcategoryView {
    pub id: i32,
    pub title: String,
    pub image: Option<ImageView>,
}

impl From<&Category> for SubcategoryView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            title: category.title.clone(),
            image: category.image.as_ref().map(ImageView::from),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryView {
    pub id: i32,
    pub title: String,
    pub image: Option<ImageView>,
    pub subcategories: Vec<SubcategoryView>,
}

impl CategoryView {
    pub fn from_parts(category: &Category, children: &[Category]) -> Self {
        Self {
            id: category.id,
            title: category.title.clone(),
            image: category.image.as_ref().map(ImageView::from),
            subcategories: children.iter().map(SubcategoryView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub avatar: Option<ImageView>,
}

impl From<&Profile> for ProfileView {
    fn from(profile: &Profile) -> Self {
        Self {
            full_name: profile.full_name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            avatar: profile.avatar.as_ref().map(ImageView::from),
        }
    }
}

/// One page of a listing as consumed by the storefront.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageView<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub last_page: usize,
}

impl<T> PageView<T> {
    /// `last_page` is at least 1 so an empty listing still has a page.
    pub fn new(items: Vec<T>, current_page: usize, total: usize, per_page: usize) -> Self {
        let last_page = total.div_ceil(per_page.max(1)).max(1);
        Self {
            items,
            current_page,
            last_page,
        }
    }
}
