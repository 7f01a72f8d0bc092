use chrono::{NaiveDateTime, Utc};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::domain::image::Image;
use crate::domain::tag::Tag;

/// Products priced above this amount ship for free.
pub const FREE_DELIVERY_THRESHOLD: f64 = 2000.0;

/// Domain representation of a product listed in the catalog.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Identifier of the category the product belongs to.
    pub category_id: i32,
    /// Non-negative unit price.
    pub price: f64,
    /// Units left in stock.
    pub count: i32,
    /// Product title.
    pub title: String,
    /// One-line description shown in listings.
    pub short_description: String,
    /// Full description shown on the product page.
    pub description: String,
    /// Tags attached to the product.
    pub tags: Vec<Tag>,
    /// Preview images in upload order.
    pub images: Vec<Image>,
    /// Timestamp for when the product was added to the catalog.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Whether the product qualifies for free delivery.
    pub fn free_delivery(&self) -> bool {
        self.price > FREE_DELIVERY_THRESHOLD
    }

    /// Identifiers of the attached tags.
    pub fn tag_ids(&self) -> Vec<i32> {
        self.tags.iter().map(|tag| tag.id).collect()
    }
}

/// Payload required to insert a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub category_id: i32,
    pub price: f64,
    pub count: i32,
    pub title: String,
    pub short_description: String,
    pub description: String,
    /// Timestamp captured when the product payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    /// Build a new product payload with empty descriptions and the current timestamp.
    pub fn new(category_id: i32, title: impl Into<String>, price: f64, count: i32) -> Self {
        Self {
            category_id,
            price,
            count,
            title: title.into(),
            short_description: String::new(),
            description: String::new(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    /// Attach the one-line description used in listings.
    pub fn with_short_description(mut self, short_description: impl Into<String>) -> Self {
        self.short_description = short_description.into();
        self
    }

    /// Attach the full description used on the product page.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Full replacement of the editable product columns.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub category_id: i32,
    pub price: f64,
    pub count: i32,
    pub title: String,
    pub short_description: String,
    pub description: String,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl From<NewProduct> for UpdateProduct {
    fn from(value: NewProduct) -> Self {
        Self {
            category_id: value.category_id,
            price: value.price,
            count: value.count,
            title: value.title,
            short_description: value.short_description,
            description: value.description,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

/// Column used to order catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    #[default]
    Date,
    Price,
    Title,
}

/// Direction applied to [`ProductSort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Inc,
    #[default]
    Dec,
}

/// Query definition used to list catalog products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Restrict the results to explicit product identifiers.
    pub ids: Option<Vec<i32>>,
    /// Restrict the results to any of these categories.
    pub category_ids: Option<Vec<i32>>,
    /// Only return products carrying at least one of these tags.
    pub tag_ids: Option<Vec<i32>>,
    /// Optional substring search applied to the title.
    pub search: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
    /// Only return products that ship for free.
    pub free_delivery_only: bool,
    /// Only return products that are in stock.
    pub available_only: bool,
    /// Inclusive upper bound of the stock count.
    pub max_count: Option<i32>,
    /// Ordering applied to the results.
    pub sort: ProductSort,
    /// Direction of the ordering.
    pub direction: SortDirection,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    /// Construct a query that targets the whole catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the results to explicit product identifiers.
    pub fn ids(mut self, ids: Vec<i32>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Restrict the results to the given categories.
    pub fn categories(mut self, category_ids: Vec<i32>) -> Self {
        self.category_ids = Some(category_ids);
        self
    }

    /// Only return products carrying at least one of `tag_ids`.
    pub fn tags(mut self, tag_ids: Vec<i32>) -> Self {
        self.tag_ids = Some(tag_ids);
        self
    }

    /// Filter the results by a search term applied to the title.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Restrict the results to an inclusive price range.
    pub fn price_between(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Only return products priced above [`FREE_DELIVERY_THRESHOLD`].
    pub fn free_delivery_only(mut self) -> Self {
        self.free_delivery_only = true;
        self
    }

    /// Only return products with a positive stock count.
    pub fn available_only(mut self) -> Self {
        self.available_only = true;
        self
    }

    /// Only return products with at most `count` items left.
    pub fn stock_at_most(mut self, count: i32) -> Self {
        self.max_count = Some(count);
        self
    }

    /// Order the results.
    pub fn sort(mut self, sort: ProductSort, direction: SortDirection) -> Self {
        self.sort = sort;
        self.direction = direction;
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
