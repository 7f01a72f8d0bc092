use chrono::{NaiveDateTime, Utc};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle states of a sale.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SaleState {
    /// The sale is shown in listings and applies its price.
    Active,
    /// The sale ended and has been soft-deleted. Terminal.
    Expired,
}

/// Errors raised while deriving the discount of a sale.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// The discount is a ratio against the product price and needs it positive.
    #[error("cannot compute a discount against non-positive price {price}")]
    NonPositivePrice { price: f64 },
}

/// Time-boxed reduced price for a single product.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SaleItem {
    /// Unique identifier of the sale.
    pub id: i32,
    /// Identifier of the discounted product.
    pub product_id: i32,
    /// Price applied while the sale is active.
    pub sale_price: f64,
    /// Start of the sale.
    pub date_from: NaiveDateTime,
    /// End of the sale.
    pub date_to: NaiveDateTime,
    /// Soft-delete flag set once the sale expired.
    pub is_deleted: bool,
    /// Timestamp for when the sale record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the sale record.
    pub updated_at: NaiveDateTime,
}

impl SaleItem {
    /// State of the sale at `now`.
    pub fn state_at(&self, now: NaiveDateTime) -> SaleState {
        sale_state(self.is_deleted, self.date_to, now)
    }

    /// Discount percentage relative to `product_price`.
    pub fn discount(&self, product_price: f64) -> Result<i32, DiscountError> {
        discount_percent(self.sale_price, product_price)
    }
}

/// Payload used to create or replace the sale of a product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSaleItem {
    pub product_id: i32,
    pub sale_price: f64,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
    pub is_deleted: bool,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewSaleItem {
    /// Build an active sale payload with the current timestamp.
    pub fn new(
        product_id: i32,
        sale_price: f64,
        date_from: NaiveDateTime,
        date_to: NaiveDateTime,
    ) -> Self {
        Self {
            product_id,
            sale_price,
            date_from,
            date_to,
            is_deleted: false,
            updated_at: Utc::now().naive_utc(),
        }
    }

    /// State the sale would be persisted in at `now`.
    pub fn state_at(&self, now: NaiveDateTime) -> SaleState {
        sale_state(self.is_deleted, self.date_to, now)
    }

    /// Soft-delete the sale when it already ended at `now`.
    ///
    /// Returns `true` when this call moved the sale from active to expired.
    pub fn expire_if_due(&mut self, now: NaiveDateTime) -> bool {
        if self.is_deleted || self.date_to > now {
            return false;
        }
        self.is_deleted = true;
        true
    }
}

fn sale_state(is_deleted: bool, date_to: NaiveDateTime, now: NaiveDateTime) -> SaleState {
    if is_deleted || date_to <= now {
        SaleState::Expired
    } else {
        SaleState::Active
    }
}

/// `100 - trunc(sale_price / price * 100)`.
pub fn discount_percent(sale_price: f64, price: f64) -> Result<i32, DiscountError> {
    if price <= 0.0 || price.is_nan() {
        return Err(DiscountError::NonPositivePrice { price });
    }
    let ratio = (sale_price / price * 100.0).trunc() as i32;
    Ok(100 - ratio)
}

/// Query definition used to list sales.
#[derive(Debug, Clone, Default)]
pub struct SaleItemListQuery {
    /// Whether soft-deleted sales should be included.
    pub include_deleted: bool,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl SaleItemListQuery {
    /// Construct a query that targets active sales.
    pub fn new() -> Self {
        Self::default()
    }

    /// Include soft-deleted sales in the results.
    pub fn include_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
