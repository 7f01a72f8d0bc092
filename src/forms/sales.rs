use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::sale_item::NewSaleItem;

pub type SaleFormResult<T> = Result<T, SaleFormError>;

#[derive(Debug, Error)]
pub enum SaleFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("invalid sale price `{value}`")]
    InvalidPrice { value: f64 },
    /// The sale ends before it starts.
    #[error("sale cannot end before it starts")]
    InvalidPeriod,
}

/// JSON payload used to put a product on sale.
///
/// Dates are naive UTC timestamps such as `2024-06-01T00:00:00`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemForm {
    #[validate(range(min = 1))]
    pub product_id: i32,
    pub sale_price: f64,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
}

impl SaleItemForm {
    pub fn into_new_sale_item(self) -> SaleFormResult<NewSaleItem> {
        self.validate()?;

        if !self.sale_price.is_finite() || self.sale_price < 0.0 {
            return Err(SaleFormError::InvalidPrice {
                value: self.sale_price,
            });
        }

        if self.date_to < self.date_from {
            return Err(SaleFormError::InvalidPeriod);
        }

        Ok(NewSaleItem::new(
            self.product_id,
            self.sale_price,
            self.date_from,
            self.date_to,
        ))
    }
}
