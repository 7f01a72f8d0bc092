use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Lowest rate a customer can give to a product.
pub const MIN_RATE: i32 = 1;
/// Highest rate a customer can give to a product.
pub const MAX_RATE: i32 = 5;

/// Customer review left on a product page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    /// Unique identifier of the review.
    pub id: i32,
    /// Identifier of the reviewed product.
    pub product_id: i32,
    /// Display name of the author.
    pub author: String,
    /// Contact email of the author.
    pub email: String,
    /// Free-text body.
    pub text: String,
    /// Rate between [`MIN_RATE`] and [`MAX_RATE`].
    pub rate: i32,
    /// Timestamp for when the review was posted.
    pub created_at: NaiveDateTime,
}

/// Payload required to post a new review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub product_id: i32,
    pub author: String,
    pub email: String,
    pub text: String,
    pub rate: i32,
}

impl NewReview {
    pub fn new(
        product_id: i32,
        author: impl Into<String>,
        email: impl Into<String>,
        text: impl Into<String>,
        rate: i32,
    ) -> Self {
        Self {
            product_id,
            author: author.into(),
            email: email.into(),
            text: text.into(),
            rate,
        }
    }
}
