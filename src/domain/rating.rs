use serde::{Deserialize, Serialize};

/// Result of the `AVG(rate)` aggregate over the reviews of a product.
///
/// This is the value kept in the rating cache; rounding happens on read.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingAggregate {
    /// Mean rate, `None` when the product has no reviews.
    pub average_rate: Option<f64>,
}

impl RatingAggregate {
    pub fn new(average_rate: Option<f64>) -> Self {
        Self { average_rate }
    }

    /// Mean rate rounded to one decimal place, `0.0` without reviews.
    ///
    /// Exact halves round to the even neighbour, so `4.25` becomes `4.2`.
    pub fn rounded(&self) -> f64 {
        match self.average_rate {
            Some(average) => (average * 10.0).round_ties_even() / 10.0,
            None => 0.0,
        }
    }
}
