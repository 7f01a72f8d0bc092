use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::review::{MAX_RATE, MIN_RATE, NewReview};
use crate::forms::sanitize_multiline_text;

/// Maximum allowed length for a review body.
const TEXT_MAX_LEN: usize = 2000;
const TEXT_MAX_LEN_VALIDATOR: u64 = TEXT_MAX_LEN as u64;

pub type ReviewFormResult<T> = Result<T, ReviewFormError>;

#[derive(Debug, Error)]
pub enum ReviewFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("review text cannot be empty")]
    EmptyText,
}

/// JSON payload posted from the product page.
#[derive(Debug, Deserialize, Validate)]
pub struct AddReviewForm {
    #[validate(length(min = 1, max = TEXT_MAX_LEN_VALIDATOR))]
    pub text: String,
    #[validate(range(min = MIN_RATE, max = MAX_RATE))]
    pub rate: i32,
}

impl AddReviewForm {
    /// Builds the review of `product_id` signed with the author's name and email.
    pub fn into_new_review(
        self,
        product_id: i32,
        author: &str,
        email: &str,
    ) -> ReviewFormResult<NewReview> {
        self.validate()?;

        let text = sanitize_multiline_text(&self.text);
        if text.is_empty() {
            return Err(ReviewFormError::EmptyText);
        }

        Ok(NewReview::new(product_id, author, email, text, self.rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_review_form_builds_review() {
        let form = AddReviewForm {
            text: "  Great kettle  ".to_string(),
            rate: 5,
        };

        let review = form
            .into_new_review(7, "Jane", "jane@example.com")
            .expect("expected conversion");

        assert_eq!(review, NewReview::new(7, "Jane", "jane@example.com", "Great kettle", 5));
    }

    #[test]
    fn add_review_form_rejects_out_of_range_rate() {
        for rate in [0, 6] {
            let form = AddReviewForm {
                text: "ok".to_string(),
                rate,
            };

            let result = form.into_new_review(1, "Jane", "jane@example.com");

            assert!(matches!(result, Err(ReviewFormError::Validation(_))));
        }
    }

    #[test]
    fn add_review_form_rejects_blank_text() {
        let form = AddReviewForm {
            text: "\n \n".to_string(),
            rate: 3,
        };

        let result = form.into_new_review(1, "Jane", "jane@example.com");

        assert!(matches!(result, Err(ReviewFormError::EmptyText)));
    }
}
