use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::cache::RatingCache;
use crate::domain::review::Review;
use crate::forms::reviews::AddReviewForm;
use crate::repository::{ProductReader, ReviewReader, ReviewWriter};
use crate::services::projections::ReviewView;
use crate::services::ratings::invalidate_rating;
use crate::services::{ServiceError, ServiceResult};

/// Posts a review signed by `user` and returns all reviews of the product.
pub fn add_review<R, C>(
    repo: &R,
    cache: &C,
    user: &AuthenticatedUser,
    product_id: i32,
    form: AddReviewForm,
) -> ServiceResult<Vec<ReviewView>>
where
    R: ProductReader + ReviewReader + ReviewWriter + ?Sized,
    C: RatingCache,
{
    repo.get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let new_review = form
        .into_new_review(product_id, &user.name, &user.email)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_review(&new_review).map_err(ServiceError::from)?;
    invalidate_rating(cache, product_id);

    let reviews = repo.list_reviews(product_id).map_err(ServiceError::from)?;
    Ok(reviews.iter().map(ReviewView::from).collect())
}

/// Deletes a review as a moderator.
pub fn remove_review<R, C>(
    repo: &R,
    cache: &C,
    user: &AuthenticatedUser,
    review_id: i32,
) -> ServiceResult<Review>
where
    R: ReviewWriter + ?Sized,
    C: RatingCache,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let removed = repo.delete_review(review_id).map_err(ServiceError::from)?;
    invalidate_rating(cache, removed.product_id);

    Ok(removed)
}
