use crate::cache::{RatingCache, rating_cache_key};
use crate::domain::rating::RatingAggregate;
use crate::repository::ProductReader;
use crate::services::{ServiceError, ServiceResult};

/// Mean rate of a product rounded to one decimal, `0.0` without reviews.
///
/// The aggregate is read from `cache` and computed with a single `AVG`
/// query on a miss.
pub fn average_rating<R, C>(repo: &R, cache: &C, product_id: i32) -> ServiceResult<f64>
where
    R: ProductReader + ?Sized,
    C: RatingCache,
{
    let aggregate = cache
        .get_or_insert_with(&rating_cache_key(product_id), || {
            repo.average_rate(product_id).map(RatingAggregate::new)
        })
        .map_err(ServiceError::from)?;

    Ok(aggregate.rounded())
}

/// Drop the cached aggregate of a product after its reviews changed.
pub fn invalidate_rating<C>(cache: &C, product_id: i32)
where
    C: RatingCache,
{
    cache.invalidate(&rating_cache_key(product_id));
}
