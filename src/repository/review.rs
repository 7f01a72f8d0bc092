use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::review::{NewReview as DomainNewReview, Review as DomainReview};
use crate::models::review::{NewReview as DbNewReview, Review as DbReview};
use crate::repository::{DieselRepository, ReviewReader, ReviewWriter};

impl ReviewReader for DieselRepository {
    fn list_reviews(&self, product_id: i32) -> RepositoryResult<Vec<DomainReview>> {
        use crate::schema::reviews;

        let mut conn = self.conn()?;

        let rows = reviews::table
            .filter(reviews::product_id.eq(product_id))
            .order((reviews::created_at.desc(), reviews::id.desc()))
            .load::<DbReview>(&mut conn)?;

        Ok(rows.into_iter().map(DomainReview::from).collect())
    }
}

impl ReviewWriter for DieselRepository {
    fn create_review(&self, new_review: &DomainNewReview) -> RepositoryResult<DomainReview> {
        use crate::schema::reviews;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(reviews::table)
            .values(&DbNewReview::from(new_review))
            .get_result::<DbReview>(&mut conn)?;

        Ok(created.into())
    }

    fn delete_review(&self, review_id: i32) -> RepositoryResult<DomainReview> {
        use crate::schema::reviews;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(reviews::table.filter(reviews::id.eq(review_id)))
            .get_result::<DbReview>(&mut conn)
            .optional()?;

        deleted
            .map(DomainReview::from)
            .ok_or(RepositoryError::NotFound)
    }
}
