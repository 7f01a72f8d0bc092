use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::review::{NewReview as DomainNewReview, Review as DomainReview};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct Review {
    pub id: i32,
    pub product_id: i32,
    pub author: String,
    pub email: String,
    pub text: String,
    pub rate: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct NewReview<'a> {
    pub product_id: i32,
    pub author: &'a str,
    pub email: &'a str,
    pub text: &'a str,
    pub rate: i32,
}

impl From<Review> for DomainReview {
    fn from(value: Review) -> Self {
        Self {
            id: value.id,
            product_id: value.product_id,
            author: value.author,
            email: value.email,
            text: value.text,
            rate: value.rate,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewReview> for NewReview<'a> {
    fn from(value: &'a DomainNewReview) -> Self {
        Self {
            product_id: value.product_id,
            author: value.author.as_str(),
            email: value.email.as_str(),
            text: value.text.as_str(),
            rate: value.rate,
        }
    }
}
