use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::{
    Category as DomainCategory, NewCategory as DomainNewCategory,
    UpdateCategory as DomainUpdateCategory,
};
use crate::models::image::CategoryImage;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: i32,
    pub parent_id: Option<i32>,
    pub title: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory<'a> {
    pub parent_id: Option<i32>,
    pub title: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateCategory<'a> {
    pub parent_id: Option<i32>,
    pub title: &'a str,
    pub updated_at: NaiveDateTime,
}

impl From<(Category, Option<CategoryImage>)> for DomainCategory {
    fn from((category, image): (Category, Option<CategoryImage>)) -> Self {
        Self {
            id: category.id,
            parent_id: category.parent_id,
            title: category.title,
            image: image.map(Into::into),
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewCategory> for NewCategory<'a> {
    fn from(value: &'a DomainNewCategory) -> Self {
        Self {
            parent_id: value.parent_id,
            title: value.title.as_str(),
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateCategory> for UpdateCategory<'a> {
    fn from(value: &'a DomainUpdateCategory) -> Self {
        Self {
            parent_id: value.parent_id,
            title: value.title.as_str(),
            updated_at: value.updated_at,
        }
    }
}
