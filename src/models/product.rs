use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub category_id: i32,
    pub price: f64,
    pub count: i32,
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub category_id: i32,
    pub price: f64,
    pub count: i32,
    pub title: &'a str,
    pub short_description: &'a str,
    pub description: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub category_id: i32,
    pub price: f64,
    pub count: i32,
    pub title: &'a str,
    pub short_description: &'a str,
    pub description: &'a str,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            category_id: value.category_id,
            price: value.price,
            count: value.count,
            title: value.title,
            short_description: value.short_description,
            description: value.description,
            tags: Vec::new(),
            images: Vec::new(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            category_id: value.category_id,
            price: value.price,
            count: value.count,
            title: value.title.as_str(),
            short_description: value.short_description.as_str(),
            description: value.description.as_str(),
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            category_id: value.category_id,
            price: value.price,
            count: value.count,
            title: value.title.as_str(),
            short_description: value.short_description.as_str(),
            description: value.description.as_str(),
            updated_at: value.updated_at,
        }
    }
}
