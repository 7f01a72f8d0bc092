use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::sale_item::{NewSaleItem as DomainNewSaleItem, SaleItem as DomainSaleItem};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::sale_items)]
pub struct SaleItem {
    pub id: i32,
    pub product_id: i32,
    pub sale_price: f64,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::sale_items)]
pub struct NewSaleItem {
    pub product_id: i32,
    pub sale_price: f64,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
    pub is_deleted: bool,
    pub updated_at: NaiveDateTime,
}

impl From<SaleItem> for DomainSaleItem {
    fn from(value: SaleItem) -> Self {
        Self {
            id: value.id,
            product_id: value.product_id,
            sale_price: value.sale_price,
            date_from: value.date_from,
            date_to: value.date_to,
            is_deleted: value.is_deleted,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<&DomainNewSaleItem> for NewSaleItem {
    fn from(value: &DomainNewSaleItem) -> Self {
        Self {
            product_id: value.product_id,
            sale_price: value.sale_price,
            date_from: value.date_from,
            date_to: value.date_to,
            is_deleted: value.is_deleted,
            updated_at: value.updated_at,
        }
    }
}
