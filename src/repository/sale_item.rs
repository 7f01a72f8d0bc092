use chrono::NaiveDateTime;
use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::sale_item::{
    NewSaleItem as DomainNewSaleItem, SaleItem as DomainSaleItem, SaleItemListQuery,
};
use crate::models::sale_item::{NewSaleItem as DbNewSaleItem, SaleItem as DbSaleItem};
use crate::repository::{DieselRepository, SaleItemReader, SaleItemWriter};

impl SaleItemReader for DieselRepository {
    fn get_sale_item_by_product(
        &self,
        product_id: i32,
    ) -> RepositoryResult<Option<DomainSaleItem>> {
        use crate::schema::sale_items;

        let mut conn = self.conn()?;

        let sale = sale_items::table
            .filter(sale_items::product_id.eq(product_id))
            .first::<DbSaleItem>(&mut conn)
            .optional()?;

        Ok(sale.map(DomainSaleItem::from))
    }

    fn list_sale_items(
        &self,
        query: SaleItemListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainSaleItem>)> {
        use crate::schema::sale_items;

        let mut conn = self.conn()?;

        let mut count_query = sale_items::table.into_boxed::<diesel::sqlite::Sqlite>();
        if !query.include_deleted {
            count_query = count_query.filter(sale_items::is_deleted.eq(false));
        }
        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = sale_items::table.into_boxed::<diesel::sqlite::Sqlite>();
        if !query.include_deleted {
            items = items.filter(sale_items::is_deleted.eq(false));
        }

        items = items.order((sale_items::date_to.desc(), sale_items::id.asc()));

        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1);
            let per_page = pagination.per_page as i64;
            let offset = ((page - 1) * pagination.per_page) as i64;
            items = items.offset(offset).limit(per_page);
        }

        let rows = items.load::<DbSaleItem>(&mut conn)?;

        Ok((total, rows.into_iter().map(DomainSaleItem::from).collect()))
    }
}

impl SaleItemWriter for DieselRepository {
    fn save_sale_item(&self, sale: &DomainNewSaleItem) -> RepositoryResult<DomainSaleItem> {
        use crate::schema::sale_items;

        let mut conn = self.conn()?;
        let row = DbNewSaleItem::from(sale);

        conn.transaction::<DomainSaleItem, RepositoryError, _>(|conn| {
            // An expired sale is never reopened; a new sale gets a fresh row.
            diesel::delete(
                sale_items::table
                    .filter(sale_items::product_id.eq(sale.product_id))
                    .filter(sale_items::is_deleted.eq(true)),
            )
            .execute(conn)?;

            let saved = diesel::insert_into(sale_items::table)
                .values(&row)
                .on_conflict(sale_items::product_id)
                .do_update()
                .set(&row)
                .get_result::<DbSaleItem>(conn)?;

            Ok(saved.into())
        })
    }

    fn expire_sale_items(&self, now: NaiveDateTime) -> RepositoryResult<usize> {
        use crate::schema::sale_items;

        let mut conn = self.conn()?;

        let expired = diesel::update(
            sale_items::table
                .filter(sale_items::is_deleted.eq(false))
                .filter(sale_items::date_to.le(now)),
        )
        .set((
            sale_items::is_deleted.eq(true),
            sale_items::updated_at.eq(now),
        ))
        .execute(&mut conn)?;

        Ok(expired)
    }
}
