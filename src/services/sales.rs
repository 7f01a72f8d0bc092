use std::collections::HashMap;

use chrono::NaiveDateTime;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::DEFAULT_ITEMS_PER_PAGE;
use pushkind_common::routes::check_role;
use serde::Deserialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::{
    product::{Product, ProductListQuery},
    sale_item::{SaleItem, SaleItemListQuery},
};
use crate::forms::sales::SaleItemForm;
use crate::repository::{ProductReader, SaleItemReader, SaleItemWriter};
use crate::services::projections::{PageView, SaleItemView};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the sales listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesQuery {
    /// Page requested by the storefront (1-based).
    pub current_page: Option<usize>,
}

/// Creates or replaces the sale of a product.
///
/// A sale whose end date is already reached is stored as expired.
pub fn save_sale_item<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SaleItemForm,
    now: NaiveDateTime,
) -> ServiceResult<SaleItem>
where
    R: ProductReader + SaleItemWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let mut sale = form
        .into_new_sale_item()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.get_product_by_id(sale.product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if sale.expire_if_due(now) {
        log::warn!(
            "Sale of product {} ended at {}, saved as expired",
            sale.product_id,
            sale.date_to
        );
    }

    repo.save_sale_item(&sale).map_err(ServiceError::from)
}

/// Soft-deletes every sale that ended at or before `now`.
pub fn sweep_expired_sales<R>(repo: &R, now: NaiveDateTime) -> ServiceResult<usize>
where
    R: SaleItemWriter + ?Sized,
{
    let expired = repo.expire_sale_items(now).map_err(ServiceError::from)?;
    if expired > 0 {
        log::warn!("{expired} sale(s) expired");
    }
    Ok(expired)
}

/// Loads one page of active sales.
pub fn load_sales<R>(
    repo: &R,
    query: SalesQuery,
    now: NaiveDateTime,
) -> ServiceResult<PageView<SaleItemView>>
where
    R: ProductReader + SaleItemReader + SaleItemWriter + ?Sized,
{
    sweep_expired_sales(repo, now)?;

    let page = query.current_page.unwrap_or(1).max(1);
    let (total, sales) = repo
        .list_sale_items(SaleItemListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE))
        .map_err(ServiceError::from)?;

    let product_ids: Vec<i32> = sales.iter().map(|sale| sale.product_id).collect();
    let products: HashMap<i32, Product> = if product_ids.is_empty() {
        HashMap::new()
    } else {
        let (_, items) = repo
            .list_products(ProductListQuery::new().ids(product_ids))
            .map_err(ServiceError::from)?;
        items
            .into_iter()
            .map(|product| (product.id, product))
            .collect()
    };

    let items = sales
        .iter()
        .filter_map(|sale| {
            products
                .get(&sale.product_id)
                .map(|product| SaleItemView::from_parts(sale, product))
        })
        .collect();

    Ok(PageView::new(items, page, total, DEFAULT_ITEMS_PER_PAGE))
}

/// Returns the active sale of a product.
pub fn load_product_sale<R>(
    repo: &R,
    product_id: i32,
    now: NaiveDateTime,
) -> ServiceResult<SaleItemView>
where
    R: ProductReader + SaleItemReader + SaleItemWriter + ?Sized,
{
    sweep_expired_sales(repo, now)?;

    let product = repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let sale = repo
        .get_sale_item_by_product(product_id)
        .map_err(ServiceError::from)?
        .filter(|sale| !sale.is_deleted)
        .ok_or(ServiceError::NotFound)?;

    Ok(SaleItemView::from_parts(&sale, &product))
}
