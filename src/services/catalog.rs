use pushkind_common::pagination::DEFAULT_ITEMS_PER_PAGE;
use serde::Deserialize;

use crate::cache::RatingCache;
use crate::domain::{
    category::CategoryListQuery,
    product::{Product, ProductListQuery, ProductSort, SortDirection},
};
use crate::repository::{CategoryReader, ProductReader};
use crate::services::projections::{PageView, ProductShortView};
use crate::services::ratings::average_rating;
use crate::services::{ServiceError, ServiceResult};

/// Number of products shown in the "popular" block.
pub const POPULAR_PRODUCTS_LIMIT: usize = 8;

/// Number of products shown in the "limited edition" block.
pub const LIMITED_PRODUCTS_LIMIT: usize = 16;

/// Products with at most this many items in stock count as limited.
pub const LIMITED_STOCK_THRESHOLD: i32 = 10;

/// Number of banners on the landing page.
pub const BANNER_PRODUCTS_LIMIT: usize = 3;

/// Upper bound for the `limit` parameter of the catalog.
pub const MAX_CATALOG_LIMIT: usize = 100;

/// Filters nested under `filter[...]` in the catalog query string.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFilter {
    pub name: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    #[serde(default)]
    pub free_delivery: bool,
    #[serde(default)]
    pub available: bool,
}

/// Query string of `GET /api/catalog`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    #[serde(default)]
    pub filter: CatalogFilter,
    /// Category whose products, and those of its subcategories, are listed.
    pub category: Option<i32>,
    #[serde(default)]
    pub tags: Vec<i32>,
    pub sort: Option<ProductSort>,
    pub sort_type: Option<SortDirection>,
    pub current_page: Option<usize>,
    pub limit: Option<usize>,
}

/// Loads one page of the catalog.
pub fn load_catalog<R, C>(
    repo: &R,
    cache: &C,
    query: CatalogQuery,
) -> ServiceResult<PageView<ProductShortView>>
where
    R: ProductReader + CategoryReader + ?Sized,
    C: RatingCache,
{
    let CatalogQuery {
        filter,
        category,
        tags,
        sort,
        sort_type,
        current_page,
        limit,
    } = query;

    let page = current_page.unwrap_or(1).max(1);
    let per_page = limit
        .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
        .clamp(1, MAX_CATALOG_LIMIT);

    let mut list_query = ProductListQuery::new()
        .price_between(filter.min_price, filter.max_price)
        .sort(sort.unwrap_or_default(), sort_type.unwrap_or_default())
        .paginate(page, per_page);

    if let Some(name) = filter
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
    {
        list_query = list_query.search(name);
    }

    if filter.free_delivery {
        list_query = list_query.free_delivery_only();
    }

    if filter.available {
        list_query = list_query.available_only();
    }

    if !tags.is_empty() {
        list_query = list_query.tags(tags);
    }

    if let Some(category_id) = category {
        let mut category_ids = vec![category_id];
        let children = repo
            .list_categories(CategoryListQuery::new().children_of(category_id))
            .map_err(ServiceError::from)?;
        category_ids.extend(children.iter().map(|child| child.id));
        list_query = list_query.categories(category_ids);
    }

    let (total, products) = repo.list_products(list_query).map_err(ServiceError::from)?;
    let items = short_views(repo, cache, &products)?;

    Ok(PageView::new(items, page, total, per_page))
}

/// Loads the products with the most reviews.
pub fn load_popular_products<R, C>(repo: &R, cache: &C) -> ServiceResult<Vec<ProductShortView>>
where
    R: ProductReader + ?Sized,
    C: RatingCache,
{
    let products = repo
        .list_popular_products(POPULAR_PRODUCTS_LIMIT)
        .map_err(ServiceError::from)?;

    short_views(repo, cache, &products)
}

/// Loads the newest in-stock products that are about to sell out.
pub fn load_limited_products<R, C>(repo: &R, cache: &C) -> ServiceResult<Vec<ProductShortView>>
where
    R: ProductReader + ?Sized,
    C: RatingCache,
{
    let query = ProductListQuery::new()
        .available_only()
        .stock_at_most(LIMITED_STOCK_THRESHOLD)
        .sort(ProductSort::Date, SortDirection::Dec)
        .paginate(1, LIMITED_PRODUCTS_LIMIT);

    let (_, products) = repo.list_products(query).map_err(ServiceError::from)?;

    short_views(repo, cache, &products)
}

/// Loads one banner product per top-level category: the cheapest in-stock
/// product of the category or its direct subcategories.
///
/// Categories without such a product are skipped.
pub fn load_banner_products<R, C>(repo: &R, cache: &C) -> ServiceResult<Vec<ProductShortView>>
where
    R: ProductReader + CategoryReader + ?Sized,
    C: RatingCache,
{
    let roots = repo
        .list_categories(CategoryListQuery::new().roots())
        .map_err(ServiceError::from)?;

    let mut banners = Vec::with_capacity(BANNER_PRODUCTS_LIMIT);
    for root in roots {
        if banners.len() == BANNER_PRODUCTS_LIMIT {
            break;
        }

        let mut category_ids = vec![root.id];
        let children = repo
            .list_categories(CategoryListQuery::new().children_of(root.id))
            .map_err(ServiceError::from)?;
        category_ids.extend(children.iter().map(|child| child.id));

        let query = ProductListQuery::new()
            .categories(category_ids)
            .available_only()
            .sort(ProductSort::Price, SortDirection::Inc)
            .paginate(1, 1);
        let (_, products) = repo.list_products(query).map_err(ServiceError::from)?;
        banners.extend(products);
    }

    short_views(repo, cache, &banners)
}

fn short_views<R, C>(
    repo: &R,
    cache: &C,
    products: &[Product],
) -> ServiceResult<Vec<ProductShortView>>
where
    R: ProductReader + ?Sized,
    C: RatingCache,
{
    products
        .iter()
        .map(|product| {
            let review_count = repo
                .count_reviews(product.id)
                .map_err(ServiceError::from)?;
            let rating = average_rating(repo, cache, product.id)?;
            Ok(ProductShortView::from_parts(product, review_count, rating))
        })
        .collect()
}
