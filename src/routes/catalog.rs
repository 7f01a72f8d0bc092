use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use chrono::Utc;
use serde_json::json;

use crate::cache::SharedRatingCache;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::catalog::{
    CatalogQuery, load_banner_products, load_catalog, load_limited_products, load_popular_products,
};
use crate::services::categories::load_category_tree;
use crate::services::products::load_product_detail;
use crate::services::sales::{SalesQuery, load_product_sale, load_sales};
use crate::services::tags::{TagsQuery, load_tags};

/// Nesting depth accepted in catalog query strings (`filter[name]`).
const QUERY_MAX_DEPTH: usize = 5;

#[get("/categories")]
pub async fn categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match load_category_tree(repo.get_ref()) {
        Ok(tree) => HttpResponse::Ok().json(tree),
        Err(err) => error_response(err, "list categories"),
    }
}

#[get("/tags")]
pub async fn tags(
    params: web::Query<TagsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match load_tags(repo.get_ref(), params.into_inner()) {
        Ok(tags) => HttpResponse::Ok().json(tags),
        Err(err) => error_response(err, "list tags"),
    }
}

#[get("/catalog")]
/// Paginated, filtered product listing.
///
/// The query string uses bracketed keys (`filter[minPrice]=10&tags[]=1`),
/// which the default `web::Query` extractor does not understand.
pub async fn catalog(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    cache: web::Data<SharedRatingCache>,
) -> impl Responder {
    let config = serde_qs::Config::new(QUERY_MAX_DEPTH, false);
    let query: CatalogQuery = match config.deserialize_str(req.query_string()) {
        Ok(query) => query,
        Err(err) => {
            return HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));
        }
    };

    match load_catalog(repo.get_ref(), cache.get_ref(), query) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err, "load catalog"),
    }
}

#[get("/products/popular")]
pub async fn popular_products(
    repo: web::Data<DieselRepository>,
    cache: web::Data<SharedRatingCache>,
) -> impl Responder {
    match load_popular_products(repo.get_ref(), cache.get_ref()) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => error_response(err, "load popular products"),
    }
}

#[get("/products/limited")]
pub async fn limited_products(
    repo: web::Data<DieselRepository>,
    cache: web::Data<SharedRatingCache>,
) -> impl Responder {
    match load_limited_products(repo.get_ref(), cache.get_ref()) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => error_response(err, "load limited products"),
    }
}

#[get("/banners")]
pub async fn banners(
    repo: web::Data<DieselRepository>,
    cache: web::Data<SharedRatingCache>,
) -> impl Responder {
    match load_banner_products(repo.get_ref(), cache.get_ref()) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => error_response(err, "load banners"),
    }
}

#[get("/product/{product_id}")]
pub async fn product_detail(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<SharedRatingCache>,
) -> impl Responder {
    let product_id = path.into_inner();

    match load_product_detail(repo.get_ref(), cache.get_ref(), product_id) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response(err, &format!("load product {product_id}")),
    }
}

#[get("/product/{product_id}/sale")]
pub async fn product_sale(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match load_product_sale(repo.get_ref(), product_id, Utc::now().naive_utc()) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response(err, &format!("load sale of product {product_id}")),
    }
}

#[get("/sales")]
pub async fn sales(
    params: web::Query<SalesQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match load_sales(repo.get_ref(), params.into_inner(), Utc::now().naive_utc()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err, "list sales"),
    }
}
