//! Catalog management endpoints, restricted to `crate::SERVICE_ACCESS_ROLE`.

use actix_web::{HttpResponse, Responder, delete, post, put, web};
use chrono::Utc;
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::cache::SharedRatingCache;
use crate::forms::categories::AddCategoryForm;
use crate::forms::products::SaveProductForm;
use crate::forms::sales::SaleItemForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::categories::{create_category, modify_category, remove_category};
use crate::services::products::{remove_product, save_product};
use crate::services::reviews::remove_review;
use crate::services::sales::save_sale_item;

#[post("/categories")]
pub async fn add_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddCategoryForm>,
) -> impl Responder {
    match create_category(repo.get_ref(), &user, form.into_inner()) {
        Ok(category) => HttpResponse::Created().json(category),
        Err(err) => error_response(err, "create category"),
    }
}

#[put("/categories/{category_id}")]
pub async fn edit_category(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddCategoryForm>,
) -> impl Responder {
    let category_id = path.into_inner();

    match modify_category(repo.get_ref(), &user, category_id, form.into_inner()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => error_response(err, &format!("update category {category_id}")),
    }
}

#[delete("/categories/{category_id}")]
pub async fn delete_category(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = path.into_inner();

    match remove_category(repo.get_ref(), &user, category_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, &format!("delete category {category_id}")),
    }
}

#[post("/products")]
pub async fn add_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<SaveProductForm>,
) -> impl Responder {
    match save_product(repo.get_ref(), &user, None, form.into_inner()) {
        Ok(product) => HttpResponse::Created().json(product),
        Err(err) => error_response(err, "create product"),
    }
}

#[put("/products/{product_id}")]
pub async fn edit_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<SaveProductForm>,
) -> impl Responder {
    let product_id = path.into_inner();

    match save_product(repo.get_ref(), &user, Some(product_id), form.into_inner()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err, &format!("update product {product_id}")),
    }
}

#[delete("/products/{product_id}")]
pub async fn delete_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    cache: web::Data<SharedRatingCache>,
) -> impl Responder {
    let product_id = path.into_inner();

    match remove_product(repo.get_ref(), cache.get_ref(), &user, product_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, &format!("delete product {product_id}")),
    }
}

#[post("/sales")]
pub async fn put_on_sale(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<SaleItemForm>,
) -> impl Responder {
    match save_sale_item(
        repo.get_ref(),
        &user,
        form.into_inner(),
        Utc::now().naive_utc(),
    ) {
        Ok(sale) => HttpResponse::Ok().json(sale),
        Err(err) => error_response(err, "save sale"),
    }
}

#[delete("/reviews/{review_id}")]
pub async fn delete_review(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    cache: web::Data<SharedRatingCache>,
) -> impl Responder {
    let review_id = path.into_inner();

    match remove_review(repo.get_ref(), cache.get_ref(), &user, review_id) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, &format!("delete review {review_id}")),
    }
}
