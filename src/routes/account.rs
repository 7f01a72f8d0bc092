use actix_web::{HttpResponse, Responder, get, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::cache::SharedRatingCache;
use crate::forms::profile::{AvatarForm, ProfileForm};
use crate::forms::reviews::AddReviewForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::profile::{load_profile, save_avatar, save_profile};
use crate::services::reviews::add_review;

#[post("/product/{product_id}/reviews")]
/// Post a review as the signed-in user and return the product's reviews.
pub async fn post_review(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    cache: web::Data<SharedRatingCache>,
    form: web::Json<AddReviewForm>,
) -> impl Responder {
    let product_id = path.into_inner();

    match add_review(
        repo.get_ref(),
        cache.get_ref(),
        &user,
        product_id,
        form.into_inner(),
    ) {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(err) => error_response(err, &format!("review product {product_id}")),
    }
}

#[get("/profile")]
pub async fn get_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match load_profile(repo.get_ref(), &user) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(err) => error_response(err, "load profile"),
    }
}

#[post("/profile")]
pub async fn update_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<ProfileForm>,
) -> impl Responder {
    match save_profile(repo.get_ref(), &user, form.into_inner()) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(err) => error_response(err, "save profile"),
    }
}

#[post("/profile/avatar")]
pub async fn update_avatar(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AvatarForm>,
) -> impl Responder {
    match save_avatar(repo.get_ref(), &user, form.into_inner()) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(err) => error_response(err, "save avatar"),
    }
}
