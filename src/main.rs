use std::time::Duration;

use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, rt, web};
use chrono::Utc;
use dotenvy::dotenv;
use pushkind_common::db::establish_connection_pool;
use pushkind_common::models::config::CommonServerConfig;

use pushkind_shop::cache::SharedRatingCache;
use pushkind_shop::config::ServerConfig;
use pushkind_shop::repository::DieselRepository;
use pushkind_shop::routes::account::{get_profile, post_review, update_avatar, update_profile};
use pushkind_shop::routes::admin::{
    add_category, add_product, delete_category, delete_product, delete_review, edit_category,
    edit_product, put_on_sale,
};
use pushkind_shop::routes::catalog::{
    banners, catalog, categories, limited_products, popular_products, product_detail,
    product_sale, sales, tags,
};
use pushkind_shop::services::sales::sweep_expired_sales;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let secret_key = match &config.secret {
        Some(key) => Key::from(key.as_bytes()),
        None => Key::generate(),
    };

    let common_config = CommonServerConfig {
        secret: config.secret.clone().unwrap_or_default(),
        auth_service_url: config.auth_service_url.clone(),
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);
    let rating_cache = web::Data::new(SharedRatingCache::new());

    spawn_sale_sweeper(repo.clone(), config.sale_sweep_interval_secs);

    let domain = config.domain.clone();
    let media_root = config.media_root.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/products", media_root.join("products")))
            .service(Files::new("/avatars", media_root.join("avatars")))
            .service(
                web::scope("/api")
                    .service(categories)
                    .service(tags)
                    .service(catalog)
                    .service(popular_products)
                    .service(limited_products)
                    .service(banners)
                    .service(product_sale)
                    .service(product_detail)
                    .service(sales)
                    .service(post_review)
                    .service(get_profile)
                    .service(update_profile)
                    .service(update_avatar)
                    .service(
                        web::scope("/admin")
                            .service(add_category)
                            .service(edit_category)
                            .service(delete_category)
                            .service(add_product)
                            .service(edit_product)
                            .service(delete_product)
                            .service(put_on_sale)
                            .service(delete_review),
                    ),
            )
            .app_data(web::Data::new(repo.clone()))
            .app_data(rating_cache.clone())
            .app_data(web::Data::new(common_config.clone()))
    })
    .bind((config.address.as_str(), config.port))?
    .run()
    .await
}

/// Periodically soft-deletes ended sales.
fn spawn_sale_sweeper(repo: DieselRepository, interval_secs: u64) {
    rt::spawn(async move {
        let mut interval = rt::time::interval(Duration::from_secs(interval_secs));
        loop {
            interval.tick().await;
            let repo = repo.clone();
            match web::block(move || sweep_expired_sales(&repo, Utc::now().naive_utc())).await {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => log::error!("Failed to expire sales: {e}"),
                Err(e) => log::error!("Sale sweep task failed: {e}"),
            }
        }
    });
}
