use chrono::{Duration, Utc};
use pushkind_common::domain::auth::AuthenticatedUser;

use pushkind_shop::SERVICE_ACCESS_ROLE;
use pushkind_shop::cache::{InMemoryRatingCache, RatingCache, rating_cache_key};
use pushkind_shop::domain::category::NewCategory;
use pushkind_shop::domain::product::NewProduct;
use pushkind_shop::domain::tag::TagListQuery;
use pushkind_shop::forms::categories::ImageForm;
use pushkind_shop::forms::products::SaveProductForm;
use pushkind_shop::forms::reviews::AddReviewForm;
use pushkind_shop::forms::sales::SaleItemForm;
use pushkind_shop::repository::{
    CategoryReader, CategoryWriter, ProductWriter, SaleItemReader, TagReader,
};
use pushkind_shop::services::catalog::{
    CatalogQuery, load_banner_products, load_catalog, load_limited_products,
};
use pushkind_shop::services::categories::remove_category;
use pushkind_shop::services::ServiceError;
use pushkind_shop::services::products::{load_product_detail, remove_product, save_product};
use pushkind_shop::services::ratings::average_rating;
use pushkind_shop::services::reviews::add_review;
use pushkind_shop::services::sales::{SalesQuery, load_sales, save_sale_item};

mod common;

fn user(roles: &[&str]) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "user-1".to_string(),
        email: "jane@example.com".to_string(),
        hub_id: 1,
        name: "Jane".to_string(),
        roles: roles.iter().map(|role| role.to_string()).collect(),
        exp: 0,
    }
}

fn product_form(category_id: i32, tags: &[&str]) -> SaveProductForm {
    SaveProductForm {
        category_id,
        price: 1000.0,
        count: 3,
        title: "Kettle".to_string(),
        short_description: "Boils".to_string(),
        description: "Boils water".to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        images: Vec::new(),
        specifications: Vec::new(),
    }
}

fn review_form(rate: i32) -> AddReviewForm {
    AddReviewForm {
        text: "Works".to_string(),
        rate,
    }
}

#[test]
fn test_product_tags_propagate_into_category() {
    let test_db = common::TestDb::new("test_product_tags_propagate_into_category.db");
    let repo = test_db.repo();
    let admin = user(&[SERVICE_ACCESS_ROLE]);

    let category = common::seed_category(&repo, "Kitchen");
    assert!(repo.list_category_tag_ids(category.id).unwrap().is_empty());

    let product = save_product(&repo, &admin, None, product_form(category.id, &["A", "B"])).unwrap();
    assert_eq!(product.tags.len(), 2);

    let mut names: Vec<String> = repo
        .list_tags(TagListQuery::new().category(category.id))
        .unwrap()
        .into_iter()
        .map(|tag| tag.name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["A", "B"]);

    // Moving the product keeps the old category tags and fills the new one.
    let other = common::seed_category(&repo, "Gifts");
    save_product(&repo, &admin, Some(product.id), product_form(other.id, &["B", "C"])).unwrap();

    assert_eq!(repo.list_category_tag_ids(category.id).unwrap().len(), 2);
    let mut moved: Vec<String> = repo
        .list_tags(TagListQuery::new().category(other.id))
        .unwrap()
        .into_iter()
        .map(|tag| tag.name)
        .collect();
    moved.sort();
    assert_eq!(moved, vec!["B", "C"]);
}

#[test]
fn test_rating_follows_reviews() {
    let test_db = common::TestDb::new("test_rating_follows_reviews.db");
    let repo = test_db.repo();
    let cache = InMemoryRatingCache::new();
    let admin = user(&[SERVICE_ACCESS_ROLE]);
    let customer = user(&[]);

    let category = common::seed_category(&repo, "Kitchen");
    let product = save_product(&repo, &admin, None, product_form(category.id, &[])).unwrap();

    assert_eq!(average_rating(&repo, &cache, product.id).unwrap(), 0.0);

    add_review(&repo, &cache, &customer, product.id, review_form(5)).unwrap();
    let reviews = add_review(&repo, &cache, &customer, product.id, review_form(5)).unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].author, "Jane");

    let first = average_rating(&repo, &cache, product.id).unwrap();
    let second = average_rating(&repo, &cache, product.id).unwrap();
    assert_eq!(first, 5.0);
    assert_eq!(first, second);

    add_review(&repo, &cache, &customer, product.id, review_form(4)).unwrap();
    assert_eq!(average_rating(&repo, &cache, product.id).unwrap(), 4.7);

    let detail = load_product_detail(&repo, &cache, product.id).unwrap();
    assert_eq!(detail.reviews.len(), 3);
    assert_eq!(detail.rating, 4.7);

    let page = load_catalog(&repo, &cache, CatalogQuery::default()).unwrap();
    assert_eq!(page.items[0].reviews, 3);
    assert_eq!(page.items[0].rating, 4.7);

    remove_product(&repo, &cache, &admin, product.id).unwrap();
    assert_eq!(cache.get(&rating_cache_key(product.id)), None);
}

#[test]
fn test_sales_expire_on_save_and_read() {
    let test_db = common::TestDb::new("test_sales_expire_on_save_and_read.db");
    let repo = test_db.repo();
    let admin = user(&[SERVICE_ACCESS_ROLE]);
    let now = Utc::now().naive_utc();

    let category = common::seed_category(&repo, "Kitchen");
    let kettle = common::seed_product(&repo, category.id, "Kettle", 1000.0);
    let mug = common::seed_product(&repo, category.id, "Mug", 300.0);

    let ended = save_sale_item(
        &repo,
        &admin,
        SaleItemForm {
            product_id: mug.id,
            sale_price: 200.0,
            date_from: now - Duration::days(3),
            date_to: now - Duration::days(1),
        },
        now,
    )
    .unwrap();
    assert!(ended.is_deleted);

    let active = save_sale_item(
        &repo,
        &admin,
        SaleItemForm {
            product_id: kettle.id,
            sale_price: 750.0,
            date_from: now - Duration::days(1),
            date_to: now + Duration::hours(1),
        },
        now,
    )
    .unwrap();
    assert!(!active.is_deleted);

    let page = load_sales(&repo, SalesQuery::default(), now).unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].discount, 25);

    let later = now + Duration::hours(2);
    let page = load_sales(&repo, SalesQuery::default(), later).unwrap();
    assert!(page.items.is_empty());
    assert!(
        repo.get_sale_item_by_product(kettle.id)
            .unwrap()
            .unwrap()
            .is_deleted
    );
}

#[test]
fn test_expired_sale_is_not_reopened() {
    let test_db = common::TestDb::new("test_expired_sale_is_not_reopened.db");
    let repo = test_db.repo();
    let admin = user(&[SERVICE_ACCESS_ROLE]);
    let now = Utc::now().naive_utc();

    let category = common::seed_category(&repo, "Kitchen");
    let kettle = common::seed_product(&repo, category.id, "Kettle", 1000.0);

    let sale_form = |date_to| SaleItemForm {
        product_id: kettle.id,
        sale_price: 800.0,
        date_from: now - Duration::days(3),
        date_to,
    };

    let ended = save_sale_item(&repo, &admin, sale_form(now - Duration::days(1)), now).unwrap();
    assert!(ended.is_deleted);

    let renewed = save_sale_item(&repo, &admin, sale_form(now + Duration::days(1)), now).unwrap();
    assert!(!renewed.is_deleted);
    assert_ne!(renewed.id, ended.id);

    let stored = repo.get_sale_item_by_product(kettle.id).unwrap().unwrap();
    assert_eq!(stored.id, renewed.id);

    let page = load_sales(&repo, SalesQuery::default(), now).unwrap();
    assert_eq!(page.items.len(), 1);
}

#[test]
fn test_product_update_replaces_images() {
    let test_db = common::TestDb::new("test_product_update_replaces_images.db");
    let repo = test_db.repo();
    let admin = user(&[SERVICE_ACCESS_ROLE]);
    let cache = InMemoryRatingCache::new();

    let category = common::seed_category(&repo, "Kitchen");
    let with_image = || {
        let mut form = product_form(category.id, &[]);
        form.images = vec![ImageForm {
            file_name: "kettle.png".to_string(),
            alt: "Kettle".to_string(),
        }];
        form
    };

    let product = save_product(&repo, &admin, None, with_image()).unwrap();
    let updated = save_product(&repo, &admin, Some(product.id), with_image()).unwrap();
    let updated = save_product(&repo, &admin, Some(updated.id), with_image()).unwrap();
    assert_eq!(updated.images.len(), 1);

    let detail = load_product_detail(&repo, &cache, product.id).unwrap();
    assert_eq!(detail.images.len(), 1);

    save_product(&repo, &admin, Some(product.id), product_form(category.id, &[])).unwrap();
    let detail = load_product_detail(&repo, &cache, product.id).unwrap();
    assert!(detail.images.is_empty());
}

#[test]
fn test_limited_and_banner_listings() {
    let test_db = common::TestDb::new("test_limited_and_banner_listings.db");
    let repo = test_db.repo();
    let cache = InMemoryRatingCache::new();

    let appliances = common::seed_category(&repo, "Appliances");
    let kettles = repo
        .create_category(&NewCategory::new("Kettles").with_parent_id(appliances.id))
        .unwrap();
    let books = common::seed_category(&repo, "Books");
    common::seed_category(&repo, "Garden");

    let kettle = common::seed_product(&repo, kettles.id, "Kettle", 1500.0);
    common::seed_product(&repo, appliances.id, "Toaster", 2500.0);
    let stocked = repo
        .create_product(&NewProduct::new(books.id, "Atlas", 900.0, 50))
        .unwrap();
    repo.create_product(&NewProduct::new(books.id, "Primer", 100.0, 0))
        .unwrap();

    let limited = load_limited_products(&repo, &cache).unwrap();
    assert_eq!(limited.len(), 2);
    assert!(limited.iter().all(|item| item.count > 0 && item.count <= 10));

    let banners = load_banner_products(&repo, &cache).unwrap();
    let ids: Vec<i32> = banners.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![kettle.id, stocked.id]);
}

#[test]
fn test_category_with_products_is_kept() {
    let test_db = common::TestDb::new("test_category_with_products_is_kept.db");
    let repo = test_db.repo();
    let admin = user(&[SERVICE_ACCESS_ROLE]);

    let category = common::seed_category(&repo, "Kitchen");
    let product = common::seed_product(&repo, category.id, "Kettle", 1000.0);

    let result = remove_category(&repo, &admin, category.id);
    assert!(matches!(result, Err(ServiceError::Conflict)));
    assert!(repo.get_category_by_id(category.id).unwrap().is_some());

    remove_product(&repo, &InMemoryRatingCache::new(), &admin, product.id).unwrap();
    remove_category(&repo, &admin, category.id).unwrap();
    assert!(repo.get_category_by_id(category.id).unwrap().is_none());
}
