use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::cache::RatingCache;
use crate::domain::{
    image::{NewImage, product_image_path},
    product::{Product, UpdateProduct},
    tag::Tag,
};
use crate::forms::products::{ProductUpload, SaveProductForm};
use crate::repository::{
    CategoryReader, CategoryWriter, ProductReader, ProductWriter, ReviewReader, TagWriter,
};
use crate::services::projections::ProductFullView;
use crate::services::ratings::{average_rating, invalidate_rating};
use crate::services::{ServiceError, ServiceResult};

/// Creates a product, or replaces product `product_id` when given.
///
/// The product row is persisted first, then its tags, images and
/// specifications are replaced and the tags are propagated into the tag set
/// of its category.
pub fn save_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: Option<i32>,
    form: SaveProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + CategoryReader + CategoryWriter + TagWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let ProductUpload {
        product: payload,
        tag_names,
        images,
        specifications,
    } = form
        .into_upload()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.get_category_by_id(payload.category_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let mut product = match product_id {
        Some(product_id) => repo.update_product(product_id, &UpdateProduct::from(payload)),
        None => repo.create_product(&payload),
    }
    .map_err(ServiceError::from)?;

    let tags = repo.ensure_tags(&tag_names).map_err(ServiceError::from)?;
    let tag_ids: Vec<i32> = tags.iter().map(|tag| tag.id).collect();
    product.tags = repo
        .replace_product_tags(product.id, &tag_ids)
        .map_err(ServiceError::from)?;

    let new_images: Vec<NewImage> = images
        .into_iter()
        .map(|image| {
            NewImage::new(
                product.id,
                product_image_path(product.id, &image.file_name),
                image.alt,
            )
        })
        .collect();
    product.images = repo
        .replace_product_images(product.id, &new_images)
        .map_err(ServiceError::from)?;

    repo.replace_specifications(product.id, &specifications)
        .map_err(ServiceError::from)?;

    propagate_category_tags(repo, product.category_id, &product.tags)?;

    Ok(product)
}

/// Adds every tag in `tags` missing from the category tag set.
///
/// Returns the number of tags added. Each addition is stored on its own.
pub fn propagate_category_tags<R>(repo: &R, category_id: i32, tags: &[Tag]) -> ServiceResult<usize>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    if tags.is_empty() {
        return Ok(0);
    }

    let existing = repo
        .list_category_tag_ids(category_id)
        .map_err(ServiceError::from)?;

    let mut added = 0;
    for tag in tags.iter().filter(|tag| !existing.contains(&tag.id)) {
        if repo
            .add_category_tag(category_id, tag.id)
            .map_err(ServiceError::from)?
        {
            log::info!(
                "Tag `{}` added to category {category_id}",
                tag.name
            );
            added += 1;
        }
    }

    Ok(added)
}

/// Deletes a product and drops its cached rating.
pub fn remove_product<R, C>(
    repo: &R,
    cache: &C,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
    C: RatingCache,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_product(product_id).map_err(ServiceError::from)?;
    invalidate_rating(cache, product_id);

    Ok(())
}

/// Loads the product page payload.
pub fn load_product_detail<R, C>(
    repo: &R,
    cache: &C,
    product_id: i32,
) -> ServiceResult<ProductFullView>
where
    R: ProductReader + ReviewReader + ?Sized,
    C: RatingCache,
{
    let product = repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let reviews = repo.list_reviews(product_id).map_err(ServiceError::from)?;
    let specifications = repo
        .list_specifications(product_id)
        .map_err(ServiceError::from)?;
    let rating = average_rating(repo, cache, product_id)?;

    Ok(ProductFullView::from_parts(
        &product,
        &reviews,
        &specifications,
        rating,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use mockall::predicate::eq;
    use pushkind_common::repository::errors::RepositoryError;

    use crate::cache::{InMemoryRatingCache, rating_cache_key};
    use crate::domain::category::Category;
    use crate::domain::image::Image;
    use crate::domain::rating::RatingAggregate;
    use crate::domain::review::Review;
    use crate::forms::categories::ImageForm;
    use crate::repository::mock::MockShopRepository;

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "admin".to_string(),
            email: "admin@example.com".to_string(),
            hub_id: 1,
            name: "Admin".to_string(),
            roles: vec![SERVICE_ACCESS_ROLE.to_string()],
            exp: 0,
        }
    }

    fn customer() -> AuthenticatedUser {
        AuthenticatedUser {
            roles: Vec::new(),
            ..admin()
        }
    }

    fn tag(id: i32, name: &str) -> Tag {
        Tag {
            id,
            name: name.to_string(),
            created_at: datetime(),
        }
    }

    fn category(id: i32) -> Category {
        Category {
            id,
            parent_id: None,
            title: "Kitchen".to_string(),
            image: None,
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    fn product(id: i32, category_id: i32) -> Product {
        Product {
            id,
            category_id,
            price: 1500.0,
            count: 3,
            title: "Kettle".to_string(),
            short_description: String::new(),
            description: String::new(),
            tags: Vec::new(),
            images: Vec::new(),
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    fn form(tags: &[&str]) -> SaveProductForm {
        SaveProductForm {
            category_id: 2,
            price: 1500.0,
            count: 3,
            title: "Kettle".to_string(),
            short_description: String::new(),
            description: String::new(),
            tags: tags.iter().map(|name| name.to_string()).collect(),
            images: Vec::new(),
            specifications: Vec::new(),
        }
    }

    fn expect_persistence(repo: &mut MockShopRepository, tags: Vec<Tag>) {
        repo.expect_get_category_by_id()
            .with(eq(2))
            .returning(|id| Ok(Some(category(id))));
        repo.expect_create_product()
            .times(1)
            .returning(|payload| Ok(product(10, payload.category_id)));
        let ensured = tags.clone();
        repo.expect_ensure_tags()
            .times(1)
            .returning(move |_| Ok(ensured.clone()));
        repo.expect_replace_product_tags()
            .times(1)
            .returning(move |_, _| Ok(tags.clone()));
        repo.expect_replace_specifications()
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
    }

    fn stored_images(product_id: i32, images: &[NewImage]) -> Vec<Image> {
        images
            .iter()
            .enumerate()
            .map(|(index, image)| Image {
                id: index as i32 + 1,
                owner_id: product_id,
                path: image.path.clone(),
                alt: image.alt.clone(),
            })
            .collect()
    }

    #[test]
    fn save_product_requires_role() {
        let repo = MockShopRepository::new();

        let result = save_product(&repo, &customer(), None, form(&[]));

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn save_product_propagates_tags_of_a_new_product() {
        let mut repo = MockShopRepository::new();
        expect_persistence(&mut repo, vec![tag(1, "steel"), tag(2, "glass")]);
        repo.expect_replace_product_images()
            .returning(|id, images| Ok(stored_images(id, images)));
        repo.expect_list_category_tag_ids()
            .with(eq(2))
            .times(1)
            .returning(|_| Ok(vec![1]));
        repo.expect_add_category_tag()
            .with(eq(2), eq(2))
            .times(1)
            .returning(|_, _| Ok(true));

        let saved = save_product(&repo, &admin(), None, form(&["steel", "glass"]))
            .expect("product saved");

        assert_eq!(saved.id, 10);
        assert_eq!(saved.tag_ids(), vec![1, 2]);
    }

    #[test]
    fn save_product_without_tags_skips_propagation() {
        let mut repo = MockShopRepository::new();
        expect_persistence(&mut repo, Vec::new());
        repo.expect_replace_product_images()
            .returning(|id, images| Ok(stored_images(id, images)));
        repo.expect_list_category_tag_ids().never();
        repo.expect_add_category_tag().never();

        let saved = save_product(&repo, &admin(), None, form(&[])).expect("product saved");

        assert!(saved.tags.is_empty());
    }

    #[test]
    fn save_product_updates_existing_product() {
        let mut repo = MockShopRepository::new();
        repo.expect_get_category_by_id()
            .returning(|id| Ok(Some(category(id))));
        repo.expect_update_product()
            .withf(|id, updates| *id == 10 && updates.title == "Kettle")
            .times(1)
            .returning(|id, updates| Ok(product(id, updates.category_id)));
        repo.expect_create_product().never();
        repo.expect_ensure_tags().returning(|_| Ok(vec![tag(5, "new")]));
        repo.expect_replace_product_tags()
            .returning(|_, _| Ok(vec![tag(5, "new")]));
        repo.expect_replace_specifications()
            .returning(|_, _| Ok(Vec::new()));
        repo.expect_replace_product_images()
            .withf(|id, images| *id == 10 && images.is_empty())
            .times(1)
            .returning(|id, images| Ok(stored_images(id, images)));
        repo.expect_list_category_tag_ids().returning(|_| Ok(Vec::new()));
        repo.expect_add_category_tag()
            .with(eq(2), eq(5))
            .times(1)
            .returning(|_, _| Ok(true));

        let saved = save_product(&repo, &admin(), Some(10), form(&["new"])).expect("product saved");

        assert_eq!(saved.id, 10);
    }

    #[test]
    fn save_product_attaches_images_under_product_path() {
        let mut repo = MockShopRepository::new();
        expect_persistence(&mut repo, Vec::new());
        repo.expect_replace_product_images()
            .withf(|id, images| {
                *id == 10
                    && images.len() == 1
                    && images[0].path == "products/product_10/preview/kettle.png"
            })
            .times(1)
            .returning(|id, images| Ok(stored_images(id, images)));
        let mut payload = form(&[]);
        payload.images = vec![ImageForm {
            file_name: "kettle.png".to_string(),
            alt: "Kettle".to_string(),
        }];

        let saved = save_product(&repo, &admin(), None, payload).expect("product saved");

        assert_eq!(saved.images.len(), 1);
        assert_eq!(saved.images[0].src(), "/products/product_10/preview/kettle.png");
    }

    #[test]
    fn save_product_rejects_unknown_category() {
        let mut repo = MockShopRepository::new();
        repo.expect_get_category_by_id().returning(|_| Ok(None));
        repo.expect_create_product().never();

        let result = save_product(&repo, &admin(), None, form(&["steel"]));

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn save_product_reports_form_errors() {
        let repo = MockShopRepository::new();
        let mut payload = form(&[]);
        payload.price = -5.0;

        let result = save_product(&repo, &admin(), None, payload);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn propagation_surfaces_store_failures() {
        let mut repo = MockShopRepository::new();
        repo.expect_list_category_tag_ids().returning(|_| Ok(Vec::new()));
        repo.expect_add_category_tag()
            .returning(|_, _| Err(RepositoryError::NotFound));

        let result = propagate_category_tags(&repo, 2, &[tag(1, "steel")]);

        assert!(result.is_err());
    }

    #[test]
    fn propagation_counts_only_new_links() {
        let mut repo = MockShopRepository::new();
        repo.expect_list_category_tag_ids().returning(|_| Ok(Vec::new()));
        repo.expect_add_category_tag()
            .returning(|_, tag_id| Ok(tag_id != 1));

        let added = propagate_category_tags(&repo, 2, &[tag(1, "steel"), tag(2, "glass")])
            .expect("propagated");

        assert_eq!(added, 1);
    }

    #[test]
    fn remove_product_invalidates_rating() {
        let mut repo = MockShopRepository::new();
        repo.expect_delete_product()
            .with(eq(4))
            .times(1)
            .returning(|_| Ok(()));
        let cache = InMemoryRatingCache::new();
        cache.set(&rating_cache_key(4), RatingAggregate::new(Some(5.0)));

        remove_product(&repo, &cache, &admin(), 4).expect("removed");

        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn load_product_detail_combines_aggregates() {
        let mut repo = MockShopRepository::new();
        repo.expect_get_product_by_id()
            .with(eq(3))
            .returning(|id| Ok(Some(product(id, 2))));
        repo.expect_list_reviews().returning(|product_id| {
            Ok(vec![
                Review {
                    id: 1,
                    product_id,
                    author: "Jane".to_string(),
                    email: "jane@example.com".to_string(),
                    text: "Great".to_string(),
                    rate: 5,
                    created_at: datetime(),
                },
                Review {
                    id: 2,
                    product_id,
                    author: "John".to_string(),
                    email: "john@example.com".to_string(),
                    text: "Good".to_string(),
                    rate: 4,
                    created_at: datetime(),
                },
            ])
        });
        repo.expect_list_specifications().returning(|_| Ok(Vec::new()));
        repo.expect_average_rate().returning(|_| Ok(Some(4.5)));
        let cache = InMemoryRatingCache::new();

        let view = load_product_detail(&repo, &cache, 3).expect("detail");

        assert_eq!(view.reviews.len(), 2);
        assert_eq!(view.rating, 4.5);
    }

    #[test]
    fn load_product_detail_missing_product() {
        let mut repo = MockShopRepository::new();
        repo.expect_get_product_by_id().returning(|_| Ok(None));
        let cache = InMemoryRatingCache::new();

        let result = load_product_detail(&repo, &cache, 3);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
