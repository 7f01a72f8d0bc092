use std::collections::HashMap;

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::category::{Category, CategoryListQuery, UpdateCategory};
use crate::domain::image::{NewImage, product_image_path};
use crate::domain::product::ProductListQuery;
use crate::forms::categories::{AddCategoryForm, ImageUpload, NewCategoryUpload};
use crate::repository::{CategoryReader, CategoryWriter, ProductReader};
use crate::services::projections::CategoryView;
use crate::services::{ServiceError, ServiceResult};

/// Loads the top-level categories with their direct subcategories.
pub fn load_category_tree<R>(repo: &R) -> ServiceResult<Vec<CategoryView>>
where
    R: CategoryReader + ?Sized,
{
    let categories = repo
        .list_categories(CategoryListQuery::new())
        .map_err(ServiceError::from)?;

    Ok(build_category_tree(&categories))
}

/// Creates a category, attaching its image when one is submitted.
pub fn create_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let NewCategoryUpload { category, image } = form
        .into_new_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let mut created = repo
        .create_category(&category)
        .map_err(ServiceError::from)?;

    if let Some(image) = image {
        created.image = Some(attach_image(repo, created.id, image)?);
    }

    Ok(created)
}

/// Renames or moves a category; a submitted image replaces the current one.
pub fn modify_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    category_id: i32,
    form: AddCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let NewCategoryUpload { category, image } = form
        .into_new_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if category.parent_id == Some(category_id) {
        return Err(ServiceError::Form(
            "category cannot be its own parent".to_string(),
        ));
    }

    let mut updated = repo
        .update_category(
            category_id,
            &UpdateCategory::new(category.title, category.parent_id),
        )
        .map_err(ServiceError::from)?;

    if let Some(image) = image {
        updated.image = Some(attach_image(repo, updated.id, image)?);
    }

    Ok(updated)
}

/// Deletes an empty category.
///
/// Categories that still hold subcategories or products are rejected with
/// [`ServiceError::Conflict`].
pub fn remove_category<R>(repo: &R, user: &AuthenticatedUser, category_id: i32) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter + ProductReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let children = repo
        .list_categories(CategoryListQuery::new().children_of(category_id))
        .map_err(ServiceError::from)?;
    let (products, _) = repo
        .list_products(
            ProductListQuery::new()
                .categories(vec![category_id])
                .paginate(1, 1),
        )
        .map_err(ServiceError::from)?;

    if !children.is_empty() || products > 0 {
        log::warn!("refusing to delete non-empty category {category_id}");
        return Err(ServiceError::Conflict);
    }

    repo.delete_category(category_id)
        .map_err(ServiceError::from)
}

fn attach_image<R>(
    repo: &R,
    category_id: i32,
    image: ImageUpload,
) -> ServiceResult<crate::domain::image::Image>
where
    R: CategoryWriter + ?Sized,
{
    let new_image = NewImage::new(
        category_id,
        product_image_path(category_id, &image.file_name),
        image.alt,
    );
    repo.set_category_image(&new_image)
        .map_err(ServiceError::from)
}

fn build_category_tree(categories: &[Category]) -> Vec<CategoryView> {
    let mut children_by_parent: HashMap<i32, Vec<Category>> = HashMap::new();

    for category in categories {
        if let Some(parent_id) = category.parent_id {
            children_by_parent
                .entry(parent_id)
                .or_default()
                .push(category.clone());
        }
    }

    categories
        .iter()
        .filter(|category| category.parent_id.is_none())
        .map(|root| {
            let children = children_by_parent
                .get(&root.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            CategoryView::from_parts(root, children)
        })
        .collect()
}
