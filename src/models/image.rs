use diesel::prelude::*;

use crate::domain::image::{Image as DomainImage, NewImage as DomainNewImage};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product_images)]
pub struct ProductImage {
    pub id: i32,
    pub product_id: i32,
    pub path: String,
    pub alt: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_images)]
pub struct NewProductImage<'a> {
    pub product_id: i32,
    pub path: &'a str,
    pub alt: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::category_images)]
pub struct CategoryImage {
    pub id: i32,
    pub category_id: i32,
    pub path: String,
    pub alt: String,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::category_images)]
pub struct NewCategoryImage<'a> {
    pub category_id: i32,
    pub path: &'a str,
    pub alt: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::avatars)]
pub struct Avatar {
    pub id: i32,
    pub profile_id: i32,
    pub path: String,
    pub alt: String,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::avatars)]
pub struct NewAvatar<'a> {
    pub profile_id: i32,
    pub path: &'a str,
    pub alt: &'a str,
}

impl From<ProductImage> for DomainImage {
    fn from(value: ProductImage) -> Self {
        Self {
            id: value.id,
            owner_id: value.product_id,
            path: value.path,
            alt: value.alt,
        }
    }
}

impl From<CategoryImage> for DomainImage {
    fn from(value: CategoryImage) -> Self {
        Self {
            id: value.id,
            owner_id: value.category_id,
            path: value.path,
            alt: value.alt,
        }
    }
}

impl From<Avatar> for DomainImage {
    fn from(value: Avatar) -> Self {
        Self {
            id: value.id,
            owner_id: value.profile_id,
            path: value.path,
            alt: value.alt,
        }
    }
}

impl<'a> From<&'a DomainNewImage> for NewProductImage<'a> {
    fn from(value: &'a DomainNewImage) -> Self {
        Self {
            product_id: value.owner_id,
            path: value.path.as_str(),
            alt: value.alt.as_str(),
        }
    }
}

impl<'a> From<&'a DomainNewImage> for NewCategoryImage<'a> {
    fn from(value: &'a DomainNewImage) -> Self {
        Self {
            category_id: value.owner_id,
            path: value.path.as_str(),
            alt: value.alt.as_str(),
        }
    }
}

impl<'a> From<&'a DomainNewImage> for NewAvatar<'a> {
    fn from(value: &'a DomainNewImage) -> Self {
        Self {
            profile_id: value.owner_id,
            path: value.path.as_str(),
            alt: value.alt.as_str(),
        }
    }
}
