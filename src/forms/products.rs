use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::NewProduct;
use crate::domain::specification::NewSpecification;
use crate::forms::categories::{CategoryFormError, ImageForm, ImageUpload};
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};

/// Maximum allowed length for a product title.
const TITLE_MAX_LEN: usize = 128;
const TITLE_MAX_LEN_VALIDATOR: u64 = TITLE_MAX_LEN as u64;

/// Maximum allowed length for the catalog card description.
const SHORT_DESCRIPTION_MAX_LEN: usize = 512;
const SHORT_DESCRIPTION_MAX_LEN_VALIDATOR: u64 = SHORT_DESCRIPTION_MAX_LEN as u64;

/// Maximum allowed length for a tag name.
const TAG_MAX_LEN: usize = 64;

/// Maximum allowed length for a specification name or value.
const SPECIFICATION_MAX_LEN: usize = 128;
const SPECIFICATION_MAX_LEN_VALIDATOR: u64 = SPECIFICATION_MAX_LEN as u64;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided title is empty after sanitization.
    #[error("product title cannot be empty")]
    EmptyTitle,
    /// The price is negative or not a number.
    #[error("invalid product price `{value}`")]
    InvalidPrice { value: f64 },
    /// A tag name exceeds the allowed length.
    #[error("tag `{value}` is too long")]
    TagTooLong { value: String },
    /// A specification has an empty name after sanitization.
    #[error("specification #{index} has no name")]
    EmptySpecificationName { index: usize },
    /// An attached image is invalid.
    #[error(transparent)]
    Image(#[from] CategoryFormError),
}

/// Named characteristic submitted with a product.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SpecificationForm {
    #[validate(length(min = 1, max = SPECIFICATION_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(max = SPECIFICATION_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub value: String,
}

/// JSON payload used to create or update a product.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveProductForm {
    /// Category the product is listed in.
    #[validate(range(min = 1))]
    pub category_id: i32,
    /// Unit price, must not be negative.
    pub price: f64,
    /// Units in stock.
    #[validate(range(min = 0))]
    pub count: i32,
    #[validate(length(min = 1, max = TITLE_MAX_LEN_VALIDATOR))]
    pub title: String,
    #[validate(length(max = SHORT_DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    /// Tag names; unknown tags are created on save.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Images to attach to the product.
    #[validate(nested)]
    #[serde(default)]
    pub images: Vec<ImageForm>,
    /// Replaces the full list of product characteristics.
    #[validate(nested)]
    #[serde(default)]
    pub specifications: Vec<SpecificationForm>,
}

/// Normalized payload produced by [`SaveProductForm`].
#[derive(Debug)]
pub struct ProductUpload {
    pub product: NewProduct,
    /// Sanitized, deduplicated tag names in submission order.
    pub tag_names: Vec<String>,
    pub images: Vec<ImageUpload>,
    pub specifications: Vec<NewSpecification>,
}

impl SaveProductForm {
    /// Validates and sanitizes the payload into domain types.
    pub fn into_upload(self) -> ProductFormResult<ProductUpload> {
        self.validate()?;

        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ProductFormError::InvalidPrice { value: self.price });
        }

        let title = sanitize_inline_text(&self.title);
        if title.is_empty() {
            return Err(ProductFormError::EmptyTitle);
        }

        let product = NewProduct::new(self.category_id, title, self.price, self.count)
            .with_short_description(sanitize_multiline_text(&self.short_description))
            .with_description(sanitize_multiline_text(&self.description));

        let tag_names = normalize_tag_names(&self.tags)?;

        let images = self
            .images
            .into_iter()
            .map(ImageForm::into_upload)
            .collect::<Result<Vec<_>, _>>()?;

        let mut specifications = Vec::with_capacity(self.specifications.len());
        for (index, specification) in self.specifications.iter().enumerate() {
            let name = sanitize_inline_text(&specification.name);
            if name.is_empty() {
                return Err(ProductFormError::EmptySpecificationName { index });
            }
            specifications.push(NewSpecification::new(
                name,
                sanitize_inline_text(&specification.value),
            ));
        }

        Ok(ProductUpload {
            product,
            tag_names,
            images,
            specifications,
        })
    }
}

fn normalize_tag_names(raw: &[String]) -> ProductFormResult<Vec<String>> {
    let mut names: Vec<String> = Vec::with_capacity(raw.len());
    for value in raw {
        let name = sanitize_inline_text(value);
        if name.is_empty() || names.contains(&name) {
            continue;
        }
        if name.chars().count() > TAG_MAX_LEN {
            return Err(ProductFormError::TagTooLong { value: name });
        }
        names.push(name);
    }
    Ok(names)
}
