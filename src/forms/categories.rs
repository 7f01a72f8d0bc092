use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::NewCategory;
use crate::forms::{sanitize_file_name, sanitize_inline_text};

/// Maximum length allowed for a category title.
const TITLE_MAX_LEN: usize = 128;
const TITLE_MAX_LEN_VALIDATOR: u64 = TITLE_MAX_LEN as u64;

/// Maximum length allowed for image alternative text.
const ALT_MAX_LEN: usize = 250;
const ALT_MAX_LEN_VALIDATOR: u64 = ALT_MAX_LEN as u64;

/// Result type returned by the category form helpers.
pub type CategoryFormResult<T> = Result<T, CategoryFormError>;

/// Errors that can occur while processing category forms.
#[derive(Debug, Error)]
pub enum CategoryFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided title is empty after sanitization.
    #[error("category title cannot be empty")]
    EmptyTitle,
    /// The image file name is empty after sanitization.
    #[error("image file name cannot be empty")]
    EmptyFileName,
}

/// Image reference submitted alongside a category or product.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImageForm {
    /// File name of an image already placed in the media storage.
    #[validate(length(min = 1))]
    pub file_name: String,
    /// Alternative text.
    #[validate(length(max = ALT_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub alt: String,
}

/// Sanitized image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub alt: String,
}

impl ImageForm {
    /// Validates and sanitizes the image reference.
    pub fn into_upload(self) -> CategoryFormResult<ImageUpload> {
        self.validate()?;

        let file_name = sanitize_file_name(&self.file_name);
        if file_name.is_empty() {
            return Err(CategoryFormError::EmptyFileName);
        }

        Ok(ImageUpload {
            file_name,
            alt: sanitize_inline_text(&self.alt),
        })
    }
}

/// Normalized payload produced by the "Add category" form.
#[derive(Debug)]
pub struct NewCategoryUpload {
    pub category: NewCategory,
    pub image: Option<ImageUpload>,
}

/// JSON payload used to add a category.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddCategoryForm {
    /// Title entered by the operator.
    #[validate(length(min = 1, max = TITLE_MAX_LEN_VALIDATOR))]
    pub title: String,
    /// Optional parent category identifier.
    #[validate(range(min = 1))]
    #[serde(default)]
    pub parent_id: Option<i32>,
    /// Optional image shown next to the title.
    #[validate(nested)]
    #[serde(default)]
    pub image: Option<ImageForm>,
}

impl AddCategoryForm {
    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self) -> CategoryFormResult<NewCategoryUpload> {
        self.validate()?;

        let title = sanitize_inline_text(&self.title);
        if title.is_empty() {
            return Err(CategoryFormError::EmptyTitle);
        }

        let mut category = NewCategory::new(title);
        if let Some(parent_id) = self.parent_id {
            category = category.with_parent_id(parent_id);
        }

        let image = self.image.map(ImageForm::into_upload).transpose()?;

        Ok(NewCategoryUpload { category, image })
    }
}
