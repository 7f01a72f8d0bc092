use serde::{Deserialize, Serialize};

/// Image attached to a product, a category or a profile avatar.
///
/// Only the path relative to the media root is stored; the file itself is
/// managed outside of this service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Image {
    /// Unique identifier of the image record.
    pub id: i32,
    /// Identifier of the owning product, category or profile.
    pub owner_id: i32,
    /// Storage path relative to the media root.
    pub path: String,
    /// Alternative text rendered by the frontend.
    pub alt: String,
}

impl Image {
    /// Public URL of the image.
    ///
    /// Always prefixes the stored path with `/`, even when it already starts
    /// with one.
    pub fn src(&self) -> String {
        format!("/{}", self.path)
    }
}

/// Payload required to attach a new image to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    /// Identifier of the owning product, category or profile.
    pub owner_id: i32,
    /// Storage path relative to the media root.
    pub path: String,
    /// Alternative text rendered by the frontend.
    pub alt: String,
}

impl NewImage {
    pub fn new(owner_id: i32, path: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            owner_id,
            path: path.into(),
            alt: alt.into(),
        }
    }
}

/// Storage path for a product or category preview image.
pub fn product_image_path(owner_id: i32, file_name: &str) -> String {
    format!("products/product_{owner_id}/preview/{file_name}")
}

/// Storage path for a profile avatar.
pub fn avatar_image_path(profile_id: i32, file_name: &str) -> String {
    format!("avatars/user_{profile_id}/{file_name}")
}
