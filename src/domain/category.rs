use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::image::Image;

/// Domain representation of a catalog category.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Category {
    /// Unique identifier of the category.
    pub id: i32,
    /// Optional identifier of the parent category; `None` for top-level ones.
    pub parent_id: Option<i32>,
    /// Title shown in the catalog menu.
    pub title: String,
    /// Optional image shown next to the title.
    pub image: Option<Image>,
    /// Timestamp for when the category record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the category record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    /// Optional identifier of the parent category.
    pub parent_id: Option<i32>,
    /// Title shown in the catalog menu.
    pub title: String,
    /// Timestamp captured when the category payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewCategory {
    /// Build a new top-level category payload with the current timestamp.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            parent_id: None,
            title: title.into(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    /// Nest the category under `parent_id`.
    pub fn with_parent_id(mut self, parent_id: i32) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

/// Patch data applied when updating an existing category.
#[derive(Debug, Clone)]
pub struct UpdateCategory {
    /// Updated title for the category.
    pub title: String,
    /// New parent; `None` turns the category into a top-level one.
    pub parent_id: Option<i32>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateCategory {
    pub fn new(title: impl Into<String>, parent_id: Option<i32>) -> Self {
        Self {
            title: title.into(),
            parent_id,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

/// Query definition used to list categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryListQuery {
    /// Only return categories nested directly under this parent.
    pub parent_id: Option<i32>,
    /// Only return top-level categories.
    pub roots_only: bool,
}

impl CategoryListQuery {
    /// Construct a query that targets every category.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the results to top-level categories.
    pub fn roots(mut self) -> Self {
        self.roots_only = true;
        self
    }

    /// Restrict the results to direct children of `parent_id`.
    pub fn children_of(mut self, parent_id: i32) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}
