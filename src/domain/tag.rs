use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of a tag shared by products and categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    /// Unique identifier of the tag.
    pub id: i32,
    /// Human-readable name of the tag.
    pub name: String,
    /// Timestamp for when the tag record was created.
    pub created_at: NaiveDateTime,
}

/// Query definition used to list tags.
#[derive(Debug, Clone, Default)]
pub struct TagListQuery {
    /// Restrict the results to the tags propagated into this category.
    pub category_id: Option<i32>,
    /// Optional substring search applied to tag names.
    pub search: Option<String>,
}

impl TagListQuery {
    /// Construct a query that targets every tag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only return tags collected by the given category.
    pub fn category(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Filter the results by a search term applied to the tag name.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}
