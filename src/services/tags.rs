use serde::Deserialize;

use crate::domain::tag::TagListQuery;
use crate::repository::TagReader;
use crate::services::projections::TagView;
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by `GET /api/tags`.
#[derive(Debug, Default, Deserialize)]
pub struct TagsQuery {
    /// Restrict the list to the tags collected by this category.
    pub category: Option<i32>,
    /// Optional substring search applied to tag names.
    pub search: Option<String>,
}

/// Lists every tag, or the tags propagated into a category.
pub fn load_tags<R>(repo: &R, query: TagsQuery) -> ServiceResult<Vec<TagView>>
where
    R: TagReader + ?Sized,
{
    let mut list_query = TagListQuery::new();

    if let Some(category_id) = query.category {
        list_query = list_query.category(category_id);
    }

    if let Some(term) = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
    {
        list_query = list_query.search(term);
    }

    let tags = repo.list_tags(list_query).map_err(ServiceError::from)?;

    Ok(tags.iter().map(TagView::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::tag::Tag;
    use crate::repository::mock::MockShopRepository;

    #[test]
    fn load_tags_restricts_to_category() {
        let mut repo = MockShopRepository::new();
        repo.expect_list_tags()
            .withf(|query| query.category_id == Some(3) && query.search.is_none())
            .times(1)
            .returning(|_| {
                Ok(vec![Tag {
                    id: 1,
                    name: "steel".to_string(),
                    created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                        .and_then(|date| date.and_hms_opt(0, 0, 0))
                        .unwrap_or_default(),
                }])
            });

        let query = TagsQuery {
            category: Some(3),
            search: Some("  ".to_string()),
        };
        let tags = load_tags(&repo, query).expect("tags");

        assert_eq!(
            tags,
            vec![TagView {
                id: 1,
                name: "steel".to_string()
            }]
        );
    }
}
