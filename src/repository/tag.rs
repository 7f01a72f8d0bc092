use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::tag::{Tag as DomainTag, TagListQuery};
use crate::models::tag::{NewTag as DbNewTag, Tag as DbTag};
use crate::repository::{DieselRepository, TagReader, TagWriter};

impl TagReader for DieselRepository {
    fn list_tags(&self, query: TagListQuery) -> RepositoryResult<Vec<DomainTag>> {
        use crate::schema::{category_tags, tags};

        let mut conn = self.conn()?;

        let mut items = tags::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_id) = query.category_id {
            let collected = category_tags::table
                .filter(category_tags::category_id.eq(category_id))
                .select(category_tags::tag_id);
            items = items.filter(tags::id.eq_any(collected));
        }

        if let Some(search) = query.search.as_ref() {
            let pattern = format!("%{}%", search);
            items = items.filter(tags::name.like(pattern));
        }

        let db_tags = items
            .order((tags::name.asc(), tags::id.asc()))
            .load::<DbTag>(&mut conn)?;

        Ok(db_tags.into_iter().map(DomainTag::from).collect())
    }
}

impl TagWriter for DieselRepository {
    fn ensure_tags(&self, names: &[String]) -> RepositoryResult<Vec<DomainTag>> {
        use crate::schema::tags;

        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;

        conn.transaction::<Vec<DomainTag>, RepositoryError, _>(|conn| {
            for name in names {
                diesel::insert_or_ignore_into(tags::table)
                    .values(&DbNewTag {
                        name: name.as_str(),
                    })
                    .execute(conn)?;
            }

            let db_tags = tags::table
                .filter(tags::name.eq_any(names))
                .order((tags::name.asc(), tags::id.asc()))
                .load::<DbTag>(conn)?;

            Ok(db_tags.into_iter().map(DomainTag::from).collect())
        })
    }
}
