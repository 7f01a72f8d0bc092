use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::category::{
    Category as DomainCategory, CategoryListQuery, NewCategory as DomainNewCategory,
    UpdateCategory as DomainUpdateCategory,
};
use crate::domain::image::{Image as DomainImage, NewImage as DomainNewImage};
use crate::models::category::{
    Category as DbCategory, NewCategory as DbNewCategory, UpdateCategory as DbUpdateCategory,
};
use crate::models::image::{CategoryImage as DbCategoryImage, NewCategoryImage};
use crate::models::product_tag::NewCategoryTag;
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository};

impl CategoryReader for DieselRepository {
    fn get_category_by_id(&self, category_id: i32) -> RepositoryResult<Option<DomainCategory>> {
        use crate::schema::{categories, category_images};

        let mut conn = self.conn()?;

        let category = categories::table
            .left_join(category_images::table)
            .filter(categories::id.eq(category_id))
            .first::<(DbCategory, Option<DbCategoryImage>)>(&mut conn)
            .optional()?;

        Ok(category.map(DomainCategory::from))
    }

    fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<DomainCategory>> {
        use crate::schema::{categories, category_images};

        let mut conn = self.conn()?;

        let mut items = categories::table
            .left_join(category_images::table)
            .into_boxed::<diesel::sqlite::Sqlite>();

        if query.roots_only {
            items = items.filter(categories::parent_id.is_null());
        }

        if let Some(parent_id) = query.parent_id {
            items = items.filter(categories::parent_id.eq(parent_id));
        }

        let rows = items
            .order((categories::title.asc(), categories::id.asc()))
            .load::<(DbCategory, Option<DbCategoryImage>)>(&mut conn)?;

        Ok(rows.into_iter().map(DomainCategory::from).collect())
    }

    fn list_category_tag_ids(&self, category_id: i32) -> RepositoryResult<Vec<i32>> {
        use crate::schema::category_tags;

        let mut conn = self.conn()?;

        let tag_ids = category_tags::table
            .filter(category_tags::category_id.eq(category_id))
            .order(category_tags::tag_id.asc())
            .select(category_tags::tag_id)
            .load::<i32>(&mut conn)?;

        Ok(tag_ids)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(
        &self,
        new_category: &DomainNewCategory,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        if let Some(parent_id) = new_category.parent_id {
            ensure_category_exists(&mut conn, parent_id)?;
        }

        let insertable = DbNewCategory::from(new_category);

        let created = diesel::insert_into(categories::table)
            .values(&insertable)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(DomainCategory::from((created, None)))
    }

    fn update_category(
        &self,
        category_id: i32,
        updates: &DomainUpdateCategory,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::{categories, category_images};

        let mut conn = self.conn()?;

        if let Some(parent_id) = updates.parent_id {
            ensure_category_exists(&mut conn, parent_id)?;
        }

        let db_updates = DbUpdateCategory::from(updates);

        let updated = diesel::update(categories::table.filter(categories::id.eq(category_id)))
            .set(&db_updates)
            .get_result::<DbCategory>(&mut conn)
            .optional()?
            .ok_or(RepositoryError::NotFound)?;

        let image = category_images::table
            .filter(category_images::category_id.eq(category_id))
            .first::<DbCategoryImage>(&mut conn)
            .optional()?;

        Ok(DomainCategory::from((updated, image)))
    }

    fn delete_category(&self, category_id: i32) -> RepositoryResult<()> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(categories::table.filter(categories::id.eq(category_id)))
            .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn add_category_tag(&self, category_id: i32, tag_id: i32) -> RepositoryResult<bool> {
        use crate::schema::category_tags;

        let mut conn = self.conn()?;

        let inserted = diesel::insert_or_ignore_into(category_tags::table)
            .values(&NewCategoryTag {
                category_id,
                tag_id,
            })
            .execute(&mut conn)?;

        Ok(inserted > 0)
    }

    fn set_category_image(&self, image: &DomainNewImage) -> RepositoryResult<DomainImage> {
        use crate::schema::category_images;

        let mut conn = self.conn()?;

        ensure_category_exists(&mut conn, image.owner_id)?;

        let row = NewCategoryImage::from(image);

        let saved = diesel::insert_into(category_images::table)
            .values(&row)
            .on_conflict(category_images::category_id)
            .do_update()
            .set(&row)
            .get_result::<DbCategoryImage>(&mut conn)?;

        Ok(saved.into())
    }
}

fn ensure_category_exists(
    conn: &mut diesel::sqlite::SqliteConnection,
    category_id: i32,
) -> RepositoryResult<()> {
    use crate::schema::categories;
    use diesel::dsl::{exists, select};

    let exists = select(exists(
        categories::table.filter(categories::id.eq(category_id)),
    ))
    .get_result::<bool>(conn)?;

    if exists {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}
