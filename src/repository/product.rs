use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sql_types::{Double, Nullable};
use diesel::sqlite::{Sqlite, SqliteConnection};
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::image::{Image as DomainImage, NewImage as DomainNewImage};
use crate::domain::product::{
    FREE_DELIVERY_THRESHOLD, NewProduct as DomainNewProduct, Product as DomainProduct,
    ProductListQuery, ProductSort, SortDirection, UpdateProduct as DomainUpdateProduct,
};
use crate::domain::specification::{
    NewSpecification as DomainNewSpecification, Specification as DomainSpecification,
};
use crate::domain::tag::Tag as DomainTag;
use crate::models::image::{NewProductImage, ProductImage as DbProductImage};
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
};
use crate::models::product_tag::NewProductTag;
use crate::models::specification::{
    NewSpecification as DbNewSpecification, Specification as DbSpecification,
};
use crate::models::tag::Tag as DbTag;
use crate::repository::{DieselRepository, ProductReader, ProductWriter};
use crate::schema::products;

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, product_id: i32) -> RepositoryResult<Option<DomainProduct>> {
        let mut conn = self.conn()?;

        let product = products::table
            .filter(products::id.eq(product_id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        let Some(product) = product else {
            return Ok(None);
        };

        let mut hydrated = hydrate_products(&mut conn, vec![product])?;
        Ok(hydrated.pop())
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        let mut conn = self.conn()?;

        let total = filtered_products(&query)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered_products(&query);

        items = match (query.sort, query.direction) {
            (ProductSort::Date, SortDirection::Inc) => items.order(products::created_at.asc()),
            (ProductSort::Date, SortDirection::Dec) => items.order(products::created_at.desc()),
            (ProductSort::Price, SortDirection::Inc) => items.order(products::price.asc()),
            (ProductSort::Price, SortDirection::Dec) => items.order(products::price.desc()),
            (ProductSort::Title, SortDirection::Inc) => items.order(products::title.asc()),
            (ProductSort::Title, SortDirection::Dec) => items.order(products::title.desc()),
        };
        items = items.then_order_by(products::id.asc());

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;

        if db_products.is_empty() {
            return Ok((total, Vec::new()));
        }

        let hydrated = hydrate_products(&mut conn, db_products)?;

        Ok((total, hydrated))
    }

    fn list_popular_products(&self, limit: usize) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::reviews;
        use diesel::dsl::count;

        let mut conn = self.conn()?;
        let limit = limit as i64;

        let ranked = reviews::table
            .group_by(reviews::product_id)
            .select((reviews::product_id, count(reviews::id)))
            .order((count(reviews::id).desc(), reviews::product_id.asc()))
            .limit(limit)
            .load::<(i32, i64)>(&mut conn)?;

        let mut ordered_ids: Vec<i32> = ranked.into_iter().map(|(id, _)| id).collect();

        let missing = limit - ordered_ids.len() as i64;
        if missing > 0 {
            let newest = products::table
                .filter(products::id.ne_all(ordered_ids.clone()))
                .order((products::created_at.desc(), products::id.desc()))
                .select(products::id)
                .limit(missing)
                .load::<i32>(&mut conn)?;
            ordered_ids.extend(newest);
        }

        if ordered_ids.is_empty() {
            return Ok(Vec::new());
        }

        let db_products = products::table
            .filter(products::id.eq_any(ordered_ids.clone()))
            .load::<DbProduct>(&mut conn)?;

        let mut by_id: HashMap<i32, DomainProduct> = hydrate_products(&mut conn, db_products)?
            .into_iter()
            .map(|product| (product.id, product))
            .collect();

        Ok(ordered_ids
            .into_iter()
            .filter_map(|id| by_id.remove(&id))
            .collect())
    }

    fn count_reviews(&self, product_id: i32) -> RepositoryResult<usize> {
        use crate::schema::reviews;

        let mut conn = self.conn()?;

        let total = reviews::table
            .filter(reviews::product_id.eq(product_id))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(total as usize)
    }

    fn average_rate(&self, product_id: i32) -> RepositoryResult<Option<f64>> {
        use crate::schema::reviews;
        use diesel::dsl::sql;

        let mut conn = self.conn()?;

        let average = reviews::table
            .filter(reviews::product_id.eq(product_id))
            .select(sql::<Nullable<Double>>("AVG(reviews.rate)"))
            .first::<Option<f64>>(&mut conn)?;

        Ok(average)
    }

    fn list_specifications(&self, product_id: i32) -> RepositoryResult<Vec<DomainSpecification>> {
        use crate::schema::specifications;

        let mut conn = self.conn()?;

        let rows = specifications::table
            .filter(specifications::product_id.eq(product_id))
            .order(specifications::id.asc())
            .load::<DbSpecification>(&mut conn)?;

        Ok(rows.into_iter().map(DomainSpecification::from).collect())
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        let mut conn = self.conn()?;
        let db_new = DbNewProduct::from(new_product);

        let created = diesel::insert_into(products::table)
            .values(&db_new)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into())
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        let updated = diesel::update(products::table.filter(products::id.eq(product_id)))
            .set(&db_updates)
            .get_result::<DbProduct>(&mut conn)
            .optional()?
            .ok_or(RepositoryError::NotFound)?;

        let mut hydrated = hydrate_products(&mut conn, vec![updated])?;
        hydrated.pop().ok_or(RepositoryError::NotFound)
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::{product_images, product_tags, reviews, sale_items, specifications};

        let mut conn = self.conn()?;

        // Owned rows are removed explicitly; SQLite only cascades with
        // `PRAGMA foreign_keys` enabled on the connection.
        conn.transaction::<(), RepositoryError, _>(|conn| {
            diesel::delete(product_tags::table.filter(product_tags::product_id.eq(product_id)))
                .execute(conn)?;
            diesel::delete(
                product_images::table.filter(product_images::product_id.eq(product_id)),
            )
            .execute(conn)?;
            diesel::delete(reviews::table.filter(reviews::product_id.eq(product_id)))
                .execute(conn)?;
            diesel::delete(
                specifications::table.filter(specifications::product_id.eq(product_id)),
            )
            .execute(conn)?;
            diesel::delete(sale_items::table.filter(sale_items::product_id.eq(product_id)))
                .execute(conn)?;

            let deleted = diesel::delete(products::table.filter(products::id.eq(product_id)))
                .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }

    fn replace_product_tags(
        &self,
        product_id: i32,
        tag_ids: &[i32],
    ) -> RepositoryResult<Vec<DomainTag>> {
        use crate::schema::product_tags;

        let mut conn = self.conn()?;

        conn.transaction::<Vec<DomainTag>, RepositoryError, _>(|conn| {
            diesel::delete(product_tags::table.filter(product_tags::product_id.eq(product_id)))
                .execute(conn)?;

            for tag_id in tag_ids {
                diesel::insert_or_ignore_into(product_tags::table)
                    .values(&NewProductTag {
                        product_id,
                        tag_id: *tag_id,
                    })
                    .execute(conn)?;
            }

            let mut tags = load_tags_for_products(conn, &[product_id])?;
            Ok(tags.remove(&product_id).unwrap_or_default())
        })
    }

    fn replace_product_images(
        &self,
        product_id: i32,
        images: &[DomainNewImage],
    ) -> RepositoryResult<Vec<DomainImage>> {
        use crate::schema::product_images;

        let mut conn = self.conn()?;

        conn.transaction::<Vec<DomainImage>, RepositoryError, _>(|conn| {
            diesel::delete(product_images::table.filter(product_images::product_id.eq(product_id)))
                .execute(conn)?;

            let mut saved = Vec::with_capacity(images.len());
            for image in images {
                let row = NewProductImage {
                    product_id,
                    ..NewProductImage::from(image)
                };
                let created = diesel::insert_into(product_images::table)
                    .values(&row)
                    .get_result::<DbProductImage>(conn)?;
                saved.push(DomainImage::from(created));
            }

            Ok(saved)
        })
    }

    fn replace_specifications(
        &self,
        product_id: i32,
        specifications: &[DomainNewSpecification],
    ) -> RepositoryResult<Vec<DomainSpecification>> {
        use crate::schema::specifications as specs;

        let mut conn = self.conn()?;

        conn.transaction::<Vec<DomainSpecification>, RepositoryError, _>(|conn| {
            diesel::delete(specs::table.filter(specs::product_id.eq(product_id))).execute(conn)?;

            let rows: Vec<DbNewSpecification> = specifications
                .iter()
                .map(|spec| DbNewSpecification {
                    product_id,
                    name: spec.name.as_str(),
                    value: spec.value.as_str(),
                })
                .collect();

            let mut saved = Vec::with_capacity(rows.len());
            for row in &rows {
                let created = diesel::insert_into(specs::table)
                    .values(row)
                    .get_result::<DbSpecification>(conn)?;
                saved.push(DomainSpecification::from(created));
            }

            Ok(saved)
        })
    }
}

fn filtered_products(query: &ProductListQuery) -> products::BoxedQuery<'static, Sqlite> {
    use crate::schema::product_tags;

    let mut items = products::table.into_boxed::<Sqlite>();

    if let Some(ids) = query.ids.as_ref() {
        items = items.filter(products::id.eq_any(ids.clone()));
    }

    if let Some(category_ids) = query.category_ids.as_ref() {
        items = items.filter(products::category_id.eq_any(category_ids.clone()));
    }

    if let Some(tag_ids) = query.tag_ids.as_ref() {
        let tagged = product_tags::table
            .filter(product_tags::tag_id.eq_any(tag_ids.clone()))
            .select(product_tags::product_id);
        items = items.filter(products::id.eq_any(tagged));
    }

    if let Some(term) = query.search.as_ref() {
        let pattern = format!("%{}%", term);
        items = items.filter(products::title.like(pattern));
    }

    if let Some(min_price) = query.min_price {
        items = items.filter(products::price.ge(min_price));
    }

    if let Some(max_price) = query.max_price {
        items = items.filter(products::price.le(max_price));
    }

    if query.free_delivery_only {
        items = items.filter(products::price.gt(FREE_DELIVERY_THRESHOLD));
    }

    if query.available_only {
        items = items.filter(products::count.gt(0));
    }

    if let Some(max_count) = query.max_count {
        items = items.filter(products::count.le(max_count));
    }

    items
}

/// Convert product rows to domain products with their tags and images attached.
fn hydrate_products(
    conn: &mut SqliteConnection,
    db_products: Vec<DbProduct>,
) -> RepositoryResult<Vec<DomainProduct>> {
    let product_ids: Vec<i32> = db_products.iter().map(|product| product.id).collect();
    let mut tag_map = load_tags_for_products(conn, &product_ids)?;
    let mut image_map = load_images_for_products(conn, &product_ids)?;

    let mut hydrated = Vec::with_capacity(db_products.len());
    for db_product in db_products {
        let mut domain: DomainProduct = db_product.into();
        domain.tags = tag_map.remove(&domain.id).unwrap_or_default();
        domain.images = image_map.remove(&domain.id).unwrap_or_default();
        hydrated.push(domain);
    }

    Ok(hydrated)
}

fn load_tags_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DomainTag>>> {
    use crate::schema::{product_tags, tags};

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_tags::table
        .inner_join(tags::table)
        .filter(product_tags::product_id.eq_any(product_ids))
        .order((tags::name.asc(), tags::id.asc()))
        .select((product_tags::product_id, DbTag::as_select()))
        .load::<(i32, DbTag)>(conn)?;

    let mut map: HashMap<i32, Vec<DomainTag>> = HashMap::new();
    for (product_id, tag) in rows {
        map.entry(product_id).or_default().push(tag.into());
    }

    Ok(map)
}

fn load_images_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DomainImage>>> {
    use crate::schema::product_images;

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_images::table
        .filter(product_images::product_id.eq_any(product_ids))
        .order(product_images::id.asc())
        .load::<DbProductImage>(conn)?;

    let mut map: HashMap<i32, Vec<DomainImage>> = HashMap::new();
    for row in rows {
        map.entry(row.product_id).or_default().push(row.into());
    }

    Ok(map)
}
