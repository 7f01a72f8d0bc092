use diesel::prelude::*;

use crate::domain::specification::Specification as DomainSpecification;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::specifications)]
pub struct Specification {
    pub id: i32,
    pub product_id: i32,
    pub name: String,
    pub value: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::specifications)]
pub struct NewSpecification<'a> {
    pub product_id: i32,
    pub name: &'a str,
    pub value: &'a str,
}

impl From<Specification> for DomainSpecification {
    fn from(value: Specification) -> Self {
        Self {
            id: value.id,
            product_id: value.product_id,
            name: value.name,
            value: value.value,
        }
    }
}
