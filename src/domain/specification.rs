use serde::{Deserialize, Serialize};

/// Named characteristic of a product, e.g. `Weight: 1 kg`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Specification {
    pub id: i32,
    pub product_id: i32,
    pub name: String,
    pub value: String,
}

/// Payload used to (re)attach characteristics to a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSpecification {
    pub name: String,
    pub value: String,
}

impl NewSpecification {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
