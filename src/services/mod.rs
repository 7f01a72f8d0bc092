pub use pushkind_common::services::errors::{ServiceError, ServiceResult};

pub mod catalog;
pub mod categories;
pub mod products;
pub mod profile;
pub mod projections;
pub mod ratings;
pub mod reviews;
pub mod sales;
pub mod tags;
