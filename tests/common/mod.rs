//! Helpers for integration tests.

#![allow(dead_code)]

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pushkind_common::db::{DbPool, establish_connection_pool};

use pushkind_shop::domain::category::{Category, NewCategory};
use pushkind_shop::domain::product::{NewProduct, Product};
use pushkind_shop::repository::{CategoryWriter, DieselRepository, ProductWriter};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Throwaway SQLite database with the storefront schema applied.
pub struct TestDb {
    filename: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        std::fs::remove_file(filename).ok(); // Clean up old DB

        let pool =
            establish_connection_pool(filename).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            filename: filename.to_string(),
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        std::fs::remove_file(&self.filename).ok();
        std::fs::remove_file(format!("{}-shm", &self.filename)).ok();
        std::fs::remove_file(format!("{}-wal", &self.filename)).ok();
    }
}

pub fn seed_category(repo: &DieselRepository, title: &str) -> Category {
    repo.create_category(&NewCategory::new(title))
        .expect("category created")
}

pub fn seed_product(repo: &DieselRepository, category_id: i32, title: &str, price: f64) -> Product {
    repo.create_product(&NewProduct::new(category_id, title, price, 5))
        .expect("product created")
}
