//! Repository Module
//!
//! CRUD access to the SurrealDB tables.

pub mod product;
pub mod review;
pub mod user;

// Re-exports
pub use product::{ProductFilter, ProductRepository};
pub use review::ReviewRepository;
pub use user::UserRepository;

use shared::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Repository errors surface to handlers as the API error type
impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(resource) => AppError::not_found(resource),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

// =============================================================================
// ID Convention: the API exposes "table:id" strings; helpers accept either
// the prefixed or the bare form.
// =============================================================================

/// Strip a leading "table:" prefix from an id, if present
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    match id.split_once(':') {
        Some((tb, rest)) if tb == table => rest,
        _ => id,
    }
}

/// Build a record pointer from a table name and an id in either form
pub fn make_thing(table: &str, id: &str) -> Thing {
    Thing::from((table, strip_table_prefix(table, id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_helpers_accept_both_forms() {
        assert_eq!(strip_table_prefix("product", "product:abc"), "abc");
        assert_eq!(strip_table_prefix("product", "abc"), "abc");
        // foreign prefix stays untouched
        assert_eq!(strip_table_prefix("product", "review:abc"), "review:abc");

        assert_eq!(make_thing("product", "product:abc").to_string(), "product:abc");
        assert_eq!(make_thing("product", "abc").to_string(), "product:abc");
    }
}
