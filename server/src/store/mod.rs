//! Persistence for recipe records.
//!
//! Handlers only see [`RecipeStore`]. [`PgRecipeStore`] is the production
//! implementation; [`MemoryRecipeStore`] mirrors its ordering and constraint
//! behavior without a database.

mod memory;
mod pg;

pub use memory::MemoryRecipeStore;
pub use pg::PgRecipeStore;

use crate::models::{NewRecipe, Recipe, RecipeChanges};
use thiserror::Error;

/// Whether an update or delete touched a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Missing,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database connection unavailable: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("constraint violated: {0}")]
    Constraint(String),

    #[error("query failed: {0}")]
    Query(diesel::result::Error),
}

impl From<diesel::result::Error> for StoreError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};

        match err {
            Error::DatabaseError(
                DatabaseErrorKind::CheckViolation | DatabaseErrorKind::NotNullViolation,
                info,
            ) => StoreError::Constraint(info.message().to_string()),
            other => StoreError::Query(other),
        }
    }
}

/// Single-table recipe persistence. Each call is its own transaction.
pub trait RecipeStore: Send + Sync {
    fn create(&self, recipe: &NewRecipe<'_>) -> Result<i32, StoreError>;

    /// All recipes, newest first (`created_at DESC, id DESC`).
    fn list(&self) -> Result<Vec<Recipe>, StoreError>;

    fn get(&self, id: i32) -> Result<Option<Recipe>, StoreError>;

    fn update(&self, id: i32, changes: &RecipeChanges<'_>) -> Result<Outcome, StoreError>;

    fn delete(&self, id: i32) -> Result<Outcome, StoreError>;

    fn count(&self) -> Result<i64, StoreError>;
}
