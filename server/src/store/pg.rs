use super::{Outcome, RecipeStore, StoreError};
use crate::db::DbPool;
use crate::models::{NewRecipe, Recipe, RecipeChanges};
use crate::schema::recipes;
use diesel::prelude::*;

/// Diesel-backed store over the `recipes` table.
#[derive(Clone)]
pub struct PgRecipeStore {
    pool: DbPool,
}

impl PgRecipeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn rows_to_outcome(rows: usize) -> Outcome {
    if rows == 0 {
        Outcome::Missing
    } else {
        Outcome::Applied
    }
}

impl RecipeStore for PgRecipeStore {
    fn create(&self, recipe: &NewRecipe<'_>) -> Result<i32, StoreError> {
        let mut conn = self.pool.get()?;

        let id = conn.transaction(|conn| {
            diesel::insert_into(recipes::table)
                .values(recipe)
                .returning(recipes::id)
                .get_result::<i32>(conn)
        })?;

        Ok(id)
    }

    fn list(&self) -> Result<Vec<Recipe>, StoreError> {
        let mut conn = self.pool.get()?;

        let rows = recipes::table
            .select(Recipe::as_select())
            .order((recipes::created_at.desc(), recipes::id.desc()))
            .load(&mut conn)?;

        Ok(rows)
    }

    fn get(&self, id: i32) -> Result<Option<Recipe>, StoreError> {
        let mut conn = self.pool.get()?;

        let row = recipes::table
            .find(id)
            .select(Recipe::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row)
    }

    fn update(&self, id: i32, changes: &RecipeChanges<'_>) -> Result<Outcome, StoreError> {
        let mut conn = self.pool.get()?;

        let rows = conn.transaction(|conn| {
            diesel::update(recipes::table.find(id))
                .set(changes)
                .execute(conn)
        })?;

        Ok(rows_to_outcome(rows))
    }

    fn delete(&self, id: i32) -> Result<Outcome, StoreError> {
        let mut conn = self.pool.get()?;

        let rows =
            conn.transaction(|conn| diesel::delete(recipes::table.find(id)).execute(conn))?;

        Ok(rows_to_outcome(rows))
    }

    fn count(&self) -> Result<i64, StoreError> {
        let mut conn = self.pool.get()?;
        let total = recipes::table.count().get_result(&mut conn)?;
        Ok(total)
    }
}
