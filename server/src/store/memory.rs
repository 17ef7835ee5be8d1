use super::{Outcome, RecipeStore, StoreError};
use crate::models::{NewRecipe, Recipe, RecipeChanges};
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Recipe>,
    next_id: i32,
}

/// In-process store with the same ordering and `minutes >= 1` rule as the
/// database table. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryRecipeStore {
    table: Mutex<Table>,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Table> {
        // Rows change only after every check passes, so a poisoned table is still consistent.
        self.table
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn check_minutes(minutes: i32) -> Result<(), StoreError> {
    if minutes < 1 {
        return Err(StoreError::Constraint(format!(
            "new row violates check constraint \"ck_recipes_minutes_ge_1\" (minutes = {minutes})"
        )));
    }
    Ok(())
}

impl RecipeStore for MemoryRecipeStore {
    fn create(&self, recipe: &NewRecipe<'_>) -> Result<i32, StoreError> {
        check_minutes(recipe.minutes)?;

        let mut table = self.lock();
        table.next_id += 1;
        let id = table.next_id;
        table.rows.push(Recipe {
            id,
            title: recipe.title.to_string(),
            minutes: recipe.minutes,
            description: recipe.description.map(str::to_string),
            created_at: Utc::now(),
        });

        Ok(id)
    }

    fn list(&self) -> Result<Vec<Recipe>, StoreError> {
        let mut rows = self.lock().rows.clone();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(rows)
    }

    fn get(&self, id: i32) -> Result<Option<Recipe>, StoreError> {
        Ok(self.lock().rows.iter().find(|r| r.id == id).cloned())
    }

    fn update(&self, id: i32, changes: &RecipeChanges<'_>) -> Result<Outcome, StoreError> {
        check_minutes(changes.minutes)?;

        let mut table = self.lock();
        let Some(row) = table.rows.iter_mut().find(|r| r.id == id) else {
            return Ok(Outcome::Missing);
        };

        row.title = changes.title.to_string();
        row.minutes = changes.minutes;
        row.description = changes.description.map(str::to_string);

        Ok(Outcome::Applied)
    }

    fn delete(&self, id: i32) -> Result<Outcome, StoreError> {
        let mut table = self.lock();
        let before = table.rows.len();
        table.rows.retain(|r| r.id != id);

        if table.rows.len() == before {
            Ok(Outcome::Missing)
        } else {
            Ok(Outcome::Applied)
        }
    }

    fn count(&self) -> Result<i64, StoreError> {
        Ok(self.lock().rows.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_recipe(title: &str, minutes: i32) -> NewRecipe<'_> {
        NewRecipe {
            title,
            minutes,
            description: Some(""),
        }
    }

    #[test]
    fn test_ids_are_assigned_in_order() {
        let store = MemoryRecipeStore::new();
        assert_eq!(store.create(&new_recipe("a", 1)).unwrap(), 1);
        assert_eq!(store.create(&new_recipe("b", 2)).unwrap(), 2);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_list_is_newest_first_even_with_equal_timestamps() {
        let store = MemoryRecipeStore::new();
        for title in ["A", "B", "C"] {
            store.create(&new_recipe(title, 5)).unwrap();
        }

        // Force a tie so ordering falls back to id.
        {
            let mut table = store.lock();
            let stamp = table.rows[0].created_at;
            for row in table.rows.iter_mut() {
                row.created_at = stamp;
            }
        }

        let titles: Vec<String> = store.list().unwrap().into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_update_keeps_created_at() {
        let store = MemoryRecipeStore::new();
        let id = store.create(&new_recipe("味噌汁", 15)).unwrap();
        let before = store.get(id).unwrap().unwrap();

        let outcome = store
            .update(
                id,
                &RecipeChanges {
                    title: "味噌汁 (赤)",
                    minutes: 20,
                    description: Some("赤味噌で"),
                },
            )
            .unwrap();
        assert_eq!(outcome, Outcome::Applied);

        let after = store.get(id).unwrap().unwrap();
        assert_eq!(after.title, "味噌汁 (赤)");
        assert_eq!(after.minutes, 20);
        assert_eq!(after.description_text(), "赤味噌で");
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn test_missing_rows_report_missing() {
        let store = MemoryRecipeStore::new();
        store.create(&new_recipe("a", 1)).unwrap();

        let changes = RecipeChanges {
            title: "x",
            minutes: 1,
            description: None,
        };
        assert_eq!(store.update(99, &changes).unwrap(), Outcome::Missing);
        assert_eq!(store.delete(99).unwrap(), Outcome::Missing);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_minutes_constraint_is_enforced() {
        let store = MemoryRecipeStore::new();
        let err = store.create(&new_recipe("a", 0)).unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
        assert_eq!(store.count().unwrap(), 0);
    }
}
