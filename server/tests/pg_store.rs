//! `PgRecipeStore` against a real PostgreSQL database.
//!
//! Set `TEST_DATABASE_URL` to a disposable database to run these; without it
//! the tests return immediately. The `recipes` table is emptied first.

use diesel::prelude::*;
use recipe_box_server::db;
use recipe_box_server::models::{NewRecipe, RecipeChanges};
use recipe_box_server::schema::recipes;
use recipe_box_server::store::{Outcome, PgRecipeStore, RecipeStore, StoreError};

fn test_store() -> Option<PgRecipeStore> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return None;
    };

    let pool = db::create_pool(&url, 2).expect("failed to connect to test database");
    db::run_migrations(&pool).expect("failed to migrate test database");

    let mut conn = pool.get().unwrap();
    diesel::delete(recipes::table).execute(&mut conn).unwrap();

    Some(PgRecipeStore::new(pool))
}

fn new_recipe(title: &str, minutes: i32) -> NewRecipe<'_> {
    NewRecipe {
        title,
        minutes,
        description: Some(""),
    }
}

// One test so the shared table is never touched concurrently.
#[test]
fn test_pg_store_lifecycle() {
    let Some(store) = test_store() else {
        return;
    };

    // Create + newest-first listing
    let a = store.create(&new_recipe("A", 5)).unwrap();
    let b = store.create(&new_recipe("B", 10)).unwrap();
    let c = store.create(&new_recipe("C", 15)).unwrap();
    assert!(a < b && b < c);
    assert_eq!(store.count().unwrap(), 3);

    // Editing B must not move it
    let outcome = store
        .update(
            b,
            &RecipeChanges {
                title: "B",
                minutes: 99,
                description: Some("煮込む"),
            },
        )
        .unwrap();
    assert_eq!(outcome, Outcome::Applied);

    let listed: Vec<String> = store.list().unwrap().into_iter().map(|r| r.title).collect();
    assert_eq!(listed, vec!["C", "B", "A"]);

    let edited = store.get(b).unwrap().unwrap();
    assert_eq!(edited.minutes, 99);
    assert_eq!(edited.description_text(), "煮込む");

    // Missing ids are reported, not errors
    let changes = RecipeChanges {
        title: "X",
        minutes: 1,
        description: None,
    };
    assert_eq!(store.update(-1, &changes).unwrap(), Outcome::Missing);
    assert_eq!(store.delete(-1).unwrap(), Outcome::Missing);
    assert_eq!(store.get(-1).unwrap(), None);
    assert_eq!(store.count().unwrap(), 3);

    // The check constraint backs up validation
    let err = store.create(&new_recipe("zero", 0)).unwrap_err();
    assert!(matches!(err, StoreError::Constraint(_)), "{err:?}");

    assert_eq!(store.delete(a).unwrap(), Outcome::Applied);
    assert_eq!(store.count().unwrap(), 2);
}
