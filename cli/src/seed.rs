use anyhow::{Context, Result};
use diesel::prelude::*;
use recipe_box_server::db::{self, DbPool};
use recipe_box_server::models::NewRecipe;
use recipe_box_server::schema::recipes;

struct SeedRecipe {
    title: &'static str,
    minutes: i32,
    description: &'static str,
}

const SAMPLE_RECIPES: &[SeedRecipe] = &[
    SeedRecipe {
        title: "卵焼き",
        minutes: 10,
        description: "卵・砂糖・塩を混ぜて焼くシンプルな定番。",
    },
    SeedRecipe {
        title: "味噌汁",
        minutes: 15,
        description: "出汁を取り、味噌を溶き、豆腐とわかめを加える。",
    },
];

/// Inserts the sample recipes when the table is empty, returning how many
/// rows were added. The count and the inserts share one transaction.
pub fn seed_if_empty(conn: &mut PgConnection) -> QueryResult<usize> {
    conn.transaction(|conn| {
        let existing: i64 = recipes::table.count().get_result(conn)?;
        if existing > 0 {
            return Ok(0);
        }

        let rows: Vec<NewRecipe<'_>> = SAMPLE_RECIPES
            .iter()
            .map(|r| NewRecipe {
                title: r.title,
                minutes: r.minutes,
                description: Some(r.description),
            })
            .collect();

        diesel::insert_into(recipes::table)
            .values(&rows)
            .execute(conn)
    })
}

/// Creates the schema if needed, then seeds an empty table.
pub fn init_db(database_url: &str) -> Result<()> {
    let pool: DbPool = db::create_pool(database_url, 1).context("Failed to connect to database")?;

    let applied = db::run_migrations(&pool).context("Failed to create schema")?;
    tracing::info!(applied, "schema up to date");

    let mut conn = pool.get().context("Failed to get DB connection")?;
    let inserted = seed_if_empty(&mut conn).context("Failed to insert sample recipes")?;

    if inserted == 0 {
        println!("OK: table already has data, skipped sample recipes");
    } else {
        println!("OK: created schema and inserted {inserted} sample recipes");
    }

    Ok(())
}
