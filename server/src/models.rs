use chrono::{DateTime, Utc};
use diesel::prelude::*;

#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Recipe {
    pub id: i32,
    pub title: String,
    pub minutes: i32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    /// Description as shown to users; a NULL column reads as empty.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub title: &'a str,
    pub minutes: i32,
    pub description: Option<&'a str>,
}

/// Editable columns. `id` and `created_at` never change after insert.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(treat_none_as_null = true)]
pub struct RecipeChanges<'a> {
    pub title: &'a str,
    pub minutes: i32,
    pub description: Option<&'a str>,
}
