use super::parse_id;
use crate::store::Outcome;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::Redirect,
};

#[utoipa::path(
    post,
    path = "/delete/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    responses(
        (status = 303, description = "Redirect to the list, whether or not the recipe existed")
    )
)]
pub async fn delete_recipe(State(state): State<AppState>, Path(raw_id): Path<String>) -> Redirect {
    let Some(store) = state.store() else {
        tracing::debug!("no database configured, ignoring delete");
        return Redirect::to("/");
    };

    let Some(id) = parse_id(&raw_id) else {
        tracing::debug!(id = %raw_id, "ignoring delete for malformed id");
        return Redirect::to("/");
    };

    match store.delete(id) {
        Ok(Outcome::Applied) => tracing::info!(id, "deleted recipe"),
        Ok(Outcome::Missing) => tracing::debug!(id, "delete target not found"),
        Err(e) => tracing::error!(id, "Failed to delete recipe: {}", e),
    }

    Redirect::to("/")
}
