use super::parse_id;
use crate::form::{validate, FormValues, RecipeForm};
use crate::store::Outcome;
use crate::AppState;
use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::Redirect,
    Form,
};

/// Applies an edit. Every outcome, including bad input and unknown ids,
/// ends in a redirect to the list.
#[utoipa::path(
    post,
    path = "/update/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    request_body(content = RecipeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the list, whether or not anything changed")
    )
)]
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    form: Result<Form<RecipeForm>, FormRejection>,
) -> Redirect {
    let Some(store) = state.store() else {
        tracing::debug!("no database configured, ignoring update");
        return Redirect::to("/");
    };

    let Some(id) = parse_id(&raw_id) else {
        tracing::debug!(id = %raw_id, "ignoring update for malformed id");
        return Redirect::to("/");
    };

    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(id, %rejection, "ignoring unreadable update");
            return Redirect::to("/");
        }
    };

    let input = match validate(&FormValues::from(form)) {
        Ok(input) => input,
        Err(errors) => {
            tracing::debug!(id, ?errors, "ignoring invalid update");
            return Redirect::to("/");
        }
    };

    match store.update(id, &input.as_changes()) {
        Ok(Outcome::Applied) => tracing::info!(id, "updated recipe"),
        Ok(Outcome::Missing) => tracing::debug!(id, "update target not found"),
        Err(e) => tracing::error!(id, "Failed to update recipe: {}", e),
    }

    Redirect::to("/")
}
