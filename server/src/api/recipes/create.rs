use super::render_index;
use crate::error::AppError;
use crate::form::{validate, FormError, FormValues, RecipeForm};
use crate::AppState;
use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};

#[utoipa::path(
    post,
    path = "/",
    tag = "recipes",
    request_body(content = RecipeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Recipe created, redirect to the list"),
        (status = 422, description = "Form re-rendered with errors and the entered values", body = String, content_type = "text/html"),
        (status = 500, description = "Database failure", body = String, content_type = "text/html")
    )
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    form: Result<Form<RecipeForm>, FormRejection>,
) -> Result<Response, AppError> {
    // An unreadable body re-renders the page like an empty submission.
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable recipe form");
            RecipeForm::default()
        }
    };
    let values = FormValues::from(form);

    let mut errors = match validate(&values) {
        Ok(input) => match state.store() {
            Some(store) => {
                let id = store.create(&input.as_new_recipe())?;
                tracing::info!(id, "created recipe");
                return Ok(Redirect::to("/").into_response());
            }
            None => Vec::new(),
        },
        Err(errors) => errors,
    };

    if state.store().is_none() {
        errors.push(FormError::DatabaseNotConfigured);
    }

    tracing::debug!(?errors, "rejected recipe submission");

    let page = render_index(&state, errors, values)?;
    Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
}
