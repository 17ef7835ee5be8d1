use super::render_index;
use crate::error::AppError;
use crate::form::FormValues;
use crate::AppState;
use axum::extract::State;
use axum::response::Html;

#[utoipa::path(
    get,
    path = "/",
    tag = "recipes",
    responses(
        (status = 200, description = "Recipe list and create form", body = String, content_type = "text/html"),
        (status = 500, description = "Database failure", body = String, content_type = "text/html")
    )
)]
pub async fn list_recipes(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render_index(&state, Vec::new(), FormValues::default())
}
