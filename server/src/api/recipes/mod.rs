pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use crate::api::paths;
use crate::error::AppError;
use crate::form::{FormError, FormValues};
use crate::models::Recipe;
use crate::AppState;
use askama::Template;
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the recipe pages (mounted at the root)
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            paths::INDEX,
            get(list::list_recipes).post(create::create_recipe),
        )
        .route(paths::UPDATE, post(update::update_recipe))
        .route(paths::DELETE, post(delete::delete_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        update::update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(crate::form::RecipeForm))
)]
pub struct ApiDoc;

/// The single page: create form on top, recipes below.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub recipes: Vec<Recipe>,
    pub errors: Vec<FormError>,
    pub values: FormValues,
    pub db_ready: bool,
}

/// Renders the page with a freshly loaded listing.
pub(crate) fn render_index(
    state: &AppState,
    errors: Vec<FormError>,
    values: FormValues,
) -> Result<Html<String>, AppError> {
    let recipes = match state.store() {
        Some(store) => store.list()?,
        None => Vec::new(),
    };

    let page = IndexPage {
        recipes,
        errors,
        values,
        db_ready: state.store().is_some(),
    };

    Ok(Html(page.render()?))
}

/// Path ids arrive as text so a malformed one can be ignored instead of
/// rejected.
pub(crate) fn parse_id(raw: &str) -> Option<i32> {
    raw.parse().ok()
}
