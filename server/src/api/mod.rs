pub mod health;
pub mod recipes;

use crate::AppState;
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

pub mod paths {
    pub const INDEX: &str = "/";
    pub const UPDATE: &str = "/update/{id}";
    pub const DELETE: &str = "/delete/{id}";
    pub const PING: &str = "/ping";
    pub const OPENAPI: &str = "/api-docs/openapi.json";
}

/// Every route the application serves, before state is attached.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(recipes::router())
        .merge(health::router())
        .route(paths::OPENAPI, get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi())
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(info(
        title = "recipe-box",
        description = "Server-rendered recipe list. Form endpoints answer with HTML or redirects."
    ))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> =
        vec![recipes::ApiDoc::openapi(), health::ApiDoc::openapi()];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            spec.components
                .get_or_insert_with(Default::default)
                .schemas
                .extend(module_components.schemas);
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let spec = openapi();
        for path in ["/", "/update/{id}", "/delete/{id}", "/ping"] {
            assert!(spec.paths.paths.contains_key(path), "missing {path}");
        }
        let schemas = spec.components.expect("components").schemas;
        assert!(schemas.contains_key("RecipeForm"));
        assert!(schemas.contains_key("PingResponse"));
    }
}
