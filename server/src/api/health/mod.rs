pub mod ping;

use crate::api::paths;
use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for liveness endpoints
pub fn router() -> Router<AppState> {
    Router::new().route(paths::PING, get(ping::ping))
}

#[derive(OpenApi)]
#[openapi(
    paths(ping::ping),
    components(schemas(ping::PingResponse, ping::DatabaseStatus))
)]
pub struct ApiDoc;
