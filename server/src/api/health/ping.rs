use crate::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseStatus {
    /// A store is configured
    Ready,
    /// Running without a database; nothing can be saved
    NotConfigured,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PingResponse {
    pub message: String,
    pub database: DatabaseStatus,
}

#[utoipa::path(
    get,
    path = "/ping",
    tag = "health",
    responses(
        (status = 200, description = "Server is up", body = PingResponse)
    )
)]
pub async fn ping(State(state): State<AppState>) -> Json<PingResponse> {
    let database = if state.store().is_some() {
        DatabaseStatus::Ready
    } else {
        DatabaseStatus::NotConfigured
    };

    Json(PingResponse {
        message: "pong".to_string(),
        database,
    })
}
