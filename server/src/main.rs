use anyhow::Context;
use recipe_box_server::config::Config;
use recipe_box_server::store::PgRecipeStore;
use recipe_box_server::{api, app, db, telemetry, AppState};
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi()
            .to_pretty_json()
            .context("failed to serialize OpenAPI spec")?;
        println!("{}", spec);
        return Ok(());
    }

    let _telemetry = telemetry::init_telemetry();

    let config = Config::from_env().context("invalid configuration")?;

    let state = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = db::create_pool(database_url, config.pool_size)
                .context("failed to connect to database")?;
            let applied = db::run_migrations(&pool)?;
            tracing::info!(applied, "database ready");
            AppState::new(Arc::new(PgRecipeStore::new(pool)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, running without a database; recipes cannot be saved");
            AppState::unconfigured()
        }
    };

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("Server listening on {}", listener.local_addr()?);
    tracing::info!(
        "OpenAPI spec available at http://{}{}",
        addr,
        api::paths::OPENAPI
    );

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
