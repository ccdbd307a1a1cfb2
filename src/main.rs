mod app;
mod auth;
mod bookmarks;
mod config;
mod db;
mod error;
mod state;
mod users;
mod validation;

use crate::{config::AppConfig, db::Database, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "bookmark_api=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    let addr = config.bind_addr()?;

    let db = Database::connect(&config).await?;
    if let Err(e) = db.migrate().await {
        tracing::warn!(error = %e, "migration failed; continuing");
    }

    let app = app::build_app(AppState::new(config, &db));
    let served = app::serve(app, addr).await;

    db.close().await;
    served
}
