mod config;

use std::sync::Arc;

use tracing::info;

use pinboard_api::session::SessionIssuer;
use pinboard_api::{AppState, AppStateInner, build_app};
use pinboard_store::Store;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "pinboard=debug,pinboard_api=debug,pinboard_store=debug,tower_http=debug".into()
            }),
        )
        .init();

    let config = Config::from_env()?;

    // Open (and seed if needed) the data directory
    // Seeding hashes passwords and all of it is blocking file I/O
    let data_dir = config.data_dir.clone();
    let store = tokio::task::spawn_blocking(move || Store::open(&data_dir)).await??;

    let sessions = SessionIssuer::new(
        &config.jwt_secret,
        chrono::Duration::seconds(config.token_ttl_secs),
    );
    let state: AppState = Arc::new(AppStateInner { store, sessions });

    let app = build_app(state);

    info!("Pinboard server listening on {}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
