//! Camp signups server.
//!
//! Run from repo root: `cargo run -p camp_server`
//! Configure with `DATABASE_URL`, `BIND_ADDR`, `DB_MAX_CONNECTIONS`, `BODY_LIMIT_BYTES`, `SEED_DEMO_DATA`
//! (a `.env` file is read if present).

use camp_signups::{app, connect, ensure_tables, seed_demo_data, AppConfig, AppState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("camp_signups=info,camp_server=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let pool = connect(&config.database_url, config.max_connections).await?;
    ensure_tables(&pool).await?;
    if config.seed_demo_data {
        seed_demo_data(&pool).await?;
    }

    let router = app(AppState::new(pool), config.body_limit_bytes);
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("camp server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
