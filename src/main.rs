use std::net::TcpListener;

use anyhow::Context;
use blogful::{init_db, make_router, run_app, AppState, Config, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("blogful=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(error) = run().await {
        tracing::error!("Error: {:#}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = Config::from_env()?;
    let pool = init_db(&config.database_url).await?;
    let router = make_router(AppState::new(pool, config.environment));
    let listener = TcpListener::bind(config.address)
        .with_context(|| format!("Failed to bind {}", config.address))?;
    tracing::info!(environment = ?config.environment, "Server started on {}", config.address);
    run_app(router, listener).await
}
