mod data_formats;
mod db_helpers;
mod errors;
mod extractors;
mod handlers;
mod models;

pub mod config;

use std::{net::TcpListener, time::Duration};

use anyhow::Context;
pub use anyhow::Result;
use axum::extract::FromRef;
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::{middleware, routing::*, Json, Router};
pub use config::{Config, Environment};
pub use data_formats::*;
pub use errors::{RequestErrorJson, RequestErrorJsonWrapper};
use handlers::*;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

pub type JsonResponse<T> = (StatusCode, Json<T>);

/// Everything a handler may depend on, handed to the router once.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub environment: Environment,
}

impl AppState {
    pub fn new(pool: SqlitePool, environment: Environment) -> Self {
        AppState { pool, environment }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Environment {
    fn from_ref(state: &AppState) -> Self {
        state.environment
    }
}

/// Serves `app` on an already bound listener until Ctrl-C.
pub async fn run_app(app: Router, listener: TcpListener) -> Result<()> {
    listener
        .set_nonblocking(true)
        .context("Failed to configure listener")?;
    axum::Server::from_tcp(listener)?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", error);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

pub async fn init_db(db_url: &str) -> Result<SqlitePool> {
    let pool = if db_url.contains(":memory:") {
        // Every connection to an in-memory URL opens a fresh database, so keep exactly one.
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(db_url)
            .await?
    } else {
        let exists = Sqlite::database_exists(db_url)
            .await
            .with_context(|| format!("Failed to check database {}", db_url))?;
        if !exists {
            tracing::info!("Creating database {}", db_url);
            Sqlite::create_database(db_url)
                .await
                .with_context(|| format!("Failed to create database {}", db_url))?;
        } else {
            tracing::info!("Database already exists");
        }
        SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(5))
            .connect(db_url)
            .await?
    };

    tracing::info!("Running migrations");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations completed");
    Ok(pool)
}

pub fn make_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(hello))
        .route("/articles", get(list_articles).post(create_article))
        .route(
            "/articles/:article_id",
            get(get_article).patch(update_article).delete(delete_article),
        )
        .fallback(not_found);
    with_middleware(router, state.environment).with_state(state)
}

/// Wraps `router` so that panics and server faults pass through the error
/// responder and every response, CORS preflights included, carries the
/// security headers.
fn with_middleware(router: Router<AppState>, environment: Environment) -> Router<AppState> {
    let security_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_DNS_PREFETCH_CONTROL,
            HeaderValue::from_static("off"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("x-download-options"),
            HeaderValue::from_static("noopen"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("0"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=15552000; includeSubDomains"),
        ));

    router
        .layer(CatchPanicLayer::custom(errors::handle_panic))
        .layer(middleware::from_fn_with_state(
            environment,
            errors::error_responder,
        ))
        .layer(CorsLayer::permissive())
        .layer(security_headers)
        .layer(TraceLayer::new_for_http())
}
