pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quotedrill_core::session::SessionEngine;

use crate::db::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    /// Live practice sessions, keyed by session id. Each engine owns its
    /// own quote list and queues; sessions never share mutable state.
    pub sessions: Arc<RwLock<HashMap<String, SessionEngine>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            db: Arc::new(Database::new()),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Text management
        .route("/api/texts", get(routes::texts::list))
        .route("/api/texts", post(routes::texts::create))
        .route("/api/texts/{id}", get(routes::texts::get))
        .route("/api/texts/{id}", put(routes::texts::rename))
        .route("/api/texts/{id}", delete(routes::texts::delete))
        .route("/api/texts/{id}/chapters", post(routes::texts::create_chapter))
        .route(
            "/api/texts/{id}/chapters/{cid}",
            delete(routes::texts::delete_chapter),
        )
        .route(
            "/api/texts/{id}/chapters/{cid}/quotes",
            post(routes::texts::create_quote),
        )
        .route(
            "/api/texts/{id}/chapters/{cid}/quotes/{qid}",
            put(routes::texts::update_quote),
        )
        .route(
            "/api/texts/{id}/chapters/{cid}/quotes/{qid}",
            delete(routes::texts::delete_quote),
        )
        // Analytics
        .route("/api/texts/{id}/analytics", get(routes::analytics::for_text))
        // Practice sessions
        .route("/api/sessions", post(routes::sessions::start))
        .route("/api/sessions/{id}", get(routes::sessions::get))
        .route("/api/sessions/{id}", delete(routes::sessions::abandon))
        .route("/api/sessions/{id}/inputs", post(routes::sessions::set_input))
        .route("/api/sessions/{id}/flip", post(routes::sessions::flip))
        .route("/api/sessions/{id}/conceal", post(routes::sessions::conceal))
        .route("/api/sessions/{id}/tick", post(routes::sessions::tick))
        .route("/api/sessions/{id}/mark", post(routes::sessions::mark))
        .route("/api/sessions/{id}/next", post(routes::sessions::next))
        .route("/api/sessions/{id}/revise", post(routes::sessions::revise))
        .route("/api/sessions/{id}/skip", post(routes::sessions::skip))
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::new();

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
