//! Server assembly: API routes, static front end, CORS

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use crate::api::{self, AppState};
use crate::config::AppConfig;
use crate::gateway::ProviderGateway;
use crate::planner::TripPlanner;

pub async fn run(config: AppConfig) -> Result<()> {
    let gateway = ProviderGateway::new(config.providers.clone())?;
    let state = Arc::new(AppState {
        planner: TripPlanner::new(gateway),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Unknown routes fall back to index.html so the front end can handle
    // its own routing.
    let static_dir = &config.server.static_dir;
    let assets =
        ServeDir::new(static_dir).fallback(ServeFile::new(format!("{static_dir}/index.html")));

    let app = Router::new()
        .nest("/api", api::router(state))
        .fallback_service(assets)
        .layer(cors);

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server running at http://localhost:{}", config.server.port);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
