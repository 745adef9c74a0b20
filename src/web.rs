use anyhow::Context;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api::{self, AppState};
use crate::config::TrackerConfig;
use crate::dashboard::Dashboard;

/// Full application: API under `/api`, the built frontend everywhere else
pub fn app(config: &TrackerConfig, dashboard: Dashboard) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState {
        dashboard,
        map: config.map.clone(),
    };

    Router::new()
        .nest("/api", api::router(state))
        .fallback_service(ServeDir::new(&config.server.static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn run(config: TrackerConfig) -> anyhow::Result<()> {
    let dashboard = Dashboard::from_config(&config)?;
    let app = app(&config, dashboard);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .await
        .context("Web server stopped unexpectedly")
}
