use std::net::SocketAddr;
use std::time::Duration;

use axum::{response::Html, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_scalar::Scalar;

use glass2grid_sim::api_docs::ApiDoc;
use glass2grid_sim::config::Config;
use glass2grid_sim::routes::calculator_routes::api_routes;
use glass2grid_sim::services::exchange_rate_service::run_refresher;
use glass2grid_sim::shared_state::{AppState, SharedState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    // 1. Load configuration
    let config = match Config::load("config.json") {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config.json: {}", e);
            return;
        }
    };
    info!(
        version = %config.constants.version,
        offline_mode = config.offline_mode,
        "configuration loaded"
    );

    // 2. Initialize shared state
    let state = AppState::new(config.offline_mode);

    // 3. Keep the INR rate fresh in the background
    tokio::spawn(run_refresher(
        state.clone(),
        config.exchange_rate.endpoint.clone(),
        Duration::from_secs(config.exchange_rate.refresh_interval_s.max(1)),
    ));

    // 4. Start Axum HTTP server
    let server_port = config.server.port;
    let shared = SharedState { app: state, config };
    let app = Router::new()
        .nest("/api", api_routes(shared))
        .route("/scalar", get(|| async {
            Html(Scalar::new(ApiDoc::openapi()).to_html())
        }))
        .fallback_service(ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], server_port));
    info!("API Server listening on http://{}", addr);
    info!("Scalar UI: http://{}/scalar", addr);

    if let Err(e) = axum_server::bind(addr).serve(app.into_make_service()).await {
        error!("server error: {}", e);
    }
}
