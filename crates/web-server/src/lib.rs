use axum::{
    routing::{get, post},
    Router,
};
use configuration::AccountSettings;
use engine::TradingEngine;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub engine: Arc<TradingEngine>,
    pub account_defaults: AccountSettings,
}

/// Builds the application router over the shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/accounts", post(handlers::open_account))
        .route("/api/accounts/:account_id", get(handlers::get_account))
        .route(
            "/api/accounts/:account_id/trades",
            post(handlers::execute_trade),
        )
        .route(
            "/api/accounts/:account_id/portfolio",
            get(handlers::get_portfolio_summary),
        )
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
pub async fn run_server(addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state);

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
