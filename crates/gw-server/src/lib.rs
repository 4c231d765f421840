//! # gw-server
//!
//! axum HTTP API for gradewatch.
//!
//! Routes are grouped by resource under [`routes`]; every handler shares a
//! read-only [`state::AppState`]. Student data routes go through the access
//! policy in `gw_core::access`; appointment and chatbot routes are public so
//! the bot process can call them.

pub mod bot;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use gw_config::GradewatchConfig;
use gw_db::SchoolDb;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

pub use error::{ApiError, ServerError};
pub use state::{AppState, SharedState};

/// Build the full application router.
pub fn router(state: SharedState) -> Router {
    let cors = cors_layer(&state.allowed_origins);
    routes::api()
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::request_tracing))
        .layer(cors)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return base.allow_origin(Any);
    }
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(parsed))
}

/// Open the store, bind the listener and serve until Ctrl-C.
///
/// # Errors
///
/// Returns `ServerError` if the store cannot be opened, the configuration is
/// incomplete or the address cannot be bound.
pub async fn serve(config: &GradewatchConfig) -> Result<(), ServerError> {
    let db = SchoolDb::open_local(&config.database.path).await?;
    let state = Arc::new(AppState::from_config(config, db)?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!(
        bind = %config.server.bind,
        database = %config.database.path,
        bot = %config.bot.url,
        "gradewatch API listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("gradewatch API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
