//! API Routes
//!
//! Configures the Axum router with all page sharing endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_sessions_handler, create_page_handler, delete_page_handler, get_page_handler,
    health_handler, list_pages_handler, list_sessions_handler, login_handler, logout_handler,
    stats_handler, verify_secret_handler, view_page_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /api/pages` - Create a page (authoring-gated)
/// - `GET /api/pages` - Administrative metadata listing (gated)
/// - `GET /api/pages/:id` - Page metadata, secret redacted
/// - `POST /api/pages/:id/verify` - Validate a candidate secret
/// - `DELETE /api/pages/:id` - Delete a page (gated)
/// - `GET /api/stats` - Aggregate counts (gated)
/// - `GET /view/:id` - Render a page (secret via query when protected)
/// - `POST /api/login` / `POST /api/logout` - Authoring session lifecycle
/// - `GET /api/sessions` / `DELETE /api/sessions` - Session admin (gated)
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/api/pages", post(create_page_handler).get(list_pages_handler))
        .route(
            "/api/pages/:id",
            get(get_page_handler).delete(delete_page_handler),
        )
        .route("/api/pages/:id/verify", post(verify_secret_handler))
        .route("/api/stats", get(stats_handler))
        .route("/view/:id", get(view_page_handler))
        .route("/api/login", post(login_handler))
        .route("/api/logout", post(logout_handler))
        .route(
            "/api/sessions",
            get(list_sessions_handler).delete(clear_sessions_handler),
        )
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
