//! API Module
//!
//! HTTP handlers and routing for the page sharing REST API.
//!
//! # Endpoints
//! - `POST /api/pages` - Create a page
//! - `GET /api/pages/:id` - Page metadata
//! - `GET /view/:id` - Render a page
//! - `POST /api/login` / `POST /api/logout` - Authoring session
//! - `GET /api/stats`, `GET /api/pages`, `DELETE /api/pages/:id` - Admin
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
