//! API Handlers
//!
//! HTTP request handlers for each page sharing endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    response::{AppendHeaders, Html, IntoResponse},
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::auth::AccessGate;
use crate::config::{Config, PageBackend, SessionBackend};
use crate::error::{AppError, Result};
use crate::models::{
    CreatePageRequest, CreatePageResponse, DeleteResponse, HealthResponse, ListPagesResponse,
    LoginRequest, LoginResponse, PageMetaResponse, SessionIdsResponse, StatsResponse,
    VerifySecretRequest, VerifySecretResponse, ViewQuery,
};
use crate::pages::{MemoryPageStore, PageStore, SqlitePageStore};
use crate::render::{PassthroughRenderer, Renderer};
use crate::session::{MemorySessionStore, RemoteSessionStore, SessionStore, SessionValue};

/// Name of the cookie carrying the opaque session id.
pub const SESSION_COOKIE: &str = "pagebin_sid";

// == App State ==
/// Application state shared across all handlers. The stores and the renderer
/// are trait objects so the backends stay a construction-time choice.
#[derive(Clone)]
pub struct AppState {
    /// Page repository backend
    pub pages: Arc<dyn PageStore>,
    /// Session store backend
    pub sessions: Arc<dyn SessionStore>,
    /// Access control decisions
    pub gate: AccessGate,
    /// External rendering collaborator
    pub renderer: Arc<dyn Renderer>,
    /// TTL in seconds for newly established sessions
    pub session_ttl: u64,
}

impl AppState {
    pub fn new(
        pages: Arc<dyn PageStore>,
        sessions: Arc<dyn SessionStore>,
        gate: AccessGate,
        session_ttl: u64,
    ) -> Self {
        Self {
            pages,
            sessions,
            gate,
            renderer: Arc::new(PassthroughRenderer),
            session_ttl,
        }
    }

    /// Builds the state from configuration, constructing the configured
    /// backends.
    pub fn from_config(config: &Config) -> Result<Self> {
        let pages: Arc<dyn PageStore> = match &config.page_backend {
            PageBackend::Memory => Arc::new(MemoryPageStore::new(config.max_content_size)),
            PageBackend::Sqlite { path } => {
                Arc::new(SqlitePageStore::open(path, config.max_content_size)?)
            }
        };

        let sessions: Arc<dyn SessionStore> = match &config.session_backend {
            SessionBackend::Memory => Arc::new(MemorySessionStore::new()),
            SessionBackend::Remote { url, token } => Arc::new(RemoteSessionStore::new(url, token)),
        };

        let gate = AccessGate::new(config.auth_enabled, config.auth_password.clone());
        Ok(Self::new(pages, sessions, gate, config.session_ttl))
    }
}

// == Session Plumbing ==
/// Extracts the opaque session id from the Cookie header, if present.
/// Creating and attaching the id is the transport layer's job; the core
/// only keys session values by it.
fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Loads the caller's session (when any) and runs the authoring gate.
async fn require_authoring(state: &AppState, headers: &HeaderMap) -> Result<()> {
    let session = match session_id_from_headers(headers) {
        Some(sid) => state.sessions.get(&sid).await?,
        None => None,
    };
    state.gate.check_authoring(session.as_ref())
}

// == Page Handlers ==

/// Handler for POST /api/pages
///
/// Creates a page record. Authoring-gated. The response is the only place
/// the plaintext secret is ever returned in full.
pub async fn create_page_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreatePageRequest>,
) -> Result<Json<CreatePageResponse>> {
    require_authoring(&state, &headers).await?;

    if let Some(error_msg) = req.validate() {
        return Err(AppError::Validation(error_msg));
    }

    let record = state.pages.create(req.into())?;
    info!(id = %record.id, protected = record.is_protected, "page created");

    Ok(Json(CreatePageResponse::from_record(&record)))
}

/// Handler for GET /api/pages/:id
///
/// Returns page metadata with the secret redacted. Anonymous.
pub async fn get_page_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PageMetaResponse>> {
    let record = state
        .pages
        .get_by_id(&id)?
        .ok_or_else(|| AppError::NotFound(id))?;

    Ok(Json(PageMetaResponse::from(record.meta())))
}

/// Handler for POST /api/pages/:id/verify
///
/// Checks a candidate secret against the page. Returns a plain boolean so
/// the view UI can prompt again without re-fetching.
pub async fn verify_secret_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<VerifySecretRequest>,
) -> Result<Json<VerifySecretResponse>> {
    let record = state
        .pages
        .get_by_id(&id)?
        .ok_or_else(|| AppError::NotFound(id))?;

    let valid = AccessGate::check_page_secret(&record, Some(&req.secret)).is_ok();
    Ok(Json(VerifySecretResponse { valid }))
}

/// Handler for GET /view/:id
///
/// Renders a page for viewing. Protected pages require the secret as a
/// query parameter; a missing secret and a wrong secret produce distinct
/// error codes so the UI can prompt versus re-prompt.
pub async fn view_page_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ViewQuery>,
) -> Result<Html<String>> {
    let record = state
        .pages
        .get_by_id(&id)?
        .ok_or_else(|| AppError::NotFound(id))?;

    AccessGate::check_page_secret(&record, query.secret.as_deref())?;

    let output = state.renderer.render(&record.content, &record.content_type);
    Ok(Html(output))
}

/// Handler for GET /api/pages
///
/// Administrative listing of page metadata, newest first. Authoring-gated.
pub async fn list_pages_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListPagesResponse>> {
    require_authoring(&state, &headers).await?;

    let pages = state
        .pages
        .list_all()?
        .into_iter()
        .map(PageMetaResponse::from)
        .collect();

    Ok(Json(ListPagesResponse { pages }))
}

/// Handler for DELETE /api/pages/:id
///
/// Removes a page. Authoring-gated. Deleting an unknown id is a 404 at the
/// transport level even though the store treats it as a no-op.
pub async fn delete_page_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    require_authoring(&state, &headers).await?;

    if state.pages.delete_by_id(&id)? {
        info!(id = %id, "page deleted");
        Ok(Json(DeleteResponse::new(id)))
    } else {
        Err(AppError::NotFound(id))
    }
}

/// Handler for GET /api/stats
///
/// Aggregate page counts. Authoring-gated.
pub async fn stats_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<StatsResponse>> {
    require_authoring(&state, &headers).await?;
    Ok(Json(StatsResponse::from(state.pages.stats()?)))
}

// == Auth Handlers ==

/// Handler for POST /api/login
///
/// Verifies the shared authoring password and, on success, marks the
/// caller's session authenticated, minting a session id when the caller has
/// none. The failure message never says why the login failed.
pub async fn login_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    if !state.gate.verify_login(&req.password) {
        return Err(AppError::Unauthorized(
            "wrong authoring password".to_string(),
        ));
    }

    let sid =
        session_id_from_headers(&headers).unwrap_or_else(|| Uuid::new_v4().to_string());
    state
        .sessions
        .set(&sid, SessionValue::authenticated(), state.session_ttl)
        .await?;
    info!("authoring session established");

    let cookie = format!(
        "{SESSION_COOKIE}={sid}; Path=/; HttpOnly; Max-Age={}",
        state.session_ttl
    );
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(LoginResponse::logged_in()),
    ))
}

/// Handler for POST /api/logout
///
/// Destroys the caller's session, if any, and expires the cookie.
pub async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    if let Some(sid) = session_id_from_headers(&headers) {
        state.sessions.destroy(&sid).await?;
    }

    let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0");
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(LoginResponse::logged_out()),
    ))
}

// == Admin Session Handlers ==

/// Handler for GET /api/sessions
///
/// Debug enumeration of live session ids. Authoring-gated.
pub async fn list_sessions_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionIdsResponse>> {
    require_authoring(&state, &headers).await?;

    let ids = state.sessions.all_ids().await?;
    Ok(Json(SessionIdsResponse {
        count: ids.len(),
        ids,
    }))
}

/// Handler for DELETE /api/sessions
///
/// Clears every session, logging everyone out. Authoring-gated.
pub async fn clear_sessions_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LoginResponse>> {
    require_authoring(&state, &headers).await?;

    state.sessions.clear().await?;
    info!("all sessions cleared");
    Ok(Json(LoginResponse::logged_out()))
}

// == Health ==

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
