//! Access Control Gate
//!
//! Two independent checks, never conflated: the authoring gate (session
//! based, protects creation and administration) and the page-secret gate
//! (protects viewing of a protected page). The gate owns no data; it only
//! decides.

use subtle::ConstantTimeEq;

use crate::error::{AppError, Result};
use crate::pages::PageRecord;
use crate::session::SessionValue;

// == Access Gate ==
#[derive(Debug, Clone)]
pub struct AccessGate {
    auth_enabled: bool,
    shared_password: String,
}

impl AccessGate {
    pub fn new(auth_enabled: bool, shared_password: impl Into<String>) -> Self {
        Self {
            auth_enabled,
            shared_password: shared_password.into(),
        }
    }

    // == Authoring Gate ==
    /// Decides whether an authoring action (create, list, stats, delete) is
    /// permitted: authentication disabled globally, or the session carries
    /// the authenticated flag.
    ///
    /// The returned error distinguishes "no session" from "unauthenticated
    /// session" internally; `AppError::Unauthorized` keeps that detail out
    /// of the caller-visible message.
    pub fn check_authoring(&self, session: Option<&SessionValue>) -> Result<()> {
        if !self.auth_enabled {
            return Ok(());
        }
        match session {
            Some(value) if value.authenticated => Ok(()),
            Some(_) => Err(AppError::Unauthorized(
                "session exists but is not authenticated".to_string(),
            )),
            None => Err(AppError::Unauthorized("no session".to_string())),
        }
    }

    // == Login ==
    /// Compares a login candidate against the single shared authoring
    /// password, in constant time.
    pub fn verify_login(&self, candidate: &str) -> bool {
        constant_time_eq(candidate, &self.shared_password)
    }

    // == Page-Secret Gate ==
    /// Decides whether a page view is permitted. Unprotected pages always
    /// pass. For protected pages, a missing secret and a wrong secret are
    /// both "not permitted" but map to distinct errors so the view path can
    /// prompt versus re-prompt with an error.
    pub fn check_page_secret(record: &PageRecord, supplied: Option<&str>) -> Result<()> {
        let Some(secret) = record.secret.as_deref() else {
            return Ok(());
        };
        match supplied {
            None => Err(AppError::SecretRequired),
            Some(candidate) if constant_time_eq(candidate, secret) => Ok(()),
            Some(_) => Err(AppError::Unauthorized(format!(
                "wrong secret for page {}",
                record.id
            ))),
        }
    }
}

/// Constant-time string equality. The length check short-circuits, which
/// leaks only the secret's length; generated secrets are fixed-length.
fn constant_time_eq(a: &str, b: &str) -> bool {
    a.len() == b.len() && bool::from(a.as_bytes().ct_eq(b.as_bytes()))
}
