//! Response DTOs for the page sharing API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::pages::{PageMeta, PageRecord, PageStats};

/// Response body for page creation (POST /api/pages)
///
/// The only response that ever carries the plaintext secret: it is shown to
/// the author exactly once, at creation.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePageResponse {
    /// Generated page id
    pub id: String,
    /// Generated view secret, present iff the page is protected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// Whether a secret gates viewing
    pub is_protected: bool,
}

impl CreatePageResponse {
    pub fn from_record(record: &PageRecord) -> Self {
        Self {
            id: record.id.clone(),
            secret: record.secret.clone(),
            is_protected: record.is_protected,
        }
    }
}

/// Metadata view of a page (GET /api/pages/:id and listings). Never carries
/// the content or the secret.
#[derive(Debug, Clone, Serialize)]
pub struct PageMetaResponse {
    pub id: String,
    pub content_type: String,
    pub created_at: u64,
    pub is_protected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<PageMeta> for PageMetaResponse {
    fn from(meta: PageMeta) -> Self {
        Self {
            id: meta.id,
            content_type: meta.content_type,
            created_at: meta.created_at,
            is_protected: meta.is_protected,
            title: meta.title,
            description: meta.description,
        }
    }
}

/// Response body for the admin listing (GET /api/pages)
#[derive(Debug, Clone, Serialize)]
pub struct ListPagesResponse {
    pub pages: Vec<PageMetaResponse>,
}

/// Response body for secret validation (POST /api/pages/:id/verify)
#[derive(Debug, Clone, Serialize)]
pub struct VerifySecretResponse {
    pub valid: bool,
}

/// Response body for the delete operation (DELETE /api/pages/:id)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The page id that was deleted
    pub id: String,
}

impl DeleteResponse {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            message: format!("Page '{}' deleted successfully", id),
            id,
        }
    }
}

/// Response body for the stats endpoint (GET /api/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Total number of stored pages
    pub total: usize,
    /// Number of protected pages
    pub protected: usize,
}

impl From<PageStats> for StatsResponse {
    fn from(stats: PageStats) -> Self {
        Self {
            total: stats.total,
            protected: stats.protected,
        }
    }
}

/// Response body for login/logout (POST /api/login, POST /api/logout)
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub message: String,
}

impl LoginResponse {
    pub fn logged_in() -> Self {
        Self {
            message: "Login successful".to_string(),
        }
    }

    pub fn logged_out() -> Self {
        Self {
            message: "Logged out".to_string(),
        }
    }
}

/// Response body for session enumeration (GET /api/sessions)
#[derive(Debug, Clone, Serialize)]
pub struct SessionIdsResponse {
    pub count: usize,
    pub ids: Vec<String>,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Stable machine-readable error code
    pub code: String,
    /// Error message describing what went wrong
    pub error: String,
}
