//! Page Record Module
//!
//! Defines the write-once page record and its derived views.

use serde::Serialize;

use crate::error::{AppError, Result};
use crate::pages::token::{current_timestamp_ms, generate_page_id, generate_secret};

// == New Page ==
/// Input accepted by `PageStore::create`. Everything else on the record
/// is generated.
#[derive(Debug, Clone)]
pub struct NewPage {
    /// Raw submitted source
    pub content: String,
    /// Rendering strategy tag (default "html")
    pub content_type: String,
    /// Whether to generate a view secret
    pub protect: bool,
    /// Optional display title
    pub title: Option<String>,
    /// Optional display description
    pub description: Option<String>,
}

// == Page Record ==
/// A stored unit of shareable content. Write-once, read-many, delete-once:
/// no field changes after creation.
#[derive(Debug, Clone)]
pub struct PageRecord {
    /// Opaque URL-safe id, unique, immutable
    pub id: String,
    /// Raw submitted source
    pub content: String,
    /// Rendering strategy tag
    pub content_type: String,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// View secret, present iff `is_protected`
    pub secret: Option<String>,
    /// Whether a secret gates viewing
    pub is_protected: bool,
    /// Optional display title
    pub title: Option<String>,
    /// Optional display description
    pub description: Option<String>,
}

impl PageRecord {
    // == Constructor ==
    /// Validates input and builds a record with a fresh id and, when
    /// requested, a fresh secret. This is the only way to construct a
    /// record, so `is_protected == secret.is_some()` holds for every
    /// record ever built.
    ///
    /// # Errors
    /// `Validation` if `content` is empty or exceeds `max_content_size`.
    pub fn build(page: NewPage, max_content_size: usize) -> Result<Self> {
        if page.content.is_empty() {
            return Err(AppError::Validation("Content cannot be empty".to_string()));
        }
        if page.content.len() > max_content_size {
            return Err(AppError::Validation(format!(
                "Content exceeds maximum size of {} bytes",
                max_content_size
            )));
        }

        let secret = page.protect.then(generate_secret);

        Ok(Self {
            id: generate_page_id(),
            content: page.content,
            content_type: page.content_type,
            created_at: current_timestamp_ms(),
            is_protected: secret.is_some(),
            secret,
            title: page.title,
            description: page.description,
        })
    }

    /// Replaces the generated id. Used by the stores' collision fallback.
    pub(crate) fn regenerate_id(&mut self) {
        self.id = generate_page_id();
    }

    // == Is Expired ==
    /// True when the record has outlived the retention window.
    pub fn is_expired(&self, window_ms: u64) -> bool {
        self.is_expired_at(current_timestamp_ms(), window_ms)
    }

    /// Expiry check against an explicit clock reading, shared by the stores
    /// so one sweep uses one cutoff.
    ///
    /// Boundary condition: a record created exactly `window_ms` before `now_ms`
    /// is NOT expired; only `created_at < now - window` qualifies.
    pub fn is_expired_at(&self, now_ms: u64, window_ms: u64) -> bool {
        self.created_at < now_ms.saturating_sub(window_ms)
    }

    /// Metadata view for listings: never carries content or secret.
    pub fn meta(&self) -> PageMeta {
        PageMeta {
            id: self.id.clone(),
            content_type: self.content_type.clone(),
            created_at: self.created_at,
            is_protected: self.is_protected,
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

// == Page Meta ==
/// Listing/administrative view of a record, excluding the raw content
/// and the secret.
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub id: String,
    pub content_type: String,
    pub created_at: u64,
    pub is_protected: bool,
    pub title: Option<String>,
    pub description: Option<String>,
}

// == Page Stats ==
/// Aggregate counts over the page table.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PageStats {
    /// Total number of stored pages
    pub total: usize,
    /// Number of pages with a view secret
    pub protected: usize,
}
