//! Request DTOs for the page sharing API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::pages::NewPage;

/// Request body for page creation (POST /api/pages)
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePageRequest {
    /// The raw source to store
    pub content: String,
    /// Rendering strategy tag, defaults to "html"
    #[serde(default = "default_content_type")]
    pub content_type: String,
    /// Whether to generate a view secret
    #[serde(default)]
    pub protect: bool,
    /// Optional display title
    #[serde(default)]
    pub title: Option<String>,
    /// Optional display description
    #[serde(default)]
    pub description: Option<String>,
}

fn default_content_type() -> String {
    "html".to_string()
}

impl CreatePageRequest {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid. Size
    /// validation happens in the store, which knows the configured ceiling.
    pub fn validate(&self) -> Option<String> {
        if self.content.is_empty() {
            return Some("Content cannot be empty".to_string());
        }
        if self.content_type.is_empty() {
            return Some("Content type cannot be empty".to_string());
        }
        None
    }
}

impl From<CreatePageRequest> for NewPage {
    fn from(req: CreatePageRequest) -> Self {
        NewPage {
            content: req.content,
            content_type: req.content_type,
            protect: req.protect,
            title: req.title,
            description: req.description,
        }
    }
}

/// Request body for the login operation (POST /api/login)
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Candidate for the shared authoring password
    pub password: String,
}

/// Request body for secret validation (POST /api/pages/:id/verify)
#[derive(Debug, Clone, Deserialize)]
pub struct VerifySecretRequest {
    /// Candidate page secret
    pub secret: String,
}

/// Query parameters for the view endpoint (GET /view/:id)
#[derive(Debug, Clone, Deserialize)]
pub struct ViewQuery {
    /// Secret supplied by the viewer, when the page is protected
    #[serde(default)]
    pub secret: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults() {
        let json = r#"{"content": "<h1>hi</h1>"}"#;
        let req: CreatePageRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.content, "<h1>hi</h1>");
        assert_eq!(req.content_type, "html");
        assert!(!req.protect);
        assert!(req.title.is_none());
    }

    #[test]
    fn test_create_request_full() {
        let json = r#"{"content": "x", "content_type": "markdown", "protect": true, "title": "t"}"#;
        let req: CreatePageRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.content_type, "markdown");
        assert!(req.protect);
        assert_eq!(req.title.as_deref(), Some("t"));
    }

    #[test]
    fn test_validate_empty_content() {
        let req = CreatePageRequest {
            content: "".to_string(),
            content_type: "html".to_string(),
            protect: false,
            title: None,
            description: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_view_query_optional_secret() {
        let query: ViewQuery = serde_json::from_str("{}").unwrap();
        assert!(query.secret.is_none());
    }
}
