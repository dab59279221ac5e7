//! Request and Response models for the page sharing API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CreatePageRequest, LoginRequest, VerifySecretRequest, ViewQuery};
pub use responses::{
    CreatePageResponse, DeleteResponse, ErrorResponse, HealthResponse, ListPagesResponse,
    LoginResponse, PageMetaResponse, SessionIdsResponse, StatsResponse, VerifySecretResponse,
};
