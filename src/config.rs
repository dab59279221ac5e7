//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

// == Backend Selection ==
/// Which page store implementation to construct at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageBackend {
    /// Process-local HashMap, lost on restart
    Memory,
    /// Durable SQLite database at the given path
    Sqlite { path: String },
}

/// Which session store implementation to construct at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionBackend {
    /// Process-local bounded map with lazy TTL eviction
    Memory,
    /// Remote key/value service with native per-key expiry
    Remote { url: String, token: String },
}

// == Config ==
/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// Backend choices are explicit configuration values, injected at construction
/// time, so the core stays backend-agnostic.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Whether the authoring gate is enforced at all
    pub auth_enabled: bool,
    /// Single shared authoring password
    pub auth_password: String,
    /// Retention window in days before the janitor removes a page
    pub retention_days: u64,
    /// Session TTL in seconds
    pub session_ttl: u64,
    /// Maximum accepted content size in bytes
    pub max_content_size: usize,
    /// Janitor sweep interval in seconds
    pub cleanup_interval: u64,
    /// Page store backend
    pub page_backend: PageBackend,
    /// Session store backend
    pub session_backend: SessionBackend,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `AUTH_ENABLED` - Enforce the authoring gate (default: true)
    /// - `AUTH_PASSWORD` - Shared authoring password (default: "admin123")
    /// - `PAGE_RETENTION_DAYS` - Days before a page expires (default: 7)
    /// - `SESSION_TTL` - Session TTL in seconds (default: 86400)
    /// - `MAX_CONTENT_SIZE` - Content size ceiling in bytes (default: 1 MB)
    /// - `CLEANUP_INTERVAL` - Janitor sweep interval in seconds (default: 3600)
    /// - `PAGE_BACKEND` - "memory" or "sqlite" (default: "memory")
    /// - `DATABASE_PATH` - SQLite file when PAGE_BACKEND=sqlite (default: "pagebin.db")
    /// - `SESSION_BACKEND` - "memory" or "remote" (default: "memory")
    /// - `KV_URL` / `KV_TOKEN` - Remote KV endpoint and bearer token
    pub fn from_env() -> Self {
        let page_backend = match env::var("PAGE_BACKEND").as_deref() {
            Ok("sqlite") => PageBackend::Sqlite {
                path: env::var("DATABASE_PATH").unwrap_or_else(|_| "pagebin.db".to_string()),
            },
            _ => PageBackend::Memory,
        };

        let session_backend = match env::var("SESSION_BACKEND").as_deref() {
            Ok("remote") => SessionBackend::Remote {
                url: env::var("KV_URL").unwrap_or_default(),
                token: env::var("KV_TOKEN").unwrap_or_default(),
            },
            _ => SessionBackend::Memory,
        };

        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            auth_enabled: env::var("AUTH_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            auth_password: env::var("AUTH_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),
            retention_days: env::var("PAGE_RETENTION_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7),
            session_ttl: env::var("SESSION_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(86_400),
            max_content_size: env::var("MAX_CONTENT_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1024 * 1024),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            page_backend,
            session_backend,
        }
    }

    /// Retention window expressed in milliseconds, matching page timestamps.
    pub fn retention_window_ms(&self) -> u64 {
        self.retention_days * 24 * 60 * 60 * 1000
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            auth_enabled: true,
            auth_password: "admin123".to_string(),
            retention_days: 7,
            session_ttl: 86_400,
            max_content_size: 1024 * 1024,
            cleanup_interval: 3600,
            page_backend: PageBackend::Memory,
            session_backend: SessionBackend::Memory,
        }
    }
}
