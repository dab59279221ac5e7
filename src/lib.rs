//! Pagebin - a lightweight content sharing server
//!
//! Stores submitted snippets under short public ids, optionally behind a
//! generated view secret, and serves them until they expire.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod pages;
pub mod render;
pub mod session;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_janitor;
