//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Lifecycle janitor: removes pages past their retention window

mod cleanup;

pub use cleanup::spawn_janitor;
