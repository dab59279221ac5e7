//! Auth Module
//!
//! The access control gate: authoring-gate and page-secret decisions.

mod gate;

pub use gate::AccessGate;
