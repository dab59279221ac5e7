//! Session Module
//!
//! Ephemeral authentication state for the authoring UI, behind a uniform
//! five-operation contract with interchangeable backends.

mod memory;
mod remote;

pub use memory::MemorySessionStore;
pub use remote::RemoteSessionStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

// == Session Value ==
/// Flags remembered for one session. Minimal on purpose: the only thing the
/// authoring gate ever asks is whether the session logged in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionValue {
    /// Set once the shared authoring password has been presented
    pub authenticated: bool,
}

impl SessionValue {
    /// A freshly authenticated session.
    pub fn authenticated() -> Self {
        Self {
            authenticated: true,
        }
    }
}

// == Session Store Contract ==
/// The session store contract: exactly five operations, identical semantics
/// from every backend.
///
/// Guarantees:
/// - `get` after `set` within the TTL window returns an equivalent value
/// - `get` after the TTL elapses returns `None`
/// - `destroy` makes a subsequent `get` return `None` regardless of TTL
/// - every operation except `set` is idempotent; `set` overwrites
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Looks up a session. `None` for unknown ids and for expired entries.
    async fn get(&self, session_id: &str) -> Result<Option<SessionValue>>;

    /// Stores (or overwrites) a session with a per-entry TTL.
    async fn set(&self, session_id: &str, value: SessionValue, ttl_seconds: u64) -> Result<()>;

    /// Removes a session. Removing an absent session is a success.
    async fn destroy(&self, session_id: &str) -> Result<()>;

    /// Every live session id under this store's namespace.
    /// Administrative/debug enumeration only, never on a hot path.
    async fn all_ids(&self) -> Result<Vec<String>>;

    /// Removes every session under this store's namespace.
    async fn clear(&self) -> Result<()>;
}
