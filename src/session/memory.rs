//! In-Memory Session Store
//!
//! Process-local bounded map with lazy TTL eviction. Used when no remote
//! store is configured; assumes a single server process.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::Result;
use crate::pages::current_timestamp_ms;
use crate::session::{SessionStore, SessionValue};

/// Sweep threshold: once the map reaches this many entries, `set` prunes
/// expired sessions before inserting.
const DEFAULT_MAX_SESSIONS: usize = 10_000;

// == Session Entry ==
#[derive(Debug, Clone)]
struct SessionEntry {
    value: SessionValue,
    /// Expiration timestamp (Unix milliseconds)
    expires_at: u64,
}

impl SessionEntry {
    fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }
}

// == Memory Session Store ==
#[derive(Debug)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, SessionEntry>>,
    max_sessions: usize,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_SESSIONS)
    }

    pub fn with_capacity(max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
        }
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, session_id: &str) -> Result<Option<SessionValue>> {
        // Fast path under the read lock
        let expired = {
            let sessions = self.sessions.read();
            match sessions.get(session_id) {
                Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
                Some(_) => true,
                None => false,
            }
        };

        // Lazy eviction of the entry we just found expired
        if expired {
            self.sessions.write().remove(session_id);
        }
        Ok(None)
    }

    async fn set(&self, session_id: &str, value: SessionValue, ttl_seconds: u64) -> Result<()> {
        let entry = SessionEntry {
            value,
            expires_at: current_timestamp_ms() + ttl_seconds * 1000,
        };

        let mut sessions = self.sessions.write();
        // Keep the map bounded: sweep expired entries once it fills up
        if sessions.len() >= self.max_sessions && !sessions.contains_key(session_id) {
            sessions.retain(|_, e| !e.is_expired());
        }
        sessions.insert(session_id.to_string(), entry);
        Ok(())
    }

    async fn destroy(&self, session_id: &str) -> Result<()> {
        self.sessions.write().remove(session_id);
        Ok(())
    }

    async fn all_ids(&self) -> Result<Vec<String>> {
        let sessions = self.sessions.read();
        Ok(sessions
            .iter()
            .filter(|(_, entry)| !entry.is_expired())
            .map(|(id, _)| id.clone())
            .collect())
    }

    async fn clear(&self) -> Result<()> {
        self.sessions.write().clear();
        Ok(())
    }
}
