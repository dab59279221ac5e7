//! Remote Session Store
//!
//! Sessions in a remote key/value service with native per-key expiry,
//! spoken over the Redis REST protocol (Upstash / Vercel KV style): each
//! request POSTs one command array to the base URL with a bearer token and
//! reads back a `{"result": ...}` envelope.
//!
//! Safe to share across any number of server processes.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::error::{AppError, Result};
use crate::session::{SessionStore, SessionValue};

/// Namespace prefix for every session key.
const KEY_PREFIX: &str = "sess:";

// == Remote Session Store ==
pub struct RemoteSessionStore {
    client: Client,
    base_url: String,
    token: String,
}

impl RemoteSessionStore {
    /// Creates a store speaking to the given REST endpoint.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    fn key(session_id: &str) -> String {
        format!("{KEY_PREFIX}{session_id}")
    }

    /// Executes one command and returns the `result` field.
    async fn command(&self, cmd: Value) -> Result<Value> {
        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.token)
            .json(&cmd)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Storage(format!(
                "KV backend returned {}",
                response.status()
            )));
        }

        let mut envelope: Value = response.json().await?;
        match envelope.get_mut("result") {
            Some(result) => Ok(result.take()),
            None => Err(AppError::Storage(
                "KV response missing result field".to_string(),
            )),
        }
    }

    /// Every live key under the session namespace.
    async fn namespace_keys(&self) -> Result<Vec<String>> {
        let result = self
            .command(json!(["KEYS", format!("{KEY_PREFIX}*")]))
            .await?;
        let keys = result
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|k| k.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();
        Ok(keys)
    }
}

#[async_trait]
impl SessionStore for RemoteSessionStore {
    async fn get(&self, session_id: &str) -> Result<Option<SessionValue>> {
        let result = self.command(json!(["GET", Self::key(session_id)])).await?;
        match result.as_str() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, session_id: &str, value: SessionValue, ttl_seconds: u64) -> Result<()> {
        let raw = serde_json::to_string(&value)?;
        self.command(json!([
            "SET",
            Self::key(session_id),
            raw,
            "EX",
            ttl_seconds
        ]))
        .await?;
        Ok(())
    }

    async fn destroy(&self, session_id: &str) -> Result<()> {
        self.command(json!(["DEL", Self::key(session_id)])).await?;
        Ok(())
    }

    async fn all_ids(&self) -> Result<Vec<String>> {
        let ids = self
            .namespace_keys()
            .await?
            .into_iter()
            .map(|key| key.trim_start_matches(KEY_PREFIX).to_string())
            .collect();
        Ok(ids)
    }

    async fn clear(&self) -> Result<()> {
        let keys = self.namespace_keys().await?;
        if keys.is_empty() {
            return Ok(());
        }
        let mut cmd = vec![json!("DEL")];
        cmd.extend(keys.into_iter().map(Value::String));
        self.command(Value::Array(cmd)).await?;
        Ok(())
    }
}

// == Unit Tests ==
// Full contract coverage lives in tests/session_backend_tests.rs against an
// in-process mock endpoint; here only the pure helpers.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_namespacing() {
        assert_eq!(RemoteSessionStore::key("abc"), "sess:abc");
    }

    #[test]
    fn test_session_value_json_roundtrip() {
        let raw = serde_json::to_string(&SessionValue::authenticated()).unwrap();
        let back: SessionValue = serde_json::from_str(&raw).unwrap();
        assert!(back.authenticated);
    }
}
