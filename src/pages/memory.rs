//! In-Memory Page Store
//!
//! Process-local page table backed by a HashMap. The default backend and
//! the one the test suite runs against.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::Result;
use crate::pages::record::{NewPage, PageMeta, PageRecord, PageStats};
use crate::pages::token::current_timestamp_ms;
use crate::pages::{PageStore, ID_COLLISION_RETRIES};

// == Memory Page Store ==
/// HashMap-backed `PageStore`. Interior locking keeps the sync trait usable
/// behind an `Arc` from any number of request workers.
#[derive(Debug)]
pub struct MemoryPageStore {
    pages: RwLock<HashMap<String, PageRecord>>,
    max_content_size: usize,
}

impl MemoryPageStore {
    /// Creates an empty store with the given content size ceiling.
    pub fn new(max_content_size: usize) -> Self {
        Self {
            pages: RwLock::new(HashMap::new()),
            max_content_size,
        }
    }

    /// Inserts a pre-built record, bypassing generation. Test seam for
    /// records with doctored timestamps.
    #[cfg(test)]
    pub(crate) fn insert_raw(&self, record: PageRecord) {
        self.pages.write().insert(record.id.clone(), record);
    }
}

impl PageStore for MemoryPageStore {
    fn create(&self, page: NewPage) -> Result<PageRecord> {
        let mut record = PageRecord::build(page, self.max_content_size)?;

        let mut pages = self.pages.write();
        // Collision fallback; see ID_COLLISION_RETRIES.
        for _ in 0..ID_COLLISION_RETRIES {
            if !pages.contains_key(&record.id) {
                break;
            }
            record.regenerate_id();
        }
        pages.insert(record.id.clone(), record.clone());

        Ok(record)
    }

    fn get_by_id(&self, id: &str) -> Result<Option<PageRecord>> {
        Ok(self.pages.read().get(id).cloned())
    }

    fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.pages.read().contains_key(id))
    }

    fn list_all(&self) -> Result<Vec<PageMeta>> {
        let mut metas: Vec<PageMeta> = self.pages.read().values().map(PageRecord::meta).collect();
        metas.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(metas)
    }

    fn delete_by_id(&self, id: &str) -> Result<bool> {
        Ok(self.pages.write().remove(id).is_some())
    }

    fn delete_expired(&self, window_ms: u64) -> Result<usize> {
        // One clock reading per sweep so every record sees the same cutoff
        let now = current_timestamp_ms();
        let mut pages = self.pages.write();
        let before = pages.len();
        pages.retain(|_, record| !record.is_expired_at(now, window_ms));
        Ok(before - pages.len())
    }

    fn stats(&self) -> Result<PageStats> {
        let pages = self.pages.read();
        Ok(PageStats {
            total: pages.len(),
            protected: pages.values().filter(|r| r.is_protected).count(),
        })
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryPageStore {
        MemoryPageStore::new(1024 * 1024)
    }

    fn new_page(content: &str, protect: bool) -> NewPage {
        NewPage {
            content: content.to_string(),
            content_type: "html".to_string(),
            protect,
            title: None,
            description: None,
        }
    }

    #[test]
    fn test_create_and_get_roundtrip() {
        let store = store();

        let created = store.create(new_page("<h1>hi</h1>", false)).unwrap();
        let fetched = store.get_by_id(&created.id).unwrap().unwrap();

        assert_eq!(fetched.content, "<h1>hi</h1>");
        assert_eq!(fetched.content_type, "html");
        assert!(!fetched.is_protected);
        assert_eq!(fetched.secret, created.secret);
    }

    #[test]
    fn test_get_nonexistent() {
        let store = store();
        assert!(store.get_by_id("missing").unwrap().is_none());
    }

    #[test]
    fn test_exists() {
        let store = store();
        let created = store.create(new_page("body", false)).unwrap();

        assert!(store.exists(&created.id).unwrap());
        assert!(!store.exists("missing").unwrap());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = store();
        let created = store.create(new_page("body", false)).unwrap();

        assert!(store.delete_by_id(&created.id).unwrap());
        assert!(store.get_by_id(&created.id).unwrap().is_none());
        // Second delete reports nothing removed
        assert!(!store.delete_by_id(&created.id).unwrap());
    }

    #[test]
    fn test_list_all_ordering() {
        let store = store();
        let first = store.create(new_page("one", true)).unwrap();
        let mut older = first.clone();
        older.id = "older".to_string();
        older.created_at -= 10_000;
        store.insert_raw(older);

        let metas = store.list_all().unwrap();
        assert_eq!(metas.len(), 2);
        // created_at descending: the newer record first
        assert_eq!(metas[0].id, first.id);
        assert_eq!(metas[1].id, "older");
    }

    #[test]
    fn test_delete_expired_boundary() {
        let store = store();
        let window = 60_000;
        let now = current_timestamp_ms();

        let template = store.create(new_page("keep-fresh", false)).unwrap();

        // Far past the edge: removed
        let mut stale = template.clone();
        stale.id = "stale".to_string();
        stale.created_at = now - window - 30_000;
        store.insert_raw(stale);

        // Well within the window: kept (wide margins so a slow test run
        // cannot move a record across the cutoff)
        let mut fresh = template.clone();
        fresh.id = "fresh".to_string();
        fresh.created_at = now - window + 30_000;
        store.insert_raw(fresh);

        let removed = store.delete_expired(window).unwrap();
        assert_eq!(removed, 1);
        assert!(!store.exists("stale").unwrap());
        assert!(store.exists("fresh").unwrap());
        assert!(store.exists(&template.id).unwrap());
    }

    #[test]
    fn test_stats_counts_protected() {
        let store = store();
        store.create(new_page("a", false)).unwrap();
        store.create(new_page("b", true)).unwrap();
        store.create(new_page("c", true)).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.protected, 2);
    }

    #[test]
    fn test_create_validates_content() {
        let store = MemoryPageStore::new(16);
        assert!(store.create(new_page("", false)).is_err());
        assert!(store.create(new_page(&"x".repeat(17), false)).is_err());
    }
}
