//! SQLite Page Store
//!
//! Durable page table for deployments that must survive a restart.
//! Thread-safe via an internal `Mutex<Connection>`.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::Result;
use crate::pages::record::{NewPage, PageMeta, PageRecord, PageStats};
use crate::pages::token::current_timestamp_ms;
use crate::pages::{PageStore, ID_COLLISION_RETRIES};

// == Sqlite Page Store ==
pub struct SqlitePageStore {
    conn: Mutex<Connection>,
    max_content_size: usize,
}

impl SqlitePageStore {
    /// Opens (or creates) the database at `path` and ensures the schema
    /// exists. Schema creation is idempotent and happens exactly here,
    /// once, at construction.
    pub fn open(path: impl AsRef<Path>, max_content_size: usize) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::with_connection(conn, max_content_size)
    }

    /// Opens an in-memory database (for testing).
    pub fn open_in_memory(max_content_size: usize) -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?, max_content_size)
    }

    fn with_connection(conn: Connection, max_content_size: usize) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS pages (
                id TEXT PRIMARY KEY,
                content TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                secret TEXT,
                is_protected INTEGER NOT NULL DEFAULT 0,
                content_type TEXT NOT NULL DEFAULT 'html',
                title TEXT,
                description TEXT
            );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
            max_content_size,
        })
    }

    /// Lock the connection for use. Panics if poisoned.
    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }

    fn insert(&self, record: &PageRecord) -> Result<()> {
        self.conn().execute(
            "INSERT INTO pages (id, content, created_at, secret, is_protected, content_type, title, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.id,
                record.content,
                record.created_at as i64,
                record.secret,
                record.is_protected as i64,
                record.content_type,
                record.title,
                record.description,
            ],
        )?;
        Ok(())
    }

    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<PageRecord> {
        Ok(PageRecord {
            id: row.get(0)?,
            content: row.get(1)?,
            created_at: row.get::<_, i64>(2)? as u64,
            secret: row.get(3)?,
            is_protected: row.get::<_, i64>(4)? != 0,
            content_type: row.get(5)?,
            title: row.get(6)?,
            description: row.get(7)?,
        })
    }

    /// Inserts a pre-built record, bypassing generation. Test seam for
    /// records with doctored timestamps.
    #[cfg(test)]
    pub(crate) fn insert_raw(&self, record: PageRecord) {
        self.insert(&record).unwrap();
    }
}

impl PageStore for SqlitePageStore {
    fn create(&self, page: NewPage) -> Result<PageRecord> {
        let mut record = PageRecord::build(page, self.max_content_size)?;

        // Collision fallback; see ID_COLLISION_RETRIES.
        for _ in 0..ID_COLLISION_RETRIES {
            if !self.exists(&record.id)? {
                break;
            }
            record.regenerate_id();
        }
        self.insert(&record)?;

        Ok(record)
    }

    fn get_by_id(&self, id: &str) -> Result<Option<PageRecord>> {
        let record = self
            .conn()
            .query_row(
                "SELECT id, content, created_at, secret, is_protected, content_type, title, description
                 FROM pages WHERE id = ?1",
                params![id],
                Self::row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    fn exists(&self, id: &str) -> Result<bool> {
        let found: Option<i64> = self
            .conn()
            .query_row("SELECT 1 FROM pages WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    fn list_all(&self) -> Result<Vec<PageMeta>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, created_at, content_type, title, description, is_protected
             FROM pages ORDER BY created_at DESC",
        )?;
        let metas = stmt
            .query_map([], |row| {
                Ok(PageMeta {
                    id: row.get(0)?,
                    created_at: row.get::<_, i64>(1)? as u64,
                    content_type: row.get(2)?,
                    title: row.get(3)?,
                    description: row.get(4)?,
                    is_protected: row.get::<_, i64>(5)? != 0,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(metas)
    }

    fn delete_by_id(&self, id: &str) -> Result<bool> {
        let removed = self
            .conn()
            .execute("DELETE FROM pages WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    fn delete_expired(&self, window_ms: u64) -> Result<usize> {
        let cutoff = current_timestamp_ms().saturating_sub(window_ms);
        let removed = self.conn().execute(
            "DELETE FROM pages WHERE created_at < ?1",
            params![cutoff as i64],
        )?;
        Ok(removed)
    }

    fn stats(&self) -> Result<PageStats> {
        let conn = self.conn();
        let total: i64 = conn.query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))?;
        let protected: i64 = conn.query_row(
            "SELECT COUNT(*) FROM pages WHERE is_protected = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(PageStats {
            total: total as usize,
            protected: protected as usize,
        })
    }
}

// == Unit Tests ==
// Same battery as the in-memory backend: callers must not be able to tell
// the two apart.
#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqlitePageStore {
        SqlitePageStore::open_in_memory(1024 * 1024).unwrap()
    }

    fn new_page(content: &str, protect: bool) -> NewPage {
        NewPage {
            content: content.to_string(),
            content_type: "html".to_string(),
            protect,
            title: Some("title".to_string()),
            description: None,
        }
    }

    #[test]
    fn test_create_and_get_roundtrip() {
        let store = store();

        let created = store.create(new_page("<h1>hi</h1>", true)).unwrap();
        let fetched = store.get_by_id(&created.id).unwrap().unwrap();

        assert_eq!(fetched.content, "<h1>hi</h1>");
        assert_eq!(fetched.content_type, "html");
        assert!(fetched.is_protected);
        assert_eq!(fetched.secret, created.secret);
        assert_eq!(fetched.title.as_deref(), Some("title"));
        assert_eq!(fetched.created_at, created.created_at);
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
        assert!(!store.delete_by_id(&created.id).unwrap());
    }

    #[test]
    fn test_list_all_ordering() {
        let store = store();
        let first = store.create(new_page("one", false)).unwrap();

        let mut older = first.clone();
        older.id = "older".to_string();
        older.created_at -= 10_000;
        store.insert_raw(older);

        let metas = store.list_all().unwrap();
        assert_eq!(metas.len(), 2);
        assert_eq!(metas[0].id, first.id);
        assert_eq!(metas[1].id, "older");
    }

    #[test]
    fn test_delete_expired_boundary() {
        let store = store();
        let window = 60_000;
        let now = current_timestamp_ms();

        let template = store.create(new_page("keep-fresh", false)).unwrap();

        let mut stale = template.clone();
        stale.id = "stale".to_string();
        stale.created_at = now - window - 30_000;
        store.insert_raw(stale);

        let mut fresh = template.clone();
        fresh.id = "fresh".to_string();
        fresh.created_at = now - window + 30_000;
        store.insert_raw(fresh);

        let removed = store.delete_expired(window).unwrap();
        assert_eq!(removed, 1);
        assert!(!store.exists("stale").unwrap());
        assert!(store.exists("fresh").unwrap());
    }

    #[test]
    fn test_stats_counts_protected() {
        let store = store();
        store.create(new_page("a", false)).unwrap();
        store.create(new_page("b", true)).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.protected, 1);
    }

    #[test]
    fn test_create_validates_content() {
        let store = SqlitePageStore::open_in_memory(16).unwrap();
        assert!(store.create(new_page("", false)).is_err());
        assert!(store.create(new_page(&"x".repeat(17), false)).is_err());
    }

    #[test]
    fn test_schema_init_is_idempotent() {
        // Re-running the schema statement must not fail or wipe rows
        let store = store();
        store.create(new_page("kept", false)).unwrap();
        store
            .conn()
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS pages (
                    id TEXT PRIMARY KEY,
                    content TEXT NOT NULL,
                    created_at INTEGER NOT NULL,
                    secret TEXT,
                    is_protected INTEGER NOT NULL DEFAULT 0,
                    content_type TEXT NOT NULL DEFAULT 'html',
                    title TEXT,
                    description TEXT
                );",
            )
            .unwrap();
        assert_eq!(store.stats().unwrap().total, 1);
    }
}
