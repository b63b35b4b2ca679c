//! SQLite store — durable tables layered over an embedded file store.
//!
//! Four tables: `knowledge` (scraped facts), `conversation_history`,
//! `learning_patterns`, `web_sources`. The embedded file store keeps topic
//! records and the save throttle, so everything keeps working offline; the
//! tables add history, fact search and source tracking. Single operation
//! failures are logged and absorbed per the degrade-don't-abort rule: a
//! failed search or insert falls back to the file layer.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rusqlite::{params, Connection};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::knowledge::now_iso8601;
use crate::knowledge::store::{
    KnowledgeStore, SEARCH_KEYWORDS, SEARCH_PER_KEYWORD, SEARCH_RESULTS,
};
use crate::knowledge::stores::file::FileKnowledgeStore;
use crate::knowledge::types::{KnowledgeDocument, KnowledgeItem, StoreStats, TopicRecord};

const SCHEMA_VERSION: i64 = 1;

const SCHEMA_DDL: &str = "
CREATE TABLE IF NOT EXISTS knowledge (
    id          INTEGER PRIMARY KEY,
    topic       TEXT NOT NULL,
    content     TEXT NOT NULL,
    source      TEXT,
    confidence  REAL NOT NULL DEFAULT 0.5,
    is_verified INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_knowledge_topic ON knowledge(topic);

CREATE TABLE IF NOT EXISTS conversation_history (
    id           INTEGER PRIMARY KEY,
    session_id   TEXT NOT NULL,
    user_message TEXT NOT NULL,
    ai_response  TEXT NOT NULL,
    keywords     TEXT,
    sentiment    TEXT,
    created_at   TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_history_session ON conversation_history(session_id);

CREATE TABLE IF NOT EXISTS learning_patterns (
    id            INTEGER PRIMARY KEY,
    pattern_key   TEXT NOT NULL UNIQUE,
    intent        TEXT NOT NULL,
    responses     TEXT NOT NULL,
    total_uses    INTEGER NOT NULL DEFAULT 0,
    success_count INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS web_sources (
    id           INTEGER PRIMARY KEY,
    url          TEXT NOT NULL UNIQUE,
    title        TEXT,
    domain       TEXT,
    last_scraped TEXT,
    content_hash TEXT,
    is_active    INTEGER NOT NULL DEFAULT 1
);

PRAGMA user_version = 1;
";

#[derive(Debug)]
pub struct SqliteKnowledgeStore {
    conn: Connection,
    file: FileKnowledgeStore,
}

impl SqliteKnowledgeStore {
    /// Open (or create) the database and wrap the given file store as the
    /// offline layer.
    pub fn open(db_path: &Path, file: FileKnowledgeStore) -> Result<Self, AppError> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::Store(format!("create {}: {e}", parent.display()))
                })?;
            }
        }
        let conn = open_conn(db_path)?;
        init_schema(&conn)?;
        debug!(path = %db_path.display(), "knowledge database ready");
        Ok(Self { conn, file })
    }

    fn search_tables(&self, keywords: &[String]) -> Result<Vec<KnowledgeItem>, AppError> {
        let mut items: Vec<KnowledgeItem> = Vec::new();
        for keyword in keywords.iter().take(SEARCH_KEYWORDS) {
            let needle = format!("%{}%", keyword.to_lowercase());
            let mut stmt = self
                .conn
                .prepare(
                    "SELECT topic, content, source, confidence FROM knowledge \
                     WHERE lower(topic) LIKE ?1 OR lower(content) LIKE ?1 \
                     ORDER BY confidence DESC LIMIT ?2",
                )
                .map_err(|e| AppError::Store(format!("knowledge db: search: {e}")))?;
            let rows = stmt
                .query_map(params![needle, SEARCH_PER_KEYWORD as i64], |row| {
                    Ok(KnowledgeItem {
                        topic: row.get(0)?,
                        content: row.get(1)?,
                        source: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                        confidence: row.get(3)?,
                    })
                })
                .map_err(|e| AppError::Store(format!("knowledge db: search: {e}")))?;
            for row in rows {
                items.push(row.map_err(|e| AppError::Store(format!("knowledge db: search: {e}")))?);
            }
        }
        items.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        items.truncate(SEARCH_RESULTS);
        Ok(items)
    }

    fn insert_knowledge_rows(
        &mut self,
        by_topic: &BTreeMap<String, Vec<KnowledgeItem>>,
    ) -> Result<u64, AppError> {
        let now = now_iso8601();
        let tx = self
            .conn
            .transaction()
            .map_err(|e| AppError::Store(format!("knowledge db: begin: {e}")))?;
        let mut inserted = 0u64;
        for items in by_topic.values() {
            for item in items {
                tx.execute(
                    "INSERT INTO knowledge (topic, content, source, confidence, is_verified, created_at, updated_at) \
                     VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5)",
                    params![item.topic, item.content, item.source, item.confidence, now],
                )
                .map_err(|e| AppError::Store(format!("knowledge db: insert fact: {e}")))?;
                inserted += 1;
            }
        }
        tx.commit()
            .map_err(|e| AppError::Store(format!("knowledge db: commit: {e}")))?;
        Ok(inserted)
    }
}

impl KnowledgeStore for SqliteKnowledgeStore {
    fn store_type(&self) -> &str {
        "sqlite"
    }

    fn is_durable(&self) -> bool {
        true
    }

    fn document(&self) -> &KnowledgeDocument {
        self.file.document()
    }

    fn upsert_topic(
        &mut self,
        topic: &str,
        mutate: &mut dyn FnMut(&mut TopicRecord),
    ) -> Result<(), AppError> {
        self.file.upsert_topic(topic, mutate)
    }

    fn upsert_learned(
        &mut self,
        key: &str,
        intent: &str,
        response: &str,
    ) -> Result<(), AppError> {
        self.file.upsert_learned(key, intent, response)?;

        // Mirror the updated pattern into its table. Losing the mirror is
        // tolerable, the file layer already has it.
        if let Some(pattern) = self.file.document().learned_responses.get(key) {
            let responses_json = serde_json::to_string(&pattern.responses)
                .unwrap_or_else(|_| "[]".to_string());
            let outcome = self.conn.execute(
                "INSERT INTO learning_patterns (pattern_key, intent, responses, total_uses, success_count) \
                 VALUES (?1, ?2, ?3, ?4, ?5) \
                 ON CONFLICT(pattern_key) DO UPDATE SET \
                     responses = excluded.responses, \
                     total_uses = excluded.total_uses, \
                     success_count = excluded.success_count",
                params![key, intent, responses_json, pattern.total_uses, pattern.success_count],
            );
            if let Err(e) = outcome {
                warn!(error = %e, key, "learned pattern mirror failed");
            }
        }
        Ok(())
    }

    fn record_interaction(&mut self) {
        self.file.record_interaction();
    }

    fn maybe_save(&mut self) -> Result<(), AppError> {
        self.file.maybe_save()
    }

    fn save(&mut self) -> Result<(), AppError> {
        self.file.save()
    }

    fn search(&self, keywords: &[String]) -> Result<Vec<KnowledgeItem>, AppError> {
        match self.search_tables(keywords) {
            Ok(items) if !items.is_empty() => Ok(items),
            Ok(_) => self.file.search(keywords),
            Err(e) => {
                warn!(error = %e, "database search failed, using file store");
                self.file.search(keywords)
            }
        }
    }

    fn add_knowledge(
        &mut self,
        by_topic: &BTreeMap<String, Vec<KnowledgeItem>>,
    ) -> Result<u64, AppError> {
        match self.insert_knowledge_rows(by_topic) {
            Ok(count) => Ok(count),
            Err(e) => {
                warn!(error = %e, "database storage failed, using file store");
                self.file.add_knowledge(by_topic)
            }
        }
    }

    fn record_turn(
        &mut self,
        session_id: &str,
        user_message: &str,
        ai_response: &str,
        keywords: &[String],
        sentiment: &str,
    ) -> Result<(), AppError> {
        let keywords_json = if keywords.is_empty() {
            None
        } else {
            serde_json::to_string(keywords).ok()
        };
        let outcome = self.conn.execute(
            "INSERT INTO conversation_history \
             (session_id, user_message, ai_response, keywords, sentiment, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![session_id, user_message, ai_response, keywords_json, sentiment, now_iso8601()],
        );
        if let Err(e) = outcome {
            warn!(error = %e, "storing conversation turn failed");
        }
        Ok(())
    }

    fn record_source(&mut self, url: &str, content_hash: &str) -> Result<(), AppError> {
        let domain = url
            .split("//")
            .nth(1)
            .and_then(|rest| rest.split('/').next())
            .unwrap_or_default();
        let outcome = self.conn.execute(
            "INSERT INTO web_sources (url, domain, last_scraped, content_hash, is_active) \
             VALUES (?1, ?2, ?3, ?4, 1) \
             ON CONFLICT(url) DO UPDATE SET \
                 last_scraped = excluded.last_scraped, \
                 content_hash = excluded.content_hash",
            params![url, domain, now_iso8601(), content_hash],
        );
        if let Err(e) = outcome {
            warn!(error = %e, url, "recording web source failed");
        }
        Ok(())
    }

    fn stats(&self) -> Result<StoreStats, AppError> {
        let count = |sql: &str| -> Result<u64, AppError> {
            self.conn
                .query_row(sql, [], |row| row.get::<_, i64>(0))
                .map(|n| n as u64)
                .map_err(|e| AppError::Store(format!("knowledge db: stats: {e}")))
        };
        let gathered = (|| {
            Ok::<StoreStats, AppError>(StoreStats {
                knowledge_items: count("SELECT COUNT(*) FROM knowledge")?,
                conversations: count("SELECT COUNT(*) FROM conversation_history")?,
                patterns: count("SELECT COUNT(*) FROM learning_patterns")?,
            })
        })();
        match gathered {
            Ok(stats) => Ok(stats),
            Err(e) => {
                warn!(error = %e, "database stats failed, using file store");
                self.file.stats()
            }
        }
    }

    fn reset(&mut self) -> Result<(), AppError> {
        self.conn
            .execute_batch(
                "DELETE FROM knowledge; \
                 DELETE FROM conversation_history; \
                 DELETE FROM learning_patterns; \
                 DELETE FROM web_sources;",
            )
            .map_err(|e| AppError::Store(format!("knowledge db: reset: {e}")))?;
        self.file.reset()
    }
}

/// Open a SQLite connection and apply the standard pragmas: WAL for
/// concurrent readers, foreign keys on, 5 s busy timeout.
fn open_conn(path: &Path) -> Result<Connection, AppError> {
    let conn = Connection::open(path)
        .map_err(|e| AppError::Store(format!("knowledge db: open {}: {e}", path.display())))?;

    conn.pragma_update(None, "journal_mode", "WAL")
        .map_err(|e| AppError::Store(format!("knowledge db: set journal_mode WAL: {e}")))?;
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(|e| AppError::Store(format!("knowledge db: set foreign_keys ON: {e}")))?;
    conn.pragma_update(None, "busy_timeout", 5000)
        .map_err(|e| AppError::Store(format!("knowledge db: set busy_timeout: {e}")))?;

    Ok(conn)
}

fn init_schema(conn: &Connection) -> Result<(), AppError> {
    let version: i64 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| AppError::Store(format!("knowledge db: user_version: {e}")))?;
    match version {
        0 => conn
            .execute_batch(SCHEMA_DDL)
            .map_err(|e| AppError::Store(format!("knowledge db: create schema: {e}"))),
        v if v == SCHEMA_VERSION => Ok(()),
        v => Err(AppError::Store(format!(
            "knowledge db: unsupported schema version {v} (expected {SCHEMA_VERSION})"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, SqliteKnowledgeStore) {
        let dir = TempDir::new().unwrap();
        let file = FileKnowledgeStore::new(dir.path().join("knowledge.json"), 10);
        let store = SqliteKnowledgeStore::open(&dir.path().join("knowledge.db"), file).unwrap();
        (dir, store)
    }

    fn scraped(topic: &str, content: &str, confidence: f64) -> KnowledgeItem {
        KnowledgeItem {
            topic: topic.into(),
            content: content.into(),
            source: "https://en.wikipedia.org/wiki/Test".into(),
            confidence,
        }
    }

    #[test]
    fn open_initializes_schema() {
        let (_dir, store) = setup();
        assert_eq!(store.store_type(), "sqlite");
        assert!(store.is_durable());
        let stats = store.stats().unwrap();
        assert_eq!(stats, StoreStats::default());
    }

    #[test]
    fn reopen_keeps_schema_version() {
        let dir = TempDir::new().unwrap();
        let db = dir.path().join("knowledge.db");
        {
            let file = FileKnowledgeStore::new(dir.path().join("knowledge.json"), 10);
            SqliteKnowledgeStore::open(&db, file).unwrap();
        }
        let file = FileKnowledgeStore::new(dir.path().join("knowledge.json"), 10);
        SqliteKnowledgeStore::open(&db, file).unwrap();
    }

    #[test]
    fn future_schema_version_is_rejected() {
        let dir = TempDir::new().unwrap();
        let db = dir.path().join("knowledge.db");
        {
            let conn = Connection::open(&db).unwrap();
            conn.pragma_update(None, "user_version", 9).unwrap();
        }
        let file = FileKnowledgeStore::new(dir.path().join("knowledge.json"), 10);
        let err = SqliteKnowledgeStore::open(&db, file).unwrap_err();
        assert!(err.to_string().contains("schema version"));
    }

    #[test]
    fn add_knowledge_inserts_rows_and_search_finds_them() {
        let (_dir, mut store) = setup();
        let mut by_topic = BTreeMap::new();
        by_topic.insert(
            "artificial intelligence".to_string(),
            vec![scraped(
                "artificial intelligence",
                "Artificial intelligence is the simulation of human intelligence by machines",
                0.8,
            )],
        );
        assert_eq!(store.add_knowledge(&by_topic).unwrap(), 1);

        let hits = store.search(&["intelligence".to_string()]).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].topic, "artificial intelligence");
        assert!((hits[0].confidence - 0.8).abs() < 1e-9);

        // LIKE matching is case-insensitive via lower().
        let hits = store.search(&["INTELLIGENCE".to_string()]).unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn search_orders_and_caps() {
        let (_dir, mut store) = setup();
        let mut by_topic = BTreeMap::new();
        by_topic.insert(
            "music".to_string(),
            vec![
                scraped("music", "Music is organized sound over time", 0.5),
                scraped("music", "Music theory studies the practices of music", 0.9),
                scraped("music", "Music notation writes sounds down", 0.7),
            ],
        );
        store.add_knowledge(&by_topic).unwrap();

        let hits = store.search(&["music".to_string()]).unwrap();
        assert_eq!(hits.len(), 2, "per-keyword limit");
        assert!(hits[0].confidence >= hits[1].confidence);
        assert!((hits[0].confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn empty_tables_fall_back_to_file_layer() {
        let dir = TempDir::new().unwrap();
        let mut file = FileKnowledgeStore::new(dir.path().join("knowledge.json"), 10);
        let mut by_topic = BTreeMap::new();
        by_topic.insert(
            "guitar".to_string(),
            vec![scraped("guitar", "A guitar usually has six strings", 0.6)],
        );
        file.add_knowledge(&by_topic).unwrap();

        let store = SqliteKnowledgeStore::open(&dir.path().join("knowledge.db"), file).unwrap();
        let hits = store.search(&["guitar".to_string()]).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].content, "A guitar usually has six strings");
    }

    #[test]
    fn learned_patterns_mirror_into_table() {
        let (_dir, mut store) = setup();
        store
            .upsert_learned("general:i practice every morning", "general", "Great habit!")
            .unwrap();
        store
            .upsert_learned("general:i practice every morning", "general", "Keep it up!")
            .unwrap();

        let (responses_json, total_uses): (String, i64) = store
            .conn
            .query_row(
                "SELECT responses, total_uses FROM learning_patterns WHERE pattern_key = ?1",
                params!["general:i practice every morning"],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        let responses: Vec<String> = serde_json::from_str(&responses_json).unwrap();
        assert_eq!(responses, vec!["Great habit!", "Keep it up!"]);
        assert_eq!(total_uses, 2);
    }

    #[test]
    fn record_turn_inserts_history() {
        let (_dir, mut store) = setup();
        store
            .record_turn(
                "session-1",
                "i love music",
                "Music truly is magical!",
                &["music".to_string()],
                "positive",
            )
            .unwrap();
        store
            .record_turn("session-1", "ok", "Tell me more.", &[], "neutral")
            .unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.conversations, 2);

        let keywords: Option<String> = store
            .conn
            .query_row(
                "SELECT keywords FROM conversation_history WHERE user_message = 'ok'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(keywords.is_none(), "empty keyword list stored as NULL");
    }

    #[test]
    fn record_source_upserts_by_url() {
        let (_dir, mut store) = setup();
        store
            .record_source("https://en.wikipedia.org/wiki/Music", "hash-one")
            .unwrap();
        store
            .record_source("https://en.wikipedia.org/wiki/Music", "hash-two")
            .unwrap();

        let (count, hash, domain): (i64, String, String) = store
            .conn
            .query_row(
                "SELECT COUNT(*), content_hash, domain FROM web_sources",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(hash, "hash-two");
        assert_eq!(domain, "en.wikipedia.org");
    }

    #[test]
    fn reset_empties_all_tables() {
        let (_dir, mut store) = setup();
        let mut by_topic = BTreeMap::new();
        by_topic.insert(
            "drums".to_string(),
            vec![scraped("drums", "Drum kits anchor the rhythm section", 0.5)],
        );
        store.add_knowledge(&by_topic).unwrap();
        store.record_turn("s", "hi", "Hello!", &[], "neutral").unwrap();
        store.upsert_learned("general:hello hello hello", "general", "Hi!").unwrap();

        store.reset().unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats, StoreStats::default());
        assert!(store.document().topic_knowledge.is_empty());
    }
}
