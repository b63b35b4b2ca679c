//! Knowledge subsystem — the persisted memory behind every reply.
//!
//! One [`KnowledgeDocument`] holds everything the bot knows: canned reply
//! tables, per-topic records, learned response patterns, and the interaction
//! counter. Stores persist that document and answer keyword searches over it.
//!
//! ```text
//! {work_dir}/
//! ├── knowledge.json   file store (always present)
//! └── knowledge.db     SQLite store (optional, durable layer)
//! ```
//!
//! # Module layout
//!
//! - **types** — Serialized data model (`KnowledgeDocument`, `TopicRecord`,
//!   `LearnedPattern`, `KnowledgeItem`, `StoreStats`).
//! - **store** — The [`KnowledgeStore`] trait the engine programs against,
//!   plus the shared search limits.
//! - **stores** — Backends: `file` (JSON document) and `sqlite` (feature
//!   `store-sqlite`), and [`open_store`] which picks one from config.

pub mod store;
pub mod stores;
pub mod types;

pub use store::{KnowledgeStore, SEARCH_KEYWORDS, SEARCH_PER_KEYWORD, SEARCH_RESULTS};
pub use stores::{open_store, FileKnowledgeStore};
#[cfg(feature = "store-sqlite")]
pub use stores::SqliteKnowledgeStore;
pub use types::{
    KnowledgeDocument, KnowledgeItem, LearnedPattern, StoreStats, TopicRecord, TOPIC_LIST_CAP,
};

use chrono::{SecondsFormat, Utc};
use sha2::{Digest, Sha256};

/// Return the lowercase hex-encoded SHA-256 digest of `content`.
/// Used as a stable content fingerprint for scraped pages.
pub(crate) fn sha256_hex(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Return the current UTC time as an RFC 3339 string with second precision,
/// e.g. `"2025-04-01T12:00:00Z"`.
pub(crate) fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
