//! The storage contract the chat engine programs against.
//!
//! Two implementations exist: a JSON file store that is always available,
//! and a SQLite store (feature `store-sqlite`) that layers durable tables
//! on top of an embedded file store so the process stays usable offline.

use std::collections::BTreeMap;

use crate::error::AppError;
use crate::knowledge::types::{KnowledgeDocument, KnowledgeItem, StoreStats, TopicRecord};

/// Keywords considered by a search, front of the list.
pub const SEARCH_KEYWORDS: usize = 2;
/// Hits kept per keyword before merging.
pub const SEARCH_PER_KEYWORD: usize = 2;
/// Hits returned overall, best confidence first.
pub const SEARCH_RESULTS: usize = 3;

pub trait KnowledgeStore: Send {
    fn store_type(&self) -> &str;

    /// True when a database backs this store. Gates the enhanced response
    /// path and per-turn history recording.
    fn is_durable(&self) -> bool;

    /// Read access to the in-memory working set.
    fn document(&self) -> &KnowledgeDocument;

    /// Create-or-update a topic record. A missing topic starts from
    /// `TopicRecord::default()` before `mutate` runs.
    fn upsert_topic(
        &mut self,
        topic: &str,
        mutate: &mut dyn FnMut(&mut TopicRecord),
    ) -> Result<(), AppError>;

    /// Record a reply under a learned-pattern key, deduplicating by exact
    /// string.
    fn upsert_learned(&mut self, key: &str, intent: &str, response: &str)
        -> Result<(), AppError>;

    /// Bump the processed-message counter.
    fn record_interaction(&mut self);

    /// Persist if the interaction counter crossed the save interval.
    fn maybe_save(&mut self) -> Result<(), AppError>;

    /// Persist unconditionally.
    fn save(&mut self) -> Result<(), AppError>;

    /// Case-insensitive substring search over topic names and fact text,
    /// best confidence first, capped at [`SEARCH_RESULTS`].
    fn search(&self, keywords: &[String]) -> Result<Vec<KnowledgeItem>, AppError>;

    /// Merge scraped knowledge, grouped by topic. Returns how many facts
    /// were newly stored.
    fn add_knowledge(
        &mut self,
        by_topic: &BTreeMap<String, Vec<KnowledgeItem>>,
    ) -> Result<u64, AppError>;

    /// Record one conversation turn. File-only stores keep no history.
    fn record_turn(
        &mut self,
        _session_id: &str,
        _user_message: &str,
        _ai_response: &str,
        _keywords: &[String],
        _sentiment: &str,
    ) -> Result<(), AppError> {
        Ok(())
    }

    /// Track a scraped source URL. File-only stores keep no source table.
    fn record_source(&mut self, _url: &str, _content_hash: &str) -> Result<(), AppError> {
        Ok(())
    }

    fn stats(&self) -> Result<StoreStats, AppError>;

    /// Drop all learned state and start from the fresh document. Explicit
    /// and destructive.
    fn reset(&mut self) -> Result<(), AppError>;
}
