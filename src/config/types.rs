//! Public configuration types.
//!
//! These are the resolved, ready-to-use structs the rest of the crate
//! consumes. Raw TOML deserialization types live in `raw.rs`.

use std::path::PathBuf;

// ── Knowledge store ──────────────────────────────────────────────────────────

/// Knowledge store configuration.
#[derive(Debug, Clone)]
pub struct KnowledgeConfig {
    /// Path of the JSON knowledge document (resolved against `work_dir`
    /// when relative).
    pub file: PathBuf,
    /// Path of the SQLite database (resolved against `work_dir` when
    /// relative).
    pub database: PathBuf,
    /// Whether to open the durable SQLite store at startup. A failed open
    /// degrades to the file store for the process lifetime.
    pub use_database: bool,
    /// Persist the file store every N processed messages.
    pub save_every: u64,
}

// ── Scraper ──────────────────────────────────────────────────────────────────

/// Web knowledge extractor configuration.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// User-Agent header sent with every fetch.
    pub user_agent: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Fixed delay between batch requests (politeness throttle).
    pub request_delay_ms: u64,
    /// Default cap on URLs per training batch.
    pub max_sources: usize,
    /// Reserved: consult the encyclopedia during response generation when
    /// the store has no match. Not wired into the message path — training
    /// stays an explicit out-of-band operation.
    pub lookup_on_miss: bool,
}

// ── Config (root) ────────────────────────────────────────────────────────────

/// Fully-resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_name: String,
    /// Working directory for all persistent data (already expanded, no `~`).
    pub work_dir: PathBuf,
    pub log_level: String,
    /// Optional log file (resolved against `work_dir` when relative);
    /// `None` logs to stderr.
    pub log_file: Option<PathBuf>,
    pub knowledge: KnowledgeConfig,
    pub scraper: ScraperConfig,
}
