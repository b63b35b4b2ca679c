//! Raw TOML deserialization types.
//!
//! These structs mirror the TOML file shape and use `serde` defaults.
//! The `load` module converts them into the public `types` structs.

use serde::Deserialize;

// ── Top-level ────────────────────────────────────────────────────────────────

/// Raw TOML shape — serde target before resolution.
#[derive(Deserialize)]
pub(super) struct RawConfig {
    pub bot: RawBot,
    #[serde(default)]
    pub knowledge: RawKnowledge,
    #[serde(default)]
    pub scraper: RawScraper,
}

#[derive(Deserialize)]
pub(super) struct RawBot {
    pub name: String,
    pub work_dir: String,
    pub log_level: String,
    #[serde(default)]
    pub log_file: Option<String>,
}

// ── Knowledge store ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawKnowledge {
    #[serde(default = "default_knowledge_file")]
    pub file: String,
    #[serde(default = "default_database_file")]
    pub database: String,
    #[serde(default = "default_true")]
    pub use_database: bool,
    #[serde(default = "default_save_every")]
    pub save_every: u64,
}

impl Default for RawKnowledge {
    fn default() -> Self {
        Self {
            file: default_knowledge_file(),
            database: default_database_file(),
            use_database: true,
            save_every: default_save_every(),
        }
    }
}

// ── Scraper ──────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawScraper {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    #[serde(default = "default_max_sources")]
    pub max_sources: usize,
    #[serde(default = "default_false")]
    pub lookup_on_miss: bool,
}

impl Default for RawScraper {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout_seconds(),
            request_delay_ms: default_request_delay_ms(),
            max_sources: default_max_sources(),
            lookup_on_miss: false,
        }
    }
}

// ── Default functions (used by serde) ────────────────────────────────────────

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

pub(super) fn default_knowledge_file() -> String {
    "knowledge.json".to_string()
}

pub(super) fn default_database_file() -> String {
    "knowledge.db".to_string()
}

pub(super) fn default_save_every() -> u64 {
    10
}

pub(super) fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

pub(super) fn default_timeout_seconds() -> u64 {
    10
}

pub(super) fn default_request_delay_ms() -> u64 {
    1000
}

pub(super) fn default_max_sources() -> usize {
    5
}
