//! Camellia — a rule-based conversational responder.
//!
//! The bot answers through a fixed cascade of strategies (canned pattern
//! categories, learned patterns, curated topics, scraped knowledge, keyword
//! templates) and learns from every exchange: topic records, learned reply
//! patterns, and optionally a SQLite history. A blocking web scraper can
//! feed it Wikipedia-style pages as new knowledge.
//!
//! # Module layout
//! - [`config`]: TOML configuration with env and CLI overrides
//! - [`engine`]: the conversation loop, memory, and response cascade
//! - [`knowledge`]: knowledge document, file and SQLite stores
//! - [`nlp`]: keyword, sentiment, intent, similarity, and cleaning helpers
//! - [`scraper`]: blocking fetcher plus the knowledge extraction heuristics
//! - [`logger`]: tracing subscriber setup
//! - [`error`]: the crate-wide error type

pub mod config;
pub mod engine;
pub mod error;
pub mod knowledge;
pub mod logger;
pub mod nlp;
pub mod scraper;

pub use config::Config;
pub use engine::{ChatEngine, ConversationStats, TrainingReport};
pub use error::AppError;
