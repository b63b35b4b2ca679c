//! Text analysis building blocks: keyword extraction, pattern tables,
//! intent and sentiment classification, reply-similarity filtering, and
//! scraped-content cleanup.
//!
//! Everything here is deterministic data-table matching. The tables are
//! plain consts so they can be unit-tested and extended without touching
//! control flow.

mod cleaner;
mod intent;
mod keywords;
mod patterns;
mod sentiment;
mod similarity;

pub use cleaner::ContentCleaner;
pub use intent::{classify_intent, MessageIntent};
pub use keywords::KeywordExtractor;
pub use patterns::{canned_responses, find_pattern_match, CANNED_RESPONSES, PATTERN_TRIGGERS};
pub use sentiment::{analyze_sentiment, Sentiment};
pub use similarity::responses_too_similar;
