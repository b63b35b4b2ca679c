//! Data model shared by the knowledge stores.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::nlp::{CANNED_RESPONSES, PATTERN_TRIGGERS};

/// Bound on the rolling per-topic lists (contexts, sentiments, questions).
/// Oldest entries are evicted first.
pub const TOPIC_LIST_CAP: usize = 10;

/// Everything the system has accumulated about one topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicRecord {
    #[serde(default)]
    pub mentions: u64,
    #[serde(default)]
    pub contexts: Vec<String>,
    #[serde(default)]
    pub facts: Vec<String>,
    #[serde(default)]
    pub sentiment_associations: Vec<String>,
    #[serde(default)]
    pub question_patterns: Vec<String>,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_confidence() -> f64 {
    0.5
}

fn default_source() -> String {
    "learned".to_string()
}

impl Default for TopicRecord {
    fn default() -> Self {
        Self {
            mentions: 0,
            contexts: Vec::new(),
            facts: Vec::new(),
            sentiment_associations: Vec::new(),
            question_patterns: Vec::new(),
            confidence: default_confidence(),
            source: default_source(),
        }
    }
}

impl TopicRecord {
    /// Append a fact unless an identical one is already stored.
    /// Returns whether the fact was added.
    pub fn add_fact(&mut self, fact: &str) -> bool {
        if self.facts.iter().any(|f| f == fact) {
            return false;
        }
        self.facts.push(fact.to_string());
        true
    }

    /// Evict oldest entries from the rolling lists down to [`TOPIC_LIST_CAP`].
    pub fn truncate_rolling_lists(&mut self) {
        for list in [
            &mut self.contexts,
            &mut self.sentiment_associations,
            &mut self.question_patterns,
        ] {
            if list.len() > TOPIC_LIST_CAP {
                let excess = list.len() - TOPIC_LIST_CAP;
                list.drain(..excess);
            }
        }
    }
}

/// Replies previously given for one (intent, message-prefix) trigger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LearnedPattern {
    #[serde(default)]
    pub responses: Vec<String>,
    #[serde(default)]
    pub intent: String,
    #[serde(default)]
    pub total_uses: u64,
    #[serde(default)]
    pub success_count: u64,
}

/// One scraped (or stored) fact with provenance. Also the shape returned
/// by keyword search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    pub topic: String,
    pub content: String,
    pub source: String,
    pub confidence: f64,
}

/// The persisted document: the whole working set of the file store,
/// rewritten wholesale on every save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    #[serde(default)]
    pub responses: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub patterns: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub learned_responses: BTreeMap<String, LearnedPattern>,
    #[serde(default)]
    pub topic_knowledge: BTreeMap<String, TopicRecord>,
    #[serde(default)]
    pub user_interactions: u64,
    #[serde(default)]
    pub last_updated: String,
}

impl KnowledgeDocument {
    /// A fresh document seeded with the authored pattern and response
    /// tables. Learned state starts empty.
    pub fn fresh() -> Self {
        let owned = |table: &[(&str, &[&str])]| {
            table
                .iter()
                .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
                .collect::<BTreeMap<String, Vec<String>>>()
        };
        Self {
            responses: owned(CANNED_RESPONSES),
            patterns: owned(PATTERN_TRIGGERS),
            learned_responses: BTreeMap::new(),
            topic_knowledge: BTreeMap::new(),
            user_interactions: 0,
            last_updated: String::new(),
        }
    }

    /// Total stored facts across all topics.
    pub fn fact_count(&self) -> u64 {
        self.topic_knowledge.values().map(|t| t.facts.len() as u64).sum()
    }
}

/// Store-side counters surfaced in conversation statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub knowledge_items: u64,
    pub conversations: u64,
    pub patterns: u64,
}
