//! JSON file store — the always-available backend.
//!
//! One document (`knowledge.json` by default) holds the whole working set
//! and is rewritten wholesale on save. Saves are throttled: one write per
//! `save_every` processed messages rather than per mutation. A missing or
//! unparseable file yields a fresh default document, never an error.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::AppError;
use crate::knowledge::now_iso8601;
use crate::knowledge::store::{
    KnowledgeStore, SEARCH_KEYWORDS, SEARCH_PER_KEYWORD, SEARCH_RESULTS,
};
use crate::knowledge::types::{
    KnowledgeDocument, KnowledgeItem, LearnedPattern, StoreStats, TopicRecord,
};

#[derive(Debug)]
pub struct FileKnowledgeStore {
    path: PathBuf,
    save_every: u64,
    doc: KnowledgeDocument,
}

impl FileKnowledgeStore {
    pub fn new(path: PathBuf, save_every: u64) -> Self {
        let doc = Self::load_or_default(&path);
        Self {
            path,
            save_every: save_every.max(1),
            doc,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_or_default(path: &Path) -> KnowledgeDocument {
        let fresh = KnowledgeDocument::fresh();
        let mut doc = match fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str::<KnowledgeDocument>(&data) {
                Ok(doc) => {
                    debug!(path = %path.display(), topics = doc.topic_knowledge.len(),
                        "knowledge file loaded");
                    doc
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e,
                        "malformed knowledge file, starting from defaults");
                    fresh.clone()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no knowledge file yet, starting from defaults");
                fresh.clone()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e,
                    "cannot read knowledge file, starting from defaults");
                fresh.clone()
            }
        };
        // The authored reply and trigger tables always come from code; the
        // persisted copies exist for the document shape only.
        doc.responses = fresh.responses;
        doc.patterns = fresh.patterns;
        doc
    }

    fn sort_by_confidence(items: &mut [KnowledgeItem]) {
        items.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });
    }
}

impl KnowledgeStore for FileKnowledgeStore {
    fn store_type(&self) -> &str {
        "file"
    }

    fn is_durable(&self) -> bool {
        false
    }

    fn document(&self) -> &KnowledgeDocument {
        &self.doc
    }

    fn upsert_topic(
        &mut self,
        topic: &str,
        mutate: &mut dyn FnMut(&mut TopicRecord),
    ) -> Result<(), AppError> {
        let record = self.doc.topic_knowledge.entry(topic.to_string()).or_default();
        mutate(record);
        Ok(())
    }

    fn upsert_learned(
        &mut self,
        key: &str,
        intent: &str,
        response: &str,
    ) -> Result<(), AppError> {
        let pattern = self
            .doc
            .learned_responses
            .entry(key.to_string())
            .or_insert_with(|| LearnedPattern {
                intent: intent.to_string(),
                ..Default::default()
            });
        if !pattern.responses.iter().any(|r| r == response) {
            pattern.responses.push(response.to_string());
            pattern.total_uses += 1;
        }
        Ok(())
    }

    fn record_interaction(&mut self) {
        self.doc.user_interactions += 1;
    }

    fn maybe_save(&mut self) -> Result<(), AppError> {
        if self.doc.user_interactions % self.save_every == 0 {
            self.save()
        } else {
            Ok(())
        }
    }

    fn save(&mut self) -> Result<(), AppError> {
        self.doc.last_updated = now_iso8601();
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::Store(format!("create {}: {e}", parent.display()))
                })?;
            }
        }
        let data = serde_json::to_string_pretty(&self.doc)
            .map_err(|e| AppError::Store(format!("serialize knowledge: {e}")))?;
        fs::write(&self.path, data)
            .map_err(|e| AppError::Store(format!("write {}: {e}", self.path.display())))?;
        debug!(path = %self.path.display(), "knowledge saved");
        Ok(())
    }

    fn search(&self, keywords: &[String]) -> Result<Vec<KnowledgeItem>, AppError> {
        let mut items: Vec<KnowledgeItem> = Vec::new();
        for keyword in keywords.iter().take(SEARCH_KEYWORDS) {
            let needle = keyword.to_lowercase();
            let mut per_keyword: Vec<KnowledgeItem> = Vec::new();
            for (topic, record) in &self.doc.topic_knowledge {
                if record.facts.is_empty() {
                    continue;
                }
                let topic_hit = topic.to_lowercase().contains(&needle);
                for fact in &record.facts {
                    if topic_hit || fact.to_lowercase().contains(&needle) {
                        per_keyword.push(KnowledgeItem {
                            topic: topic.clone(),
                            content: fact.clone(),
                            source: record.source.clone(),
                            confidence: record.confidence,
                        });
                    }
                }
            }
            Self::sort_by_confidence(&mut per_keyword);
            per_keyword.truncate(SEARCH_PER_KEYWORD);
            items.extend(per_keyword);
        }
        Self::sort_by_confidence(&mut items);
        items.truncate(SEARCH_RESULTS);
        Ok(items)
    }

    fn add_knowledge(
        &mut self,
        by_topic: &BTreeMap<String, Vec<KnowledgeItem>>,
    ) -> Result<u64, AppError> {
        let mut added = 0u64;
        for items in by_topic.values() {
            for item in items {
                let record = self
                    .doc
                    .topic_knowledge
                    .entry(item.topic.clone())
                    .or_default();
                if record.mentions == 0 {
                    record.mentions = 1;
                    record.confidence = item.confidence;
                    record.source = item.source.clone();
                }
                if record.add_fact(&item.content) {
                    added += 1;
                }
            }
        }
        self.save()?;
        Ok(added)
    }

    fn stats(&self) -> Result<StoreStats, AppError> {
        Ok(StoreStats {
            knowledge_items: self.doc.fact_count(),
            conversations: 0,
            patterns: self.doc.learned_responses.len() as u64,
        })
    }

    fn reset(&mut self) -> Result<(), AppError> {
        self.doc = KnowledgeDocument::fresh();
        self.save()
    }
}
