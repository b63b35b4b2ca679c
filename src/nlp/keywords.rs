//! Keyword extraction: alphabetic tokens minus stop words, plus a small
//! regex table for title-like tokens (hyphen or exclamation formations)
//! that plain word tokenization would split apart.

use std::collections::HashSet;

use regex::Regex;

use crate::error::AppError;

/// Function words dropped from every message before keyword selection.
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers",
    "herself", "it", "its", "itself", "they", "them", "their", "theirs", "themselves",
    "what", "which", "who", "whom", "this", "that", "these", "those", "am", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "having", "do", "does",
    "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because", "as", "until",
    "while", "of", "at", "by", "for", "with", "through", "during", "before", "after",
    "above", "below", "up", "down", "in", "out", "on", "off", "over", "under", "again",
    "further", "then", "once", "know", "tell", "about",
];

/// Title-like formations checked against the original-case message.
/// Matched case-insensitively; each hit is kept in both lowercase and
/// original case.
const SPECIAL_PATTERNS: &[&str] = &[
    r"(?i)\bK-On!?\b",
    r"(?i)\bBocchi[^a-z]*Rock\b",
    r"(?i)\b[A-Za-z]+[!-][A-Za-z]*\b",
    r"(?i)\b[A-Z][a-z]*-[A-Z][a-z]*\b",
];

pub struct KeywordExtractor {
    special: Vec<Regex>,
    word: Regex,
    stop_words: HashSet<&'static str>,
}

impl KeywordExtractor {
    pub fn new() -> Result<Self, AppError> {
        let mut special = Vec::with_capacity(SPECIAL_PATTERNS.len());
        for src in SPECIAL_PATTERNS {
            let re = Regex::new(src)
                .map_err(|e| AppError::Engine(format!("keyword pattern {src:?}: {e}")))?;
            special.push(re);
        }
        let word = Regex::new(r"\b[a-zA-Z]+\b")
            .map_err(|e| AppError::Engine(format!("word token pattern: {e}")))?;
        Ok(Self {
            special,
            word,
            stop_words: STOP_WORDS.iter().copied().collect(),
        })
    }

    /// Extract distinct keywords from a message.
    ///
    /// Word tokens come from the lowercased message with stop words and
    /// tokens shorter than 3 characters dropped. Special-pattern matches are
    /// appended afterwards, lowercase first, original case second when they
    /// differ. Duplicates are removed preserving first-seen order so the
    /// result is deterministic.
    pub fn extract(&self, message: &str) -> Vec<String> {
        let mut special_hits: Vec<String> = Vec::new();
        for re in &self.special {
            for m in re.find_iter(message) {
                special_hits.push(m.as_str().to_string());
            }
        }

        let lower = message.to_lowercase();
        let mut keywords: Vec<String> = Vec::new();
        for m in self.word.find_iter(&lower) {
            let token = m.as_str();
            if token.len() > 2 && !self.stop_words.contains(token) {
                keywords.push(token.to_string());
            }
        }

        for hit in special_hits {
            let folded = hit.to_lowercase();
            if folded != hit {
                keywords.push(folded);
                keywords.push(hit);
            } else {
                keywords.push(folded);
            }
        }

        let mut seen = HashSet::new();
        keywords.retain(|k| seen.insert(k.clone()));
        keywords
    }
}
