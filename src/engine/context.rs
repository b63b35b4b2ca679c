//! Ephemeral conversation state. Everything here lives for one process
//! run and is wiped by `/clear`; durable learning goes through the store.

use std::collections::VecDeque;

use crate::knowledge::now_iso8601;
use crate::nlp::{analyze_sentiment, Sentiment};

/// Turns held in memory before the oldest falls off.
const MEMORY_TURNS: usize = 100;
/// Rolling keyword window length.
const KEYWORD_WINDOW: usize = 20;
/// AI replies consulted when avoiding repetition.
const REPLY_LOOKBACK: usize = 5;
/// Keywords from the window surfaced as recent topics.
const RECENT_TOPICS: usize = 5;

/// One exchange. The reply slot fills once generation finishes.
#[derive(Debug, Clone)]
pub struct Turn {
    pub user: String,
    pub ai: Option<String>,
    pub timestamp: String,
    pub user_id: Option<String>,
}

/// Recent turns plus the rolling keyword window.
#[derive(Debug, Default)]
pub struct ConversationMemory {
    turns: VecDeque<Turn>,
    keywords: VecDeque<String>,
}

impl ConversationMemory {
    pub fn push_user(&mut self, message: &str, user_id: Option<&str>) {
        if self.turns.len() == MEMORY_TURNS {
            self.turns.pop_front();
        }
        self.turns.push_back(Turn {
            user: message.to_string(),
            ai: None,
            timestamp: now_iso8601(),
            user_id: user_id.map(str::to_string),
        });
    }

    /// Attach the reply to the newest turn.
    pub fn push_ai(&mut self, response: &str) {
        if let Some(turn) = self.turns.back_mut() {
            turn.ai = Some(response.to_string());
        }
    }

    pub fn extend_keywords(&mut self, keywords: &[String]) {
        for keyword in keywords {
            if self.keywords.len() == KEYWORD_WINDOW {
                self.keywords.pop_front();
            }
            self.keywords.push_back(keyword.clone());
        }
    }

    /// The last few AI replies, oldest first.
    pub fn recent_ai_responses(&self) -> Vec<String> {
        let mut replies: Vec<String> = self
            .turns
            .iter()
            .rev()
            .filter_map(|turn| turn.ai.clone())
            .take(REPLY_LOOKBACK)
            .collect();
        replies.reverse();
        replies
    }

    /// Tail of the keyword window, oldest first.
    pub fn recent_topics(&self) -> Vec<String> {
        let skip = self.keywords.len().saturating_sub(RECENT_TOPICS);
        self.keywords.iter().skip(skip).cloned().collect()
    }

    /// User messages plus attached replies.
    pub fn message_count(&self) -> usize {
        self.turns
            .iter()
            .map(|turn| 1 + usize::from(turn.ai.is_some()))
            .sum()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
        self.keywords.clear();
    }
}

const WH_WORDS: &[&str] = &["what", "how", "why", "when", "where", "who"];
const GREETING_WORDS: &[&str] = &["hello", "hi", "hey", "good morning", "good afternoon"];
const FAREWELL_WORDS: &[&str] = &["bye", "goodbye", "see you", "farewell"];
const ENTHUSIASM_WORDS: &[&str] = &["awesome", "amazing", "love", "excited", "great"];
const REQUEST_PHRASES: &[&str] = &["can you", "could you", "please", "would you"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Per-message analysis flags. Substring checks, so several flags can
/// hold at once ("hi, why is this broken?" is both greeting and question).
#[derive(Debug, Clone)]
pub struct MessageContext {
    pub is_question: bool,
    pub is_greeting: bool,
    pub is_farewell: bool,
    pub sentiment: Sentiment,
    pub recent_topics: Vec<String>,
    pub message_length: usize,
    pub has_enthusiasm: bool,
    pub is_request: bool,
}

impl MessageContext {
    /// Analyze one lowercased message against the conversation memory.
    pub fn build(lowered: &str, memory: &ConversationMemory) -> Self {
        Self {
            is_question: lowered.contains('?') || contains_any(lowered, WH_WORDS),
            is_greeting: contains_any(lowered, GREETING_WORDS),
            is_farewell: contains_any(lowered, FAREWELL_WORDS),
            sentiment: analyze_sentiment(lowered),
            recent_topics: memory.recent_topics(),
            message_length: lowered.split_whitespace().count(),
            has_enthusiasm: lowered.contains('!') || contains_any(lowered, ENTHUSIASM_WORDS),
            is_request: contains_any(lowered, REQUEST_PHRASES),
        }
    }
}
