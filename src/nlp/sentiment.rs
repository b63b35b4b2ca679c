//! Lexicon-based sentiment scoring.
//!
//! Counts hits from two fixed word lists and compares the totals. Matching
//! is plain substring containment, so negation is not handled ("not good"
//! still scores positive) and embedded words count ("dislike" hits both
//! lists). Known limitation, kept for predictable behavior.

use std::fmt;

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "awesome", "amazing", "excellent", "wonderful", "fantastic",
    "love", "like", "enjoy", "happy", "excited", "cool", "nice", "best", "fun",
    "perfect", "brilliant", "interesting", "beautiful",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "hate", "dislike", "sad", "angry",
    "worst", "boring", "annoying", "frustrating", "disappointed", "wrong",
    "broken", "poor", "upset", "ugly",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score a message against the two lexicons. Pure function of its input.
pub fn analyze_sentiment(message: &str) -> Sentiment {
    let lower = message.to_lowercase();
    let positive = POSITIVE_WORDS.iter().filter(|w| lower.contains(*w)).count();
    let negative = NEGATIVE_WORDS.iter().filter(|w| lower.contains(*w)).count();

    if positive > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}
