//! Message intent classification.
//!
//! First matching rule wins, checked in a fixed priority order. Matching is
//! substring containment on the lowercased message, same coarse scheme as
//! the pattern tables.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageIntent {
    Question,
    Greeting,
    Farewell,
    Gratitude,
    HelpRequest,
    InformationRequest,
    Enthusiasm,
    General,
}

impl MessageIntent {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageIntent::Question => "question",
            MessageIntent::Greeting => "greeting",
            MessageIntent::Farewell => "farewell",
            MessageIntent::Gratitude => "gratitude",
            MessageIntent::HelpRequest => "help_request",
            MessageIntent::InformationRequest => "information_request",
            MessageIntent::Enthusiasm => "enthusiasm",
            MessageIntent::General => "general",
        }
    }
}

impl fmt::Display for MessageIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Classify a message into one of eight intents.
///
/// Priority: question > greeting > farewell > gratitude > help_request >
/// information_request > enthusiasm > general.
pub fn classify_intent(message: &str) -> MessageIntent {
    let lower = message.to_lowercase();

    if message.contains('?') || contains_any(&lower, &["what", "how", "why", "when", "where", "who"]) {
        MessageIntent::Question
    } else if contains_any(&lower, &["hello", "hi", "hey", "good morning"]) {
        MessageIntent::Greeting
    } else if contains_any(&lower, &["bye", "goodbye", "see you"]) {
        MessageIntent::Farewell
    } else if contains_any(&lower, &["thank", "thanks", "appreciate"]) {
        MessageIntent::Gratitude
    } else if contains_any(&lower, &["help", "assist", "support"]) {
        MessageIntent::HelpRequest
    } else if contains_any(&lower, &["tell me", "explain", "describe"]) {
        MessageIntent::InformationRequest
    } else if message.contains('!') || contains_any(&lower, &["awesome", "amazing", "love", "excited"]) {
        MessageIntent::Enthusiasm
    } else {
        MessageIntent::General
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_outranks_everything() {
        assert_eq!(classify_intent("what is an anime?"), MessageIntent::Question);
        // A '?' alone is enough, even with greeting words present.
        assert_eq!(classify_intent("hello?"), MessageIntent::Question);
        // Wh-word without the question mark still counts.
        assert_eq!(classify_intent("where the band plays"), MessageIntent::Question);
    }

    #[test]
    fn greeting_and_farewell() {
        assert_eq!(classify_intent("hello there"), MessageIntent::Greeting);
        assert_eq!(classify_intent("goodbye friend"), MessageIntent::Farewell);
    }

    #[test]
    fn gratitude_and_help() {
        assert_eq!(classify_intent("thanks a lot"), MessageIntent::Gratitude);
        assert_eq!(classify_intent("please assist me"), MessageIntent::HelpRequest);
    }

    #[test]
    fn information_request() {
        assert_eq!(classify_intent("tell me more"), MessageIntent::InformationRequest);
        assert_eq!(classify_intent("describe the plot"), MessageIntent::InformationRequest);
    }

    #[test]
    fn enthusiasm_from_exclamation() {
        assert_eq!(classify_intent("that was awesome"), MessageIntent::Enthusiasm);
        assert_eq!(classify_intent("wow!"), MessageIntent::Enthusiasm);
    }

    #[test]
    fn general_fallback() {
        assert_eq!(classify_intent("the sky turned orange at dusk"), MessageIntent::General);
    }

    #[test]
    fn substring_matching_is_coarse() {
        // "hi" inside "this" triggers the greeting rule. Known limitation.
        assert_eq!(classify_intent("this band rules"), MessageIntent::Greeting);
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&MessageIntent::HelpRequest).unwrap();
        assert_eq!(json, "\"help_request\"");
        let back: MessageIntent = serde_json::from_str("\"information_request\"").unwrap();
        assert_eq!(back, MessageIntent::InformationRequest);
    }
}
