//! Fixed intent-category pattern tables and the substring matcher over them.
//!
//! A category matches when any of its trigger substrings occurs anywhere in
//! the lowercased message. Declaration order decides ties, and containment
//! is not word-bounded ("hi" matches inside "this"). Coarse on purpose;
//! callers rely on the exact behavior.

/// Trigger substrings per category, checked in declaration order.
pub const PATTERN_TRIGGERS: &[(&str, &[&str])] = &[
    ("greeting", &["hello", "hi", "hey", "good morning", "good afternoon", "good evening"]),
    ("goodbye", &["bye", "goodbye", "see you", "farewell", "talk to you later", "gtg"]),
    ("thanks", &["thank", "thanks", "appreciate", "grateful"]),
    ("how_are_you", &["how are you", "how do you feel", "how's it going"]),
    ("what_are_you", &["what are you", "who are you", "tell me about yourself"]),
    ("help", &["help", "assist", "support", "what can you do"]),
];

/// Canned replies per category. The `default` family backs the final
/// no-keyword fallback and has no trigger row.
pub const CANNED_RESPONSES: &[(&str, &[&str])] = &[
    (
        "greeting",
        &[
            "Hello! I'm Camellia, your AI assistant. How can I help you today?",
            "Hi there! I'm Camellia. What would you like to chat about?",
            "Hey! I'm Camellia, nice to meet you. What's on your mind?",
            "Hello! I'm Camellia, ready to assist you. What can I do for you?",
        ],
    ),
    (
        "goodbye",
        &[
            "Goodbye! It was great chatting with you.",
            "See you later! Feel free to come back anytime.",
            "Take care! I'll be here when you need me.",
            "Bye! Thanks for the conversation.",
        ],
    ),
    (
        "thanks",
        &[
            "You're welcome! Happy to help.",
            "No problem at all! Glad I could assist.",
            "My pleasure! Let me know if you need anything else.",
            "You're very welcome! I'm here to help.",
        ],
    ),
    (
        "how_are_you",
        &[
            "I'm doing great, thank you for asking! How are you?",
            "I'm wonderful! Always excited to chat. How about you?",
            "I'm doing well! Ready to help with whatever you need.",
            "I'm fantastic! Thanks for asking. What's new with you?",
        ],
    ),
    (
        "what_are_you",
        &[
            "I'm Camellia, your AI assistant! I'm here to chat, help, and learn from our conversations.",
            "I'm Camellia, an AI created to be your helpful companion. I can discuss topics, answer questions, and assist with various tasks.",
            "I'm Camellia! I'm an AI assistant designed to be conversational, helpful, and friendly.",
            "I'm Camellia, your personal AI assistant. I love chatting and helping people with whatever they need.",
        ],
    ),
    (
        "help",
        &[
            "I can help with many things! Ask me questions, have a conversation, get advice, or just chat about your interests.",
            "I'm here to assist! I can answer questions, discuss topics, provide information, or simply have a friendly chat.",
            "I can help with various tasks - answering questions, having conversations, providing suggestions, or just being a good listener.",
            "I'm ready to help! Whether you need information, want to chat, or need assistance with something, I'm here for you.",
        ],
    ),
    (
        "default",
        &[
            "That's interesting! Tell me more about that.",
            "I find that fascinating. What else would you like to discuss?",
            "That's a great point. Can you elaborate?",
            "I'd love to hear more about your thoughts on this.",
            "That's quite intriguing. What's your take on it?",
            "I appreciate you sharing that with me. What else is on your mind?",
        ],
    ),
];

/// First category whose trigger occurs in the lowercased message, if any.
pub fn find_pattern_match(message_lower: &str) -> Option<&'static str> {
    for (category, triggers) in PATTERN_TRIGGERS {
        if triggers.iter().any(|t| message_lower.contains(t)) {
            return Some(category);
        }
    }
    None
}

/// Canned replies for a category, if any are authored for it.
pub fn canned_responses(category: &str) -> Option<&'static [&'static str]> {
    CANNED_RESPONSES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, replies)| *replies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_matches_first() {
        assert_eq!(find_pattern_match("hello everyone"), Some("greeting"));
        assert_eq!(find_pattern_match("hey what a day"), Some("greeting"));
    }

    #[test]
    fn later_categories_match() {
        assert_eq!(find_pattern_match("talk to you later"), Some("goodbye"));
        assert_eq!(find_pattern_match("much appreciated, grateful even"), Some("thanks"));
        assert_eq!(find_pattern_match("what can you do"), Some("help"));
    }

    #[test]
    fn declaration_order_breaks_ties() {
        // "hi" (greeting) and "bye" (goodbye) both present; greeting is
        // declared first.
        assert_eq!(find_pattern_match("hi and bye"), Some("greeting"));
    }

    #[test]
    fn substring_containment_is_not_word_bounded() {
        // "hi" inside "this" counts. Preserved quirk.
        assert_eq!(find_pattern_match("this is a plain sentence"), Some("greeting"));
        assert_eq!(find_pattern_match("riding my bicycle"), None);
    }

    #[test]
    fn no_match_on_unrelated_text() {
        assert_eq!(find_pattern_match("rust compiles to native code"), None);
    }

    #[test]
    fn every_triggered_category_has_responses() {
        for (category, _) in PATTERN_TRIGGERS {
            let replies = canned_responses(category);
            assert!(replies.is_some(), "no canned replies for {category}");
            assert!(!replies.unwrap().is_empty());
        }
    }

    #[test]
    fn default_family_exists_without_trigger() {
        assert!(canned_responses("default").is_some());
        assert!(PATTERN_TRIGGERS.iter().all(|(name, _)| *name != "default"));
    }

    #[test]
    fn unknown_category_has_none() {
        assert_eq!(canned_responses("no_such_category"), None);
    }
}
