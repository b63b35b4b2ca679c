//! Interaction learning. Every processed turn feeds topic records, and
//! substantial messages additionally seed the learned-pattern table.

use tracing::warn;

use crate::knowledge::KnowledgeStore;
use crate::nlp::{classify_intent, Sentiment};

/// Messages longer than this (in bytes) teach a learned pattern.
const MIN_LEARNABLE_LEN: usize = 10;
/// How much of the message goes into the pattern key.
const PATTERN_KEY_LEN: usize = 30;

/// Fold one exchange into the store. Failures are logged and absorbed so
/// a broken store never breaks the conversation.
pub(crate) fn learn_from_interaction(
    store: &mut dyn KnowledgeStore,
    raw_message: &str,
    lowered: &str,
    response: &str,
    keywords: &[String],
    sentiment: Sentiment,
) {
    let is_question = lowered.contains('?');

    for keyword in keywords {
        let result = store.upsert_topic(keyword, &mut |record| {
            let seen_before = record.mentions > 0;
            record.mentions += 1;
            record.contexts.push(raw_message.to_string());
            record
                .sentiment_associations
                .push(sentiment.as_str().to_string());
            if seen_before {
                if is_question {
                    record.question_patterns.push(raw_message.to_string());
                }
                record.truncate_rolling_lists();
            }
        });
        if let Err(error) = result {
            warn!(topic = %keyword, %error, "topic update failed");
        }
    }

    if lowered.len() > MIN_LEARNABLE_LEN {
        let intent = classify_intent(lowered);
        let prefix: String = lowered.chars().take(PATTERN_KEY_LEN).collect();
        let key = format!("{}:{}", intent.as_str(), prefix);
        if let Err(error) = store.upsert_learned(&key, intent.as_str(), response) {
            warn!(%key, %error, "pattern update failed");
        }
    }
}
