//! Response strategies. Each function implements one rung of the cascade
//! and stays side-effect free; `ChatEngine` owns the ordering and the
//! store writes.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::knowledge::{KnowledgeDocument, KnowledgeItem};
use crate::nlp::{find_pattern_match, responses_too_similar, ContentCleaner};
use crate::nlp::Sentiment;

use super::context::MessageContext;
use super::data;

/// Character budget for facts spliced into knowledge templates.
const KNOWLEDGE_FACT_BUDGET: usize = 200;

pub(crate) fn wants_joke(lowered: &str) -> bool {
    data::JOKE_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}

pub(crate) fn wants_coding_help(lowered: &str) -> bool {
    data::CODING_WORDS.iter().any(|word| lowered.contains(word))
}

pub(crate) fn tell_joke(rng: &mut StdRng) -> String {
    let joke = data::JOKES.choose(rng).copied().unwrap_or(data::JOKES[0]);
    let followup = data::JOKE_FOLLOWUPS
        .choose(rng)
        .copied()
        .unwrap_or(data::JOKE_FOLLOWUPS[0]);
    format!("{joke} {followup}")
}

/// Canned-category reply when a trigger phrase occurs in the message.
pub(crate) fn pattern_response(
    rng: &mut StdRng,
    doc: &KnowledgeDocument,
    lowered: &str,
) -> Option<String> {
    let category = find_pattern_match(lowered)?;
    let replies = doc.responses.get(category)?;
    replies.choose(rng).cloned()
}

/// Learned-pattern reply. The stored key keeps its intent prefix, so a
/// whole key rarely occurs inside a message; that behavior is load-bearing
/// for saved knowledge files and stays as is.
pub(crate) fn learned_response(
    rng: &mut StdRng,
    doc: &KnowledgeDocument,
    lowered: &str,
) -> Option<String> {
    for (key, pattern) in &doc.learned_responses {
        if lowered.contains(key.as_str()) && !pattern.responses.is_empty() {
            return pattern.responses.choose(rng).cloned();
        }
    }
    None
}

/// Match keywords against the curated topic table: exact name, then the
/// alias table, then bidirectional substring.
pub(crate) fn find_best_topic_match(keywords: &[String]) -> Option<&'static str> {
    for keyword in keywords {
        let lowered = keyword.to_lowercase();
        if let Some((name, _)) = data::TOPIC_RESPONSES.iter().find(|(name, _)| *name == lowered) {
            return Some(name);
        }
    }
    for keyword in keywords {
        let lowered = keyword.to_lowercase();
        if let Some((_, target)) = data::TOPIC_ALIASES.iter().find(|(alias, _)| *alias == lowered)
        {
            return Some(target);
        }
    }
    for keyword in keywords {
        let lowered = keyword.to_lowercase();
        for (name, _) in data::TOPIC_RESPONSES {
            if name.contains(&lowered) || lowered.contains(name) {
                return Some(name);
            }
        }
    }
    None
}

/// Curated-topic reply: optional opener, a description not too close to
/// anything recently said, optional closing question.
pub(crate) fn topic_table_response(
    rng: &mut StdRng,
    keywords: &[String],
    context: &MessageContext,
    recent: &[String],
) -> Option<String> {
    let topic = find_best_topic_match(keywords)?;
    let descriptions = data::topic_descriptions(topic)?;
    Some(select_varied_response(rng, topic, descriptions, context, recent))
}

pub(crate) fn select_varied_response(
    rng: &mut StdRng,
    topic: &str,
    descriptions: &[&str],
    context: &MessageContext,
    recent: &[String],
) -> String {
    let mut parts: Vec<String> = Vec::new();

    if rng.gen_bool(0.5) {
        let opener = if context.is_question {
            data::QUESTION_STARTERS
                .choose(rng)
                .map(|starter| format!("{starter} {topic},"))
        } else if context.has_enthusiasm {
            data::ENTHUSIASM_OPENERS.choose(rng).map(|s| (*s).to_string())
        } else {
            data::OPINION_PHRASES.choose(rng).map(|s| (*s).to_string())
        };
        if let Some(opener) = opener {
            parts.push(opener);
        }
    }

    let fresh: Vec<&str> = descriptions
        .iter()
        .copied()
        .filter(|description| {
            !recent.iter().any(|reply| responses_too_similar(description, reply))
        })
        .collect();
    let body = match fresh.choose(rng) {
        Some(description) => (*description).to_string(),
        None => data::varied_topic_fallback(topic),
    };
    parts.push(body);

    if rng.gen_bool(0.5) {
        if let Some(closing) = data::CONTINUATION_PHRASES.choose(rng) {
            parts.push((*closing).to_string());
        }
    }

    parts.join(" ")
}

/// Splice a stored fact into a question- or statement-shaped template.
/// Hits arrive confidence-descending; a hit whose content cleans to
/// nothing, or whose every rendering repeats a recent reply, is skipped.
pub(crate) fn knowledge_based_response(
    rng: &mut StdRng,
    cleaner: &ContentCleaner,
    hits: &[KnowledgeItem],
    context: &MessageContext,
    recent: &[String],
) -> Option<String> {
    for hit in hits {
        let fact = cleaner.clean(&hit.content, KNOWLEDGE_FACT_BUDGET);
        if fact.is_empty() {
            continue;
        }
        let rendered = data::knowledge_templates(&hit.topic, &fact, context.is_question);
        let fresh: Vec<&String> = rendered
            .iter()
            .filter(|candidate| {
                !recent.iter().any(|reply| responses_too_similar(candidate, reply))
            })
            .collect();
        if let Some(reply) = fresh.choose(rng) {
            return Some((*reply).clone());
        }
    }
    None
}

/// Generic keyword reply, conditioned on question-ness, sentiment, and
/// whether the lead keyword already has a topic record.
pub(crate) fn intelligent_keyword_response(
    rng: &mut StdRng,
    doc: &KnowledgeDocument,
    keywords: &[String],
    context: &MessageContext,
    recent: &[String],
) -> String {
    let main_keyword = keywords.first().map(String::as_str).unwrap_or("that");
    let known = doc.topic_knowledge.contains_key(main_keyword);
    let rendered =
        data::intelligent_templates(main_keyword, context.is_question, context.sentiment, known);
    let fresh: Vec<&String> = rendered
        .iter()
        .filter(|candidate| !recent.iter().any(|reply| responses_too_similar(candidate, reply)))
        .collect();
    match fresh.choose(rng) {
        Some(reply) => (*reply).clone(),
        None => data::neutral_keyword_fallback(main_keyword),
    }
}

/// Final rung for keyword-less messages.
pub(crate) fn sentiment_based_response(
    rng: &mut StdRng,
    doc: &KnowledgeDocument,
    context: &MessageContext,
) -> String {
    if context.is_greeting {
        if let Some(reply) = canned_pick(rng, doc, "greeting") {
            return reply;
        }
    }
    if context.is_farewell {
        if let Some(reply) = canned_pick(rng, doc, "goodbye") {
            return reply;
        }
    }
    match context.sentiment {
        Sentiment::Positive => pick_static(rng, data::POSITIVE_REPLIES),
        Sentiment::Negative => pick_static(rng, data::NEGATIVE_REPLIES),
        Sentiment::Neutral => canned_pick(rng, doc, "default")
            .unwrap_or_else(|| "That's interesting! Tell me more.".to_string()),
    }
}

fn canned_pick(rng: &mut StdRng, doc: &KnowledgeDocument, family: &str) -> Option<String> {
    doc.responses.get(family).and_then(|replies| replies.choose(rng).cloned())
}

fn pick_static(rng: &mut StdRng, options: &[&str]) -> String {
    options
        .choose(rng)
        .copied()
        .unwrap_or("That's interesting! Tell me more.")
        .to_string()
}
