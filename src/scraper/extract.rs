//! Text heuristics for knowledge extraction.
//!
//! Everything here is pure string work: HTML reduction, main-topic
//! detection, sentence relevance filtering, topic candidates and the
//! confidence score. The patterns are deliberately coarse; they trade
//! precision for never choking on arbitrary page text.

use std::collections::HashSet;

use regex::Regex;

use crate::error::AppError;
use crate::knowledge::types::KnowledgeItem;

/// Pages whose reduced text is shorter than this carry no knowledge.
const MIN_TEXT_LEN: usize = 50;
/// Sentences at or below this length are noise.
const MIN_SENTENCE_LEN: usize = 20;
/// Cap on sentences examined per page.
const MAX_SENTENCES: usize = 100;
/// Cap on topic candidates kept per sentence.
const MAX_TOPICS_PER_SENTENCE: usize = 5;
/// Cap on knowledge items minted per sentence.
const MAX_ITEMS_PER_SENTENCE: usize = 2;

/// Navigation and boilerplate markers; a sentence matching any of these is
/// dropped whole.
const SKIP_PATTERNS: &[&str] = &[
    r"(?i)^\s*\d+\s*$",
    r"(?i)jump to navigation",
    r"(?i)coordinates:",
    r"(?i)this article",
    r"(?i)wikipedia",
    r"(?i)^see also",
    r"(?i)^external links",
    r"(?i)^references",
];

/// Verb shapes that mark a sentence as factual rather than conversational.
const FACTUAL_PATTERNS: &[&str] = &[
    r"(?i)\bis\s+(?:a|an|the)\s+\w+",
    r"(?i)\bwas\s+(?:created|written|produced|directed)",
    r"(?i)\baired\s+(?:from|on|in)",
    r"(?i)\bfeatures?\s+\w+",
    r"(?i)\bcharacters?\s+include",
    r"(?i)\bseries\s+(?:follows|focuses|centers)",
    r"(?i)\bepisodes?\s+\w+",
];

fn re(pattern: &str) -> Result<Regex, AppError> {
    Regex::new(pattern).map_err(|e| AppError::Scrape(format!("pattern {pattern:?}: {e}")))
}

/// Compiled pattern set shared by every scrape.
pub(crate) struct Heuristics {
    script_block: Regex,
    style_block: Regex,
    html_comment: Regex,
    html_tag: Regex,
    entity: Regex,
    whitespace: Regex,
    sentence_split: Regex,
    title_lead: Regex,
    quoted_title: Regex,
    quoted_span: Regex,
    skip: Vec<Regex>,
    factual: Vec<Regex>,
    proper_noun: Regex,
    media_term: Regex,
    tech_term: Regex,
    citation_language: Regex,
    dated_figure: Regex,
    media_vocab: Regex,
    hedging: Regex,
}

impl Heuristics {
    pub(crate) fn new() -> Result<Self, AppError> {
        Ok(Self {
            script_block: re(r"(?is)<script[^>]*>.*?</script>")?,
            style_block: re(r"(?is)<style[^>]*>.*?</style>")?,
            html_comment: re(r"(?s)<!--.*?-->")?,
            html_tag: re(r"<[^>]+>")?,
            entity: re(r"&[a-zA-Z]{2,8};|&#\d{1,7};")?,
            whitespace: re(r"\s+")?,
            sentence_split: re(r"[.!?]+")?,
            title_lead: re(r"(?i)^([^.!?]+?)(?:\s+is|\s+was|\s+are)")?,
            quoted_title: re(r#""([^"]+)""#)?,
            quoted_span: re(r#""([^"]*)""#)?,
            skip: SKIP_PATTERNS
                .iter()
                .map(|p| re(p))
                .collect::<Result<Vec<_>, _>>()?,
            factual: FACTUAL_PATTERNS
                .iter()
                .map(|p| re(p))
                .collect::<Result<Vec<_>, _>>()?,
            proper_noun: re(r"\b[A-Z][a-zA-Z\-!]*(?:\s+[A-Z][a-zA-Z\-!]*)*\b")?,
            media_term: re(r"(?i)\b(?:anime|manga|series|show|character|episode|season)\b")?,
            tech_term: re(
                r"(?i)\b(?:artificial intelligence|machine learning|neural network|algorithm|programming|technology|computer|software|data|system)\b",
            )?,
            citation_language: re(r"(?i)\b(?:research|study|according to|published|peer-reviewed)\b")?,
            // Case-sensitive on purpose: matches figures, not prose about them.
            dated_figure: re(r"\b\d{4}\b|\b\d+\.?\d*\s*(?:percent|%|million|billion)\b")?,
            media_vocab: re(r"(?i)\b(?:anime|manga|series|episode|character|aired|produced|studio)\b")?,
            hedging: re(r"(?i)\b(?:might|maybe|possibly|perhaps|could be)\b")?,
        })
    }

    /// Reduce an HTML page to plain text: scripts, styles, comments and
    /// tags removed, common entities decoded, the rest of the entities
    /// dropped, whitespace collapsed.
    pub(crate) fn html_to_text(&self, html: &str) -> String {
        let text = self.script_block.replace_all(html, " ");
        let text = self.style_block.replace_all(&text, " ");
        let text = self.html_comment.replace_all(&text, " ");
        let text = self.html_tag.replace_all(&text, " ");
        let text = text
            .replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&apos;", "'")
            .replace("&amp;", "&");
        let text = self.entity.replace_all(&text, " ");
        self.whitespace.replace_all(&text, " ").trim().to_string()
    }

    /// Best guess at a page's main topic: the URL slug for encyclopedia
    /// pages, otherwise a leading "X is/was/are" clause or a quoted title
    /// in the opening text.
    pub(crate) fn detect_main_topic(&self, text: &str, source_url: Option<&str>) -> Option<String> {
        if let Some(url) = source_url {
            if url.contains("wikipedia.org/wiki/") {
                if let Some(slug) = url.split("/wiki/").last() {
                    let topic = slug.replace('_', " ").replace("%21", "!");
                    if !topic.is_empty() {
                        return Some(topic.to_lowercase());
                    }
                }
            }
        }

        let head: String = text.chars().take(500).collect();
        for pattern in [&self.title_lead, &self.quoted_title] {
            if let Some(caps) = pattern.captures(&head) {
                let title = caps[1].trim().to_lowercase();
                return (!title.is_empty()).then_some(title);
            }
        }
        None
    }

    /// Keep a sentence when it names the main topic or carries a factual
    /// verb shape, and drop navigation boilerplate outright.
    pub(crate) fn is_relevant_sentence(&self, sentence: &str, main_topic: Option<&str>) -> bool {
        if sentence.len() < MIN_SENTENCE_LEN {
            return false;
        }
        if self.skip.iter().any(|p| p.is_match(sentence)) {
            return false;
        }
        if let Some(topic) = main_topic {
            if sentence_mentions_topic(sentence, topic) {
                return true;
            }
        }
        self.factual.iter().any(|p| p.is_match(sentence))
    }

    /// Topic candidates for one sentence: capitalized runs, quoted spans,
    /// media vocabulary, tech vocabulary. Lowercased, first-seen order,
    /// capped at five.
    pub(crate) fn extract_topics_from_sentence(&self, sentence: &str) -> Vec<String> {
        let mut candidates: Vec<String> = Vec::new();
        for m in self.proper_noun.find_iter(sentence) {
            candidates.push(m.as_str().to_string());
        }
        for caps in self.quoted_span.captures_iter(sentence) {
            candidates.push(caps[1].to_string());
        }
        for m in self.media_term.find_iter(sentence) {
            candidates.push(m.as_str().to_string());
        }
        for m in self.tech_term.find_iter(sentence) {
            candidates.push(m.as_str().to_string());
        }

        let mut seen = HashSet::new();
        let mut topics = Vec::new();
        for candidate in candidates {
            let topic = candidate.trim().to_lowercase();
            if topic.len() > 1
                && !matches!(
                    topic.as_str(),
                    "the" | "and" | "but" | "for" | "with" | "this" | "that"
                )
                && seen.insert(topic.clone())
            {
                topics.push(topic);
            }
        }
        topics.truncate(MAX_TOPICS_PER_SENTENCE);
        topics
    }

    /// Score a sentence: 0.5 base, raised by topic mention, citation
    /// language, concrete figures and media vocabulary, lowered by
    /// hedging. Clamped to [0.1, 1.0].
    pub(crate) fn confidence_score(&self, sentence: &str, main_topic: Option<&str>) -> f64 {
        let mut score: f64 = 0.5;
        if let Some(topic) = main_topic {
            if sentence_mentions_topic(sentence, topic) {
                score += 0.3;
            }
        }
        if self.citation_language.is_match(sentence) {
            score += 0.2;
        }
        if self.dated_figure.is_match(sentence) {
            score += 0.1;
        }
        if self.media_vocab.is_match(sentence) {
            score += 0.2;
        }
        if self.hedging.is_match(sentence) {
            score -= 0.2;
        }
        score.clamp(0.1, 1.0)
    }

    /// Turn reduced page text into knowledge items: relevant sentences
    /// paired with up to two topic candidates each, the main topic
    /// prepended when the sentence's own candidates miss it.
    pub(crate) fn extract_knowledge_from_text(
        &self,
        text: &str,
        source_url: Option<&str>,
    ) -> Vec<KnowledgeItem> {
        if text.trim().len() < MIN_TEXT_LEN {
            return Vec::new();
        }

        let main_topic = self.detect_main_topic(text, source_url);
        let source = source_url.unwrap_or("web_scraping");

        let mut items = Vec::new();
        let sentences = self
            .sentence_split
            .split(text)
            .map(str::trim)
            .filter(|s| s.len() > MIN_SENTENCE_LEN)
            .take(MAX_SENTENCES);
        for sentence in sentences {
            if !self.is_relevant_sentence(sentence, main_topic.as_deref()) {
                continue;
            }
            let mut topics = self.extract_topics_from_sentence(sentence);
            if let Some(topic) = &main_topic {
                if !topics.iter().any(|t| t == topic) {
                    topics.insert(0, topic.clone());
                }
            }
            let confidence = self.confidence_score(sentence, main_topic.as_deref());
            for topic in topics.into_iter().take(MAX_ITEMS_PER_SENTENCE) {
                items.push(KnowledgeItem {
                    topic,
                    content: sentence.to_string(),
                    source: source.to_string(),
                    confidence,
                });
            }
        }
        items
    }
}

/// Case-insensitive containment with `-` and `!` ignored on both sides,
/// so "K-On!" still matches prose that spells it "K-On" or "KOn".
fn sentence_mentions_topic(sentence: &str, topic: &str) -> bool {
    let topic = topic.replace(['-', '!'], "").to_lowercase();
    let sentence = sentence.replace(['-', '!'], "").to_lowercase();
    sentence.contains(&topic)
}
