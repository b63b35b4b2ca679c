//! Conversation engine: one message in, one reply out, learning on the way.
//!
//! # Module layout
//! - [`context`]: in-process conversation memory and per-message flags
//! - [`data`]: authored reply tables and template families
//! - [`generator`]: the response strategy cascade
//! - [`learner`]: per-turn knowledge updates
//! - [`coding`]: canned code-example replies

mod coding;
mod context;
mod data;
mod generator;
mod learner;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::knowledge::{open_store, KnowledgeStore};
use crate::nlp::{ContentCleaner, KeywordExtractor};
use crate::scraper::{topic_suggestions, WebScraper};

use context::{ConversationMemory, MessageContext};

/// Aggregate counters behind the `/stats` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationStats {
    pub total_interactions: u64,
    pub topics_tracked: usize,
    pub learned_patterns: usize,
    pub knowledge_items: u64,
    pub recent_messages: usize,
}

/// Outcome of one training pass over web sources.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub success: bool,
    pub sources_scraped: usize,
    pub knowledge_items_added: u64,
    pub topics_learned: usize,
    pub errors: Vec<String>,
}

/// The stateful responder. Owns the knowledge store, the scraper, the
/// regex helpers, the conversation memory, and the RNG every random pick
/// goes through.
pub struct ChatEngine {
    store: Box<dyn KnowledgeStore>,
    scraper: WebScraper,
    extractor: KeywordExtractor,
    cleaner: ContentCleaner,
    memory: ConversationMemory,
    rng: StdRng,
    max_sources: usize,
}

impl ChatEngine {
    /// Build from configuration: open the store (degrading to file-only if
    /// the database cannot be opened) and the HTTP scraper.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let store = open_store(config);
        let scraper = WebScraper::new(&config.scraper)?;
        Self::with_parts(store, scraper, config.scraper.max_sources, StdRng::from_entropy())
    }

    /// Assemble from explicit parts. Tests inject a canned fetcher and a
    /// seeded RNG here.
    pub fn with_parts(
        store: Box<dyn KnowledgeStore>,
        scraper: WebScraper,
        max_sources: usize,
        rng: StdRng,
    ) -> Result<Self, AppError> {
        Ok(Self {
            store,
            scraper,
            extractor: KeywordExtractor::new()?,
            cleaner: ContentCleaner::new()?,
            memory: ConversationMemory::default(),
            rng,
            max_sources,
        })
    }

    /// Answer one message. Never fails: store and search errors degrade to
    /// weaker strategies and the caller always gets a reply.
    pub fn process_message(&mut self, message: &str, user_id: Option<&str>) -> String {
        let trimmed = message.trim();
        let lowered = trimmed.to_lowercase();

        self.memory.push_user(trimmed, user_id);
        self.store.record_interaction();

        let keywords = self.extractor.extract(trimmed);
        self.memory.extend_keywords(&keywords);

        let context = MessageContext::build(&lowered, &self.memory);
        let response = self.generate(&lowered, &keywords, &context);

        learner::learn_from_interaction(
            self.store.as_mut(),
            trimmed,
            &lowered,
            &response,
            &keywords,
            context.sentiment,
        );

        let session = user_id.unwrap_or("anonymous");
        if let Err(error) =
            self.store
                .record_turn(session, trimmed, &response, &keywords, context.sentiment.as_str())
        {
            warn!(%error, "recording turn failed");
        }

        self.memory.push_ai(&response);

        if let Err(error) = self.store.maybe_save() {
            warn!(%error, "periodic save failed");
        }

        response
    }

    /// The strategy cascade, strongest first.
    fn generate(&mut self, lowered: &str, keywords: &[String], context: &MessageContext) -> String {
        let recent = self.memory.recent_ai_responses();

        // Direct-intent overrides ride on the durable knowledge path.
        if self.store.is_durable() {
            if generator::wants_joke(lowered) {
                return generator::tell_joke(&mut self.rng);
            }
            if generator::wants_coding_help(lowered) {
                return coding::coding_help(lowered);
            }
        }

        let doc = self.store.document();

        if let Some(reply) = generator::pattern_response(&mut self.rng, doc, lowered) {
            return reply;
        }

        if let Some(reply) = generator::learned_response(&mut self.rng, doc, lowered) {
            return reply;
        }

        if !keywords.is_empty() {
            if let Some(reply) =
                generator::topic_table_response(&mut self.rng, keywords, context, &recent)
            {
                return reply;
            }

            match self.store.search(keywords) {
                Ok(hits) => {
                    if let Some(reply) = generator::knowledge_based_response(
                        &mut self.rng,
                        &self.cleaner,
                        &hits,
                        context,
                        &recent,
                    ) {
                        return reply;
                    }
                }
                Err(error) => warn!(%error, "knowledge search failed"),
            }

            return generator::intelligent_keyword_response(
                &mut self.rng,
                doc,
                keywords,
                context,
                &recent,
            );
        }

        generator::sentiment_based_response(&mut self.rng, doc, context)
    }

    /// Scrape sources (Wikipedia pages for the given topics, or the default
    /// set) and fold the findings into the knowledge store.
    pub fn train_from_web(
        &mut self,
        topics: Option<&[String]>,
        max_sources: Option<usize>,
    ) -> TrainingReport {
        let cap = max_sources.unwrap_or(self.max_sources);
        let urls: Vec<String> = match topics {
            Some(topics) if !topics.is_empty() => {
                let mut urls: Vec<String> = topics.iter().map(|t| wiki_url_for(t)).collect();
                urls.extend(topic_suggestions(topics).into_iter().take(2));
                urls
            }
            _ => Vec::new(),
        };

        let report = self.scraper.scrape_multiple_sources(&urls, cap);

        let mut errors = report.errors;
        let mut success = true;
        let mut added = 0;
        match self.store.add_knowledge(&report.knowledge_by_topic) {
            Ok(count) => added = count,
            Err(error) => {
                success = false;
                errors.push(format!("storing knowledge failed: {error}"));
            }
        }
        for (url, content_hash) in &report.scraped {
            if let Err(error) = self.store.record_source(url, content_hash) {
                warn!(%url, %error, "source bookkeeping failed");
            }
        }
        if let Err(error) = self.store.save() {
            warn!(%error, "post-training save failed");
        }

        info!(
            sources = report.successful_scrapes,
            items = added,
            topics = report.knowledge_by_topic.len(),
            "training pass complete"
        );

        TrainingReport {
            success,
            sources_scraped: report.successful_scrapes,
            knowledge_items_added: added,
            topics_learned: report.knowledge_by_topic.len(),
            errors,
        }
    }

    pub fn conversation_stats(&self) -> ConversationStats {
        let store_stats = match self.store.stats() {
            Ok(stats) => Some(stats),
            Err(error) => {
                warn!(%error, "stats lookup failed");
                None
            }
        };
        let doc = self.store.document();
        ConversationStats {
            total_interactions: doc.user_interactions,
            topics_tracked: doc.topic_knowledge.len(),
            learned_patterns: doc.learned_responses.len(),
            knowledge_items: store_stats.map_or(0, |s| s.knowledge_items),
            recent_messages: self.memory.message_count(),
        }
    }

    /// Suggested sources for the given interests (or a sampler of every
    /// category when none are given).
    pub fn suggest_sources(&self, interests: &[String]) -> Vec<String> {
        topic_suggestions(interests)
    }

    /// Forget the running conversation; learned knowledge stays.
    pub fn clear_memory(&mut self) {
        self.memory.clear();
    }

    /// Wipe everything learned and start from the authored tables.
    pub fn reset_knowledge(&mut self) -> Result<(), AppError> {
        self.memory.clear();
        self.store.reset()
    }

    /// Flush the knowledge document to disk now.
    pub fn save(&mut self) -> Result<(), AppError> {
        self.store.save()
    }

    pub fn store_type(&self) -> &str {
        self.store.store_type()
    }
}

fn wiki_url_for(topic: &str) -> String {
    format!(
        "https://en.wikipedia.org/wiki/{}",
        topic.replace(' ', "_").replace('!', "%21")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::FileKnowledgeStore;
    use crate::nlp::CANNED_RESPONSES;
    use crate::scraper::Fetcher;
    use std::collections::BTreeMap;
    use std::time::Duration;
    use tempfile::TempDir;

    struct NoNetwork;

    impl Fetcher for NoNetwork {
        fn fetch(&self, _url: &str) -> Result<String, AppError> {
            Err(AppError::Scrape("connection refused".to_string()))
        }
    }

    struct CannedPages(BTreeMap<String, String>);

    impl Fetcher for CannedPages {
        fn fetch(&self, url: &str) -> Result<String, AppError> {
            self.0
                .get(url)
                .cloned()
                .ok_or_else(|| AppError::Scrape("connection refused".to_string()))
        }
    }

    fn engine_with(fetcher: Box<dyn Fetcher>, seed: u64) -> (TempDir, ChatEngine) {
        let dir = TempDir::new().unwrap();
        let store = FileKnowledgeStore::new(dir.path().join("knowledge.json"), 10);
        let scraper = WebScraper::with_fetcher(fetcher, Duration::ZERO).unwrap();
        let engine = ChatEngine::with_parts(
            Box::new(store),
            scraper,
            3,
            StdRng::seed_from_u64(seed),
        )
        .unwrap();
        (dir, engine)
    }

    fn offline_engine(seed: u64) -> (TempDir, ChatEngine) {
        engine_with(Box::new(NoNetwork), seed)
    }

    fn family(name: &str) -> &'static [&'static str] {
        CANNED_RESPONSES
            .iter()
            .find(|(category, _)| *category == name)
            .map(|(_, replies)| *replies)
            .unwrap()
    }

    #[test]
    fn hello_draws_a_canned_greeting() {
        let (_dir, mut engine) = offline_engine(3);
        let reply = engine.process_message("Hello!", None);
        assert!(family("greeting").contains(&reply.as_str()));
        assert_eq!(engine.conversation_stats().total_interactions, 1);
    }

    #[test]
    fn same_topic_keeps_the_replies_varied() {
        let (_dir, mut engine) = offline_engine(11);
        let replies: Vec<String> = [
            "i drink pepsi every single day",
            "pepsi is my usual choice of drink",
            "pepsi again with dinner tonight",
            "pepsi goes well with pizza on friday",
        ]
        .iter()
        .map(|message| engine.process_message(message, None))
        .collect();

        let distinct: std::collections::BTreeSet<&String> = replies.iter().collect();
        assert!(distinct.len() >= 2, "replies never varied: {replies:?}");
    }

    #[test]
    fn joke_requests_stay_conversational_without_a_durable_store() {
        let (_dir, mut engine) = offline_engine(5);
        let reply = engine.process_message("tell me a joke", None);
        assert!(!data::JOKES.iter().any(|joke| reply.starts_with(joke)));
        assert!(reply.contains("joke"));
    }

    #[cfg(feature = "store-sqlite")]
    #[test]
    fn joke_requests_get_jokes_on_the_durable_path() {
        use crate::knowledge::SqliteKnowledgeStore;

        let dir = TempDir::new().unwrap();
        let file = FileKnowledgeStore::new(dir.path().join("knowledge.json"), 10);
        let store = SqliteKnowledgeStore::open(&dir.path().join("knowledge.db"), file).unwrap();
        let scraper = WebScraper::with_fetcher(Box::new(NoNetwork), Duration::ZERO).unwrap();
        let mut engine = ChatEngine::with_parts(
            Box::new(store),
            scraper,
            3,
            StdRng::seed_from_u64(5),
        )
        .unwrap();

        let reply = engine.process_message("tell me a joke", None);
        assert!(data::JOKES.iter().any(|joke| reply.starts_with(joke)));
    }

    #[test]
    fn blank_input_still_gets_a_reply() {
        let (_dir, mut engine) = offline_engine(9);
        let reply = engine.process_message("   ", None);
        assert!(family("default").contains(&reply.as_str()));
    }

    #[test]
    fn stats_count_turns_topics_and_messages() {
        let (_dir, mut engine) = offline_engine(2);
        engine.process_message("i practice guitar in the evening", None);
        engine.process_message("guitar strings wear out quickly", None);

        let stats = engine.conversation_stats();
        assert_eq!(stats.total_interactions, 2);
        assert_eq!(stats.recent_messages, 4);
        assert!(stats.topics_tracked >= 1);
    }

    #[test]
    fn offline_training_reports_per_source_errors() {
        let (_dir, mut engine) = offline_engine(1);
        let report = engine.train_from_web(None, None);
        assert!(report.success);
        assert_eq!(report.sources_scraped, 0);
        assert_eq!(report.knowledge_items_added, 0);
        assert_eq!(report.errors.len(), 3, "one error per attempted source");
    }

    #[test]
    fn topic_training_scrapes_the_wikipedia_slug() {
        let page = "<html><body><p>Bocchi the Rock! is a Japanese manga series written \
                    by Aki Hamazi. The series was adapted into an anime television \
                    series by CloverWorks in 2022.</p></body></html>";
        // The slug keeps the caller's casing, so the canned key is lowercase.
        let mut pages = BTreeMap::new();
        pages.insert(
            "https://en.wikipedia.org/wiki/bocchi_the_rock%21".to_string(),
            page.to_string(),
        );
        let (_dir, mut engine) = engine_with(Box::new(CannedPages(pages)), 4);

        let topics = vec!["bocchi the rock!".to_string()];
        let report = engine.train_from_web(Some(&topics), None);
        assert!(report.success);
        assert_eq!(report.sources_scraped, 1);
        assert!(report.knowledge_items_added >= 1);
        assert!(report.topics_learned >= 1);
        assert_eq!(report.errors.len(), 2, "the two suggestion urls are offline");
    }

    #[test]
    fn reset_forgets_everything() {
        let (_dir, mut engine) = offline_engine(6);
        engine.process_message("i practice guitar in the evening", None);
        engine.reset_knowledge().unwrap();

        let stats = engine.conversation_stats();
        assert_eq!(stats.total_interactions, 0);
        assert_eq!(stats.topics_tracked, 0);
        assert_eq!(stats.recent_messages, 0);
    }

    #[test]
    fn suggestions_pass_through_interest_categories() {
        let (_dir, engine) = offline_engine(8);
        let urls = engine.suggest_sources(&["science".to_string()]);
        assert_eq!(urls.len(), 3);
        assert!(urls.iter().all(|url| url.starts_with("https://")));
    }
}
