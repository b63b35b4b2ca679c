//! Web knowledge extractor — fetch pages, reduce them to text, mine facts.
//!
//! The scraper is strictly batch: nothing in the message path calls it.
//! `scrape_multiple_sources` walks a URL list sequentially with a
//! politeness delay and never aborts the batch over one bad page.
//!
//! # Module layout
//!
//! - **extract** — Pure text heuristics (HTML reduction, sentence
//!   relevance, topic candidates, confidence scoring).
//! - This file — The [`Fetcher`] seam, the blocking HTTP fetcher, batch
//!   orchestration and the curated source tables.

mod extract;

use std::collections::BTreeMap;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::error::AppError;
use crate::knowledge::sha256_hex;
use crate::knowledge::types::KnowledgeItem;

use extract::Heuristics;

/// Sources scraped when training is requested with no topics.
pub const DEFAULT_SOURCES: &[&str] = &[
    "https://en.wikipedia.org/wiki/Artificial_intelligence",
    "https://en.wikipedia.org/wiki/Machine_learning",
    "https://en.wikipedia.org/wiki/Natural_language_processing",
    "https://www.britannica.com/technology/artificial-intelligence",
    "https://plato.stanford.edu/entries/artificial-intelligence/",
];

/// Curated category → source-URL table behind `/suggest`.
const TOPIC_SOURCES: &[(&str, &[&str])] = &[
    (
        "technology",
        &[
            "https://en.wikipedia.org/wiki/Technology",
            "https://en.wikipedia.org/wiki/Computer_science",
            "https://en.wikipedia.org/wiki/Software_engineering",
        ],
    ),
    (
        "science",
        &[
            "https://en.wikipedia.org/wiki/Science",
            "https://en.wikipedia.org/wiki/Physics",
            "https://en.wikipedia.org/wiki/Biology",
        ],
    ),
    (
        "history",
        &[
            "https://en.wikipedia.org/wiki/History",
            "https://en.wikipedia.org/wiki/World_history",
        ],
    ),
    (
        "art",
        &[
            "https://en.wikipedia.org/wiki/Art",
            "https://en.wikipedia.org/wiki/Fine_art",
        ],
    ),
    (
        "literature",
        &[
            "https://en.wikipedia.org/wiki/Literature",
            "https://en.wikipedia.org/wiki/Fiction",
        ],
    ),
];

/// Source URLs for a set of interests. Unknown interests fall back to the
/// default sources; no interests at all samples two per category.
pub fn topic_suggestions(interests: &[String]) -> Vec<String> {
    if interests.is_empty() {
        return TOPIC_SOURCES
            .iter()
            .flat_map(|(_, urls)| urls.iter().take(2))
            .map(|u| u.to_string())
            .collect();
    }

    let mut urls = Vec::new();
    for interest in interests {
        let interest = interest.to_lowercase();
        if let Some((_, sources)) = TOPIC_SOURCES.iter().find(|(cat, _)| *cat == interest) {
            urls.extend(sources.iter().map(|u| u.to_string()));
        }
    }
    if urls.is_empty() {
        DEFAULT_SOURCES.iter().map(|u| u.to_string()).collect()
    } else {
        urls
    }
}

// ── Fetching ─────────────────────────────────────────────────────────────────

/// How pages are fetched. The seam exists so tests can feed canned HTML.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, AppError>;
}

/// Blocking HTTP fetcher with a fixed User-Agent and per-request timeout.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Scrape(format!("http client: {e}")))?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, AppError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| AppError::Scrape(format!("request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::Scrape(format!("bad status: {e}")))?;
        response
            .text()
            .map_err(|e| AppError::Scrape(format!("body read failed: {e}")))
    }
}

// ── Results ──────────────────────────────────────────────────────────────────

/// Outcome of one successful page scrape.
#[derive(Debug)]
pub struct ScrapedPage {
    pub url: String,
    /// SHA-256 of the reduced text, for change detection between scrapes.
    pub content_hash: String,
    pub items: Vec<KnowledgeItem>,
    pub word_count: usize,
}

/// Aggregated outcome of a batch scrape.
#[derive(Debug, Default)]
pub struct ScrapeReport {
    pub total_sources: usize,
    pub successful_scrapes: usize,
    pub total_knowledge_items: usize,
    pub knowledge_by_topic: BTreeMap<String, Vec<KnowledgeItem>>,
    /// `(url, content_hash)` per successful page, for source tracking.
    pub scraped: Vec<(String, String)>,
    pub errors: Vec<String>,
}

// ── Scraper ──────────────────────────────────────────────────────────────────

pub struct WebScraper {
    fetcher: Box<dyn Fetcher>,
    heuristics: Heuristics,
    request_delay: Duration,
}

impl WebScraper {
    /// Scraper with the real HTTP fetcher, configured from `[scraper]`.
    pub fn new(config: &ScraperConfig) -> Result<Self, AppError> {
        let fetcher = HttpFetcher::new(
            &config.user_agent,
            Duration::from_secs(config.timeout_seconds),
        )?;
        Self::with_fetcher(
            Box::new(fetcher),
            Duration::from_millis(config.request_delay_ms),
        )
    }

    /// Scraper over an arbitrary fetcher. Tests feed canned pages here.
    pub fn with_fetcher(
        fetcher: Box<dyn Fetcher>,
        request_delay: Duration,
    ) -> Result<Self, AppError> {
        Ok(Self {
            fetcher,
            heuristics: Heuristics::new()?,
            request_delay,
        })
    }

    /// Fetch one page and mine it for knowledge.
    pub fn scrape_url(&self, url: &str) -> Result<ScrapedPage, AppError> {
        let html = self.fetcher.fetch(url)?;
        let content = self.heuristics.html_to_text(&html);
        if content.is_empty() {
            return Err(AppError::Scrape("no content extracted".into()));
        }

        let content_hash = sha256_hex(&content);
        let items = self
            .heuristics
            .extract_knowledge_from_text(&content, Some(url));
        debug!(%url, items = items.len(), "scraped page");
        Ok(ScrapedPage {
            url: url.to_string(),
            content_hash,
            items,
            word_count: content.split_whitespace().count(),
        })
    }

    /// Scrape up to `max_sources` URLs sequentially, sleeping the
    /// politeness delay after every request. An empty `urls` slice means
    /// the default sources.
    pub fn scrape_multiple_sources(&self, urls: &[String], max_sources: usize) -> ScrapeReport {
        let selected: Vec<String> = if urls.is_empty() {
            DEFAULT_SOURCES.iter().map(|u| u.to_string()).collect()
        } else {
            urls.to_vec()
        };
        let selected = &selected[..selected.len().min(max_sources)];

        let mut report = ScrapeReport {
            total_sources: selected.len(),
            ..ScrapeReport::default()
        };
        for url in selected {
            match self.scrape_url(url) {
                Ok(page) => {
                    report.successful_scrapes += 1;
                    report.total_knowledge_items += page.items.len();
                    for item in page.items {
                        report
                            .knowledge_by_topic
                            .entry(item.topic.clone())
                            .or_default()
                            .push(item);
                    }
                    report.scraped.push((page.url, page.content_hash));
                }
                Err(e) => {
                    warn!(%url, error = %e, "scrape failed");
                    report.errors.push(format!("{url}: {e}"));
                }
            }
            thread::sleep(self.request_delay);
        }
        info!(
            sources = report.total_sources,
            ok = report.successful_scrapes,
            items = report.total_knowledge_items,
            "batch scrape finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeFetcher {
        pages: BTreeMap<String, String>,
    }

    impl Fetcher for FakeFetcher {
        fn fetch(&self, url: &str) -> Result<String, AppError> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| AppError::Scrape("connection refused".into()))
        }
    }

    const WIKI_PAGE: &str = "<html><body>\
        <p>Bocchi the Rock is a manga series written by Aki Hamaji.</p>\
        <p>The anime adaptation aired from October to December 2022.</p>\
        </body></html>";

    fn scraper_with(pages: &[(&str, &str)]) -> WebScraper {
        let pages = pages
            .iter()
            .map(|(u, p)| (u.to_string(), p.to_string()))
            .collect();
        WebScraper::with_fetcher(Box::new(FakeFetcher { pages }), Duration::ZERO).unwrap()
    }

    #[test]
    fn scrape_url_extracts_items_and_hash() {
        let url = "https://en.wikipedia.org/wiki/Bocchi_the_Rock%21";
        let scraper = scraper_with(&[(url, WIKI_PAGE)]);
        let page = scraper.scrape_url(url).unwrap();
        assert_eq!(page.url, url);
        assert_eq!(page.content_hash.len(), 64);
        assert!(page.word_count > 10);
        assert!(!page.items.is_empty());
        assert!(page.items.iter().any(|i| i.topic == "bocchi the rock!"));
    }

    #[test]
    fn empty_page_is_an_error() {
        let url = "https://example.com/empty";
        let scraper = scraper_with(&[(url, "<html><body></body></html>")]);
        let err = scraper.scrape_url(url).unwrap_err();
        assert!(err.to_string().contains("no content extracted"));
    }

    #[test]
    fn one_bad_source_does_not_abort_the_batch() {
        let good_a = "https://en.wikipedia.org/wiki/Bocchi_the_Rock%21";
        let good_b = "https://en.wikipedia.org/wiki/K-On%21";
        let scraper = scraper_with(&[(good_a, WIKI_PAGE), (good_b, WIKI_PAGE)]);
        let urls = vec![
            good_a.to_string(),
            "https://down.example.com/".to_string(),
            good_b.to_string(),
        ];
        let report = scraper.scrape_multiple_sources(&urls, 10);
        assert_eq!(report.total_sources, 3);
        assert_eq!(report.successful_scrapes, 2);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("https://down.example.com/"));
        assert!(report.total_knowledge_items > 0);
        assert_eq!(report.scraped.len(), 2);
    }

    #[test]
    fn batch_respects_the_source_cap() {
        let url = "https://en.wikipedia.org/wiki/Bocchi_the_Rock%21";
        let scraper = scraper_with(&[(url, WIKI_PAGE)]);
        let urls = vec![
            url.to_string(),
            "https://b.example.com".to_string(),
            "https://c.example.com".to_string(),
        ];
        let report = scraper.scrape_multiple_sources(&urls, 1);
        assert_eq!(report.total_sources, 1);
        assert_eq!(report.successful_scrapes, 1);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn empty_url_list_means_default_sources() {
        // No pages registered, so every default source errors; none panic.
        let scraper = scraper_with(&[]);
        let report = scraper.scrape_multiple_sources(&[], 10);
        assert_eq!(report.total_sources, DEFAULT_SOURCES.len());
        assert_eq!(report.successful_scrapes, 0);
        assert_eq!(report.errors.len(), DEFAULT_SOURCES.len());
    }

    #[test]
    fn items_group_by_topic() {
        let url = "https://en.wikipedia.org/wiki/Bocchi_the_Rock%21";
        let scraper = scraper_with(&[(url, WIKI_PAGE)]);
        let report = scraper.scrape_multiple_sources(&[url.to_string()], 5);
        let slug_items = report.knowledge_by_topic.get("bocchi the rock!").unwrap();
        assert!(!slug_items.is_empty());
        let counted: usize = report.knowledge_by_topic.values().map(Vec::len).sum();
        assert_eq!(counted, report.total_knowledge_items);
    }

    #[test]
    fn suggestions_cover_known_categories() {
        let urls = topic_suggestions(&["technology".to_string()]);
        assert_eq!(urls.len(), 3);
        assert!(urls[0].contains("Technology"));

        let mixed = topic_suggestions(&["Science".to_string(), "art".to_string()]);
        assert_eq!(mixed.len(), 5);
    }

    #[test]
    fn unknown_interests_fall_back_to_defaults() {
        let urls = topic_suggestions(&["underwater basket weaving".to_string()]);
        let defaults: Vec<String> = DEFAULT_SOURCES.iter().map(|u| u.to_string()).collect();
        assert_eq!(urls, defaults);
    }

    #[test]
    fn no_interests_samples_every_category() {
        let urls = topic_suggestions(&[]);
        assert_eq!(urls.len(), 10);
        assert!(urls.iter().any(|u| u.contains("Physics")));
        assert!(urls.iter().any(|u| u.contains("Fiction")));
    }
}
