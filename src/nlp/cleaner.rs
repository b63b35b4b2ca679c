//! Cleanup of scraped fact text before it is spliced into a reply.
//!
//! Scraped sentences can carry wiki markup remnants: table rows, `[[link]]`
//! brackets, `{{template}}` braces, `<ref>` tags, `[3]` citation numbers.
//! The cleaner strips those in fixed passes and keeps only fragments that
//! still read like prose. When nothing qualifies it returns an empty string
//! and the caller falls back to a generic reply instead of showing garbage.

use regex::Regex;

use crate::error::AppError;

/// Shortest fragment worth keeping, in characters.
const MIN_FRAGMENT_CHARS: usize = 15;
/// A fragment must have more words than this.
const MIN_FRAGMENT_WORDS: usize = 3;

pub struct ContentCleaner {
    template_braces: Regex,
    wiki_link: Regex,
    ref_tag: Regex,
    html_tag: Regex,
    citation_number: Regex,
    pipe_row: Regex,
    whitespace: Regex,
}

impl ContentCleaner {
    pub fn new() -> Result<Self, AppError> {
        let compile = |src: &str| {
            Regex::new(src).map_err(|e| AppError::Engine(format!("cleaner pattern {src:?}: {e}")))
        };
        Ok(Self {
            template_braces: compile(r"\{\{[^{}]*\}\}")?,
            wiki_link: compile(r"\[\[(?:[^\]|]*\|)?([^\]]*)\]\]")?,
            ref_tag: compile(r"(?is)<ref[^>]*>.*?</ref>|<ref[^>]*/>")?,
            html_tag: compile(r"<[^>]+>")?,
            citation_number: compile(r"\[\d+\]")?,
            pipe_row: compile(r"(?m)^[^\n]*\|[^\n]*$")?,
            whitespace: compile(r"\s+")?,
        })
    }

    /// Strip markup from `text` and rebuild up to two prose fragments,
    /// staying within `max_len` characters. Empty result means nothing
    /// salvageable.
    pub fn clean(&self, text: &str, max_len: usize) -> String {
        let mut s = self.template_braces.replace_all(text, "").into_owned();
        s = self.wiki_link.replace_all(&s, "$1").into_owned();
        s = self.ref_tag.replace_all(&s, "").into_owned();
        s = self.html_tag.replace_all(&s, "").into_owned();
        s = self.citation_number.replace_all(&s, "").into_owned();
        s = self.pipe_row.replace_all(&s, "").into_owned();
        let s = self.whitespace.replace_all(&s, " ");

        let mut kept: Vec<&str> = Vec::new();
        let mut total = 0usize;
        for fragment in s.split('.') {
            let fragment = fragment.trim();
            if kept.len() == 2 {
                break;
            }
            if !Self::fragment_qualifies(fragment) {
                continue;
            }
            // ". " joiner counts toward the budget.
            let joined = total + fragment.len() + if kept.is_empty() { 0 } else { 2 };
            if joined > max_len {
                break;
            }
            kept.push(fragment);
            total = joined;
        }

        if kept.is_empty() {
            String::new()
        } else {
            let mut out = kept.join(". ");
            out.push('.');
            out
        }
    }

    fn fragment_qualifies(fragment: &str) -> bool {
        if fragment.len() <= MIN_FRAGMENT_CHARS {
            return false;
        }
        if fragment.split_whitespace().count() <= MIN_FRAGMENT_WORDS {
            return false;
        }
        if !fragment.chars().any(|c| c.is_alphabetic()) {
            return false;
        }
        !(fragment.starts_with('[') || fragment.starts_with('{') || fragment.starts_with('|'))
    }
}
