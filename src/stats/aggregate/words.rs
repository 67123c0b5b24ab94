//! Word and URL frequency counters.
//!
//! Tokens are whitespace-separated and kept verbatim: `Rust`, `rust` and
//! `rust,` are three different words.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

use super::top_tokens::TopTokenArray;
use crate::stats::Message;

static URL_PATTERN: OnceLock<Regex> = OnceLock::new();

/// `scheme://anything`, `www.host.tld...` or `host.tld/path`.
fn url_pattern() -> &'static Regex {
    URL_PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)^(?:[a-z][a-z0-9+.\-]*://\S+|www\.[^\s/.]+\.\S+|[a-z0-9\-]+(?:\.[a-z0-9\-]+)*\.[a-z]{2,}/\S*)$",
        )
        .expect("URL pattern is a valid regex")
    })
}

/// Whether a token looks like a URL.
pub fn is_url(token: &str) -> bool {
    url_pattern().is_match(token)
}

/// Frequency map plus its top-K projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TokenTally {
    counts: HashMap<String, u64>,
    top: TopTokenArray,
    total: u64,
}

impl TokenTally {
    fn new(capacity: usize) -> Self {
        Self {
            counts: HashMap::new(),
            top: TopTokenArray::new(capacity),
            total: 0,
        }
    }

    fn add(&mut self, token: &str) {
        let count = match self.counts.get_mut(token) {
            Some(count) => {
                *count += 1;
                *count
            }
            None => {
                self.counts.insert(token.to_string(), 1);
                1
            }
        };
        self.total += 1;
        self.top.update(token, count);
    }

    fn count(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }
}

/// Counts every word of every chat line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCounter {
    tally: TokenTally,
}

impl WordCounter {
    pub fn new(capacity: usize) -> Self {
        Self {
            tally: TokenTally::new(capacity),
        }
    }

    pub(crate) fn add_message(&mut self, message: &Message) {
        if !message.kind().is_chat() {
            return;
        }
        for word in message.text().split_whitespace() {
            self.tally.add(word);
        }
    }

    /// Occurrences of `word`.
    pub fn count(&self, word: &str) -> u64 {
        self.tally.count(word)
    }

    /// Number of distinct words seen.
    pub fn distinct(&self) -> usize {
        self.tally.counts.len()
    }

    /// Number of words seen.
    pub fn total(&self) -> u64 {
        self.tally.total
    }

    /// Most frequent words.
    pub fn top(&self) -> &TopTokenArray {
        &self.tally.top
    }
}

/// Counts URL-shaped tokens of chat lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlCounter {
    tally: TokenTally,
}

impl UrlCounter {
    pub fn new(capacity: usize) -> Self {
        Self {
            tally: TokenTally::new(capacity),
        }
    }

    pub(crate) fn add_message(&mut self, message: &Message) {
        if !message.kind().is_chat() {
            return;
        }
        for url in message.text().split_whitespace().filter(|t| is_url(t)) {
            self.tally.add(url);
        }
    }

    /// Times `url` was posted.
    pub fn count(&self, url: &str) -> u64 {
        self.tally.count(url)
    }

    pub fn distinct(&self) -> usize {
        self.tally.counts.len()
    }

    pub fn total(&self) -> u64 {
        self.tally.total
    }

    /// Most posted URLs.
    pub fn top(&self) -> &TopTokenArray {
        &self.tally.top
    }
}
