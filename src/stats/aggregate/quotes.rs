//! Bounded sample of chat lines.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::stats::{Message, MessageId};

/// A captured chat line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub message_id: MessageId,
    pub text: String,
}

/// The most recent `capacity` non-blank chat lines, oldest first.
///
/// Choosing which quotes to show is left to the report layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotes {
    capacity: usize,
    quotes: VecDeque<Quote>,
}

impl Quotes {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            quotes: VecDeque::new(),
        }
    }

    pub(crate) fn add_message(&mut self, message: &Message) {
        if self.capacity == 0 || !message.kind().is_chat() || message.text().trim().is_empty() {
            return;
        }

        self.quotes.push_back(Quote {
            message_id: message.id(),
            text: message.text().to_string(),
        });
        while self.quotes.len() > self.capacity {
            self.quotes.pop_front();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quote> {
        self.quotes.iter()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently captured quote.
    pub fn latest(&self) -> Option<&Quote> {
        self.quotes.back()
    }
}
