//! Bounded, rank-ordered token leaderboard.

use serde::{Deserialize, Serialize};

/// One leaderboard entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCount {
    pub token: String,
    pub count: u64,
}

/// The `capacity` highest-counted tokens, sorted by descending count.
///
/// Entries with equal counts keep the order in which they reached that
/// count. The array never holds more than `capacity` entries and never
/// holds the same token twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopTokenArray {
    capacity: usize,
    entries: Vec<TokenCount>,
}

impl TopTokenArray {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries, highest count first.
    pub fn entries(&self) -> &[TokenCount] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &TokenCount> {
        self.entries.iter()
    }

    /// Count recorded for `token`, if it is on the board.
    pub fn get(&self, token: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.token == token)
            .map(|entry| entry.count)
    }

    /// Lowest count on the board.
    pub fn min_count(&self) -> Option<u64> {
        self.entries.last().map(|entry| entry.count)
    }

    /// Offer the latest total for `token`.
    ///
    /// A token already on the board keeps the larger of its old and new
    /// count. A new token is added while there is room, otherwise it
    /// replaces the lowest entry only if `count` is strictly greater.
    /// Returns whether the board changed.
    pub fn update(&mut self, token: &str, count: u64) -> bool {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.token == token) {
            if count <= entry.count {
                return false;
            }
            entry.count = count;
        } else {
            if self.entries.len() >= self.capacity {
                match self.entries.last() {
                    Some(lowest) if count > lowest.count => {
                        self.entries.pop();
                    }
                    _ => return false,
                }
            }
            self.entries.push(TokenCount {
                token: token.to_string(),
                count,
            });
        }

        // Stable: ties keep their current order.
        self.entries.sort_by(|a, b| b.count.cmp(&a.count));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(top: &TopTokenArray) -> Vec<(&str, u64)> {
        top.iter().map(|e| (e.token.as_str(), e.count)).collect()
    }

    #[test]
    fn test_insert_and_sort() {
        let mut top = TopTokenArray::new(3);
        assert!(top.update("a", 1));
        assert!(top.update("b", 3));
        assert!(top.update("c", 2));
        assert_eq!(tokens(&top), vec![("b", 3), ("c", 2), ("a", 1)]);
    }

    #[test]
    fn test_existing_token_keeps_maximum() {
        let mut top = TopTokenArray::new(3);
        top.update("a", 5);
        assert!(!top.update("a", 2));
        assert_eq!(top.get("a"), Some(5));
        assert!(top.update("a", 6));
        assert_eq!(top.get("a"), Some(6));
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn test_full_board_evicts_minimum_only_when_exceeded() {
        let mut top = TopTokenArray::new(2);
        top.update("a", 2);
        top.update("b", 1);

        // Equal to the minimum: rejected.
        assert!(!top.update("c", 1));
        assert_eq!(tokens(&top), vec![("a", 2), ("b", 1)]);

        assert!(top.update("c", 3));
        assert_eq!(tokens(&top), vec![("c", 3), ("a", 2)]);
        assert_eq!(top.get("b"), None);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut top = TopTokenArray::new(4);
        top.update("first", 1);
        top.update("second", 1);
        top.update("third", 1);
        assert_eq!(
            tokens(&top),
            vec![("first", 1), ("second", 1), ("third", 1)]
        );

        top.update("third", 2);
        top.update("first", 2);
        assert_eq!(
            tokens(&top),
            vec![("third", 2), ("first", 2), ("second", 1)]
        );
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut top = TopTokenArray::new(0);
        assert!(!top.update("a", 10));
        assert!(top.is_empty());
        assert_eq!(top.min_count(), None);
    }

    #[test]
    fn test_huge_capacity_allocates_lazily() {
        let mut top = TopTokenArray::new(usize::MAX);
        assert!(top.update("a", 1));
        assert_eq!(top.capacity(), usize::MAX);
        assert_eq!(top.len(), 1);
    }
}
