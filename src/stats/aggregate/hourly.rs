//! Hour-of-day activity histogram.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::stats::Message;

/// Chat lines per hour of day.
///
/// The hour is read from the message timestamp as logged; no timezone
/// conversion happens here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyChart {
    hours: [u64; 24],
}

impl HourlyChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_message(&mut self, message: &Message) {
        if message.kind().is_chat() {
            self.hours[message.timestamp().hour() as usize] += 1;
        }
    }

    /// The full 24-bucket distribution, index 0 being midnight.
    pub fn hours(&self) -> &[u64; 24] {
        &self.hours
    }

    /// Lines counted for `hour`; 0 for hours outside `0..24`.
    pub fn count(&self, hour: u32) -> u64 {
        self.hours.get(hour as usize).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.hours.iter().sum()
    }

    /// Busiest hour; the earliest wins a tie. `None` when empty.
    pub fn peak_hour(&self) -> Option<u32> {
        let (hour, count) = self
            .hours
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|(_, count)| **count)?;
        (*count > 0).then_some(hour as u32)
    }
}
