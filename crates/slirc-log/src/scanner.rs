//! Per-file log scanner.
//!
//! A [`Scanner`] knows which file it reads, which network and channel the
//! file belongs to, and which client wrote it. Chat lines in a log file do
//! not name their channel, so the scanner supplies its own.

use crate::error::Result;
use crate::event::{EventKind, LogEvent};
use crate::format::LogFormat;
use crate::weechat;

/// Turns raw lines of one log file into [`LogEvent`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanner {
    filename: String,
    network: String,
    channel: String,
    format: LogFormat,
}

impl Scanner {
    /// Create a scanner for a known format.
    pub fn new(
        filename: impl Into<String>,
        network: impl Into<String>,
        channel: impl Into<String>,
        format: LogFormat,
    ) -> Self {
        Self {
            filename: filename.into(),
            network: network.into(),
            channel: channel.into(),
            format,
        }
    }

    /// Create a scanner from a format name.
    ///
    /// Returns `None` when the format is unknown, leaving the caller to
    /// decide whether that is fatal.
    ///
    /// # Example
    ///
    /// ```
    /// use slirc_log::Scanner;
    ///
    /// assert!(Scanner::new_default("file", "foo", "bar", "baz").is_none());
    /// assert!(Scanner::new_default("file", "foo", "bar", "weechat").is_some());
    /// ```
    pub fn new_default(filename: &str, network: &str, channel: &str, format: &str) -> Option<Self> {
        LogFormat::from_name(format).map(|format| Self::new(filename, network, channel, format))
    }

    /// Name of the file being scanned.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Network every event is attributed to.
    pub fn network(&self) -> &str {
        &self.network
    }

    /// Channel attributed to chat lines.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Log format of the file.
    pub fn format(&self) -> LogFormat {
        self.format
    }

    /// Parse one line.
    ///
    /// `Ok(None)` means the line is well formed but carries no event
    /// (actions, topic info, mode changes, blank lines).
    pub fn parse_line(&self, line: &str) -> Result<Option<LogEvent>> {
        let parsed = match self.format {
            LogFormat::Weechat => weechat::parse_line(line)?,
        };

        Ok(parsed.map(|parsed| LogEvent {
            kind: parsed.kind,
            network: self.network.clone(),
            channel: match parsed.kind {
                EventKind::Msg => Some(self.channel.clone()),
                _ => parsed.channel.map(str::to_string),
            },
            nick: parsed.nick.to_string(),
            timestamp: parsed.timestamp,
            text: parsed.text.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_default() {
        assert!(Scanner::new_default("file", "foo", "bar", "baz").is_none());

        let scanner = Scanner::new_default("file", "foo", "bar", "weechat")
            .expect("weechat scanner");
        assert_eq!(scanner.filename(), "file");
        assert_eq!(scanner.network(), "foo");
        assert_eq!(scanner.channel(), "bar");
        assert_eq!(scanner.format(), LogFormat::Weechat);
    }

    #[test]
    fn test_chat_line_uses_scanner_channel() {
        let scanner = Scanner::new("file", "network", "#deviate", LogFormat::Weechat);
        let event = scanner
            .parse_line("2013-08-07 16:50:02\t@Aaron\tdylan: Auth with my bot for +v")
            .unwrap()
            .unwrap();

        assert_eq!(event.kind, EventKind::Msg);
        assert_eq!(event.network, "network");
        assert_eq!(event.channel.as_deref(), Some("#deviate"));
        assert_eq!(event.nick, "Aaron");
    }

    #[test]
    fn test_quit_has_no_channel() {
        let scanner = Scanner::new("file", "network", "#deviate", LogFormat::Weechat);
        let event = scanner
            .parse_line("2013-08-07 16:52:04\t<--\tknivey (k@h) has quit (Ping timeout: 181 seconds)")
            .unwrap()
            .unwrap();

        assert_eq!(event.kind, EventKind::Quit);
        assert_eq!(event.channel, None);
    }

    #[test]
    fn test_join_uses_line_channel() {
        let scanner = Scanner::new("file", "network", "#deviate", LogFormat::Weechat);
        let event = scanner
            .parse_line("2013-08-07 16:49:40\t-->\tdylan (dylan@zqz.ca) has joined #other")
            .unwrap()
            .unwrap();

        assert_eq!(event.channel.as_deref(), Some("#other"));
    }
}
