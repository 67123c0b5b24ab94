//! Feeding parsed log lines into a [`Stats`] registry.
//!
//! The parser crate turns raw lines into [`LogEvent`]s; this module maps
//! them onto [`NewMessage`]s and keeps per-source counters.

use slirc_log::{EventKind, LogEvent, Scanner};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::IngestError;
use crate::stats::{MessageId, MessageKind, NewMessage, Stats};
use crate::telemetry::{IngestTimer, spans};

/// Line counters for one ingested source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Lines read.
    pub lines: u64,
    /// Lines that became stored messages.
    pub stored: u64,
    /// Well-formed lines that carry no event.
    pub skipped: u64,
    /// Lines rejected by the parser or the registry.
    pub malformed: u64,
}

impl IngestReport {
    /// Add another report's counters to this one.
    pub fn merge(&mut self, other: &IngestReport) {
        self.lines += other.lines;
        self.stored += other.stored;
        self.skipped += other.skipped;
        self.malformed += other.malformed;
    }
}

fn message_kind(kind: EventKind) -> MessageKind {
    match kind {
        EventKind::Msg => MessageKind::Msg,
        EventKind::Join => MessageKind::Join,
        EventKind::Part => MessageKind::Part,
        EventKind::Quit => MessageKind::Quit,
        EventKind::Topic => MessageKind::Topic,
    }
}

fn new_message(event: &LogEvent) -> NewMessage<'_> {
    NewMessage {
        kind: message_kind(event.kind),
        network: &event.network,
        channel: event.channel.as_deref(),
        nick: &event.nick,
        timestamp: event.timestamp,
        text: &event.text,
    }
}

/// Sequential ingestion into a borrowed registry.
pub struct Ingestor<'a> {
    stats: &'a mut Stats,
}

impl<'a> Ingestor<'a> {
    pub fn new(stats: &'a mut Stats) -> Self {
        Self { stats }
    }

    /// Parse and absorb one line.
    ///
    /// Returns the stored message's ID, or `None` if the line carries no
    /// event.
    pub fn ingest_line(
        &mut self,
        scanner: &Scanner,
        line: &str,
    ) -> Result<Option<MessageId>, IngestError> {
        let Some(event) = scanner.parse_line(line)? else {
            return Ok(None);
        };

        let message = self.stats.add_message(new_message(&event))?;
        Ok(Some(message.id()))
    }

    /// Absorb every line of `reader`.
    ///
    /// Bytes that are not UTF-8 are replaced, not rejected. Malformed lines
    /// are logged and counted; read failures abort.
    pub fn ingest_reader<R: BufRead>(
        &mut self,
        scanner: &Scanner,
        mut reader: R,
    ) -> Result<IngestReport, IngestError> {
        let mut report = IngestReport::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| IngestError::Read {
                    path: scanner.filename().to_string(),
                    source,
                })?;
            if read == 0 {
                break;
            }
            report.lines += 1;

            let line = String::from_utf8_lossy(&buf);
            if let Cow::Owned(_) = line {
                debug!(
                    file = %scanner.filename(),
                    line = report.lines,
                    "Replaced invalid UTF-8 in line"
                );
            }
            let line = line.trim_end_matches(['\r', '\n']);

            match self.ingest_line(scanner, line) {
                Ok(Some(_)) => report.stored += 1,
                Ok(None) => report.skipped += 1,
                Err(err) if err.is_line_error() => {
                    report.malformed += 1;
                    warn!(
                        file = %scanner.filename(),
                        line = report.lines,
                        code = err.error_code(),
                        error = %err,
                        "Skipping malformed line"
                    );
                }
                Err(err) => return Err(err),
            }
        }

        debug!(
            file = %scanner.filename(),
            lines = report.lines,
            stored = report.stored,
            skipped = report.skipped,
            malformed = report.malformed,
            "Read source"
        );
        Ok(report)
    }

    /// Open `path` and absorb every line.
    pub fn ingest_file(
        &mut self,
        scanner: &Scanner,
        path: impl AsRef<Path>,
    ) -> Result<IngestReport, IngestError> {
        let path = path.as_ref();
        let _span = spans::ingest(&path.display().to_string(), scanner.network()).entered();
        let _timer = IngestTimer::new(path.display().to_string());

        let file = File::open(path).map_err(|source| IngestError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let report = self.ingest_reader(scanner, BufReader::new(file))?;

        info!(
            lines = report.lines,
            stored = report.stored,
            malformed = report.malformed,
            "Ingested log file"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slirc_log::LogFormat;
    use std::io::Cursor;

    const LOG: &str = "\
2013-08-07 16:49:40\t-->\tdylan (dylan@zqz.ca) has joined #deviate
2013-08-07 16:50:02\t@Aaron\tdylan: Auth with my bot for +v
2013-08-07 16:50:10\t *\tdylan waves
this line is garbage
2013-08-07 16:52:04\t<--\tdylan (dylan@zqz.ca) has quit (Ping timeout: 181 seconds)
";

    fn scanner() -> Scanner {
        Scanner::new("deviate.weechatlog", "zqz", "#deviate", LogFormat::Weechat)
    }

    #[test]
    fn test_reader_counts_every_line() {
        let mut stats = Stats::new();
        let report = Ingestor::new(&mut stats)
            .ingest_reader(&scanner(), Cursor::new(LOG))
            .unwrap();

        assert_eq!(
            report,
            IngestReport {
                lines: 5,
                stored: 3,
                skipped: 1,
                malformed: 1,
            }
        );
        assert_eq!(stats.message_count(), 3);
        assert_eq!(stats.channel("zqz", "#deviate").unwrap().message_count(), 2);
        assert_eq!(stats.user("zqz", "dylan").unwrap().part_count(), 1);
    }

    #[test]
    fn test_ingest_line_returns_message_id() {
        let mut stats = Stats::new();
        let mut ingestor = Ingestor::new(&mut stats);
        let scanner = scanner();

        let id = ingestor
            .ingest_line(&scanner, "2013-08-07 16:50:02\tAaron\thi")
            .unwrap();
        assert_eq!(id.map(MessageId::get), Some(1));
        assert_eq!(ingestor.ingest_line(&scanner, "").unwrap(), None);
        assert!(matches!(
            ingestor.ingest_line(&scanner, "garbage"),
            Err(IngestError::Malformed(_))
        ));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let mut stats = Stats::new();
        let err = Ingestor::new(&mut stats)
            .ingest_file(&scanner(), "/nonexistent/deviate.weechatlog")
            .unwrap_err();
        assert_eq!(err.error_code(), "read_error");
    }

    #[test]
    fn test_report_merge() {
        let mut total = IngestReport::default();
        let one = IngestReport {
            lines: 3,
            stored: 2,
            skipped: 1,
            malformed: 0,
        };
        total.merge(&one);
        total.merge(&one);
        assert_eq!(total.lines, 6);
        assert_eq!(total.stored, 4);
    }

    #[test]
    fn test_invalid_utf8_does_not_stop_the_source() {
        let mut log = Vec::new();
        log.extend_from_slice(b"2013-08-07 16:50:02\tAaron\tbonjour\n");
        log.extend_from_slice(b"2013-08-07 16:50:03\tAaron\tcaf\xe9 au lait\n");
        log.extend_from_slice(b"2013-08-07 16:50:04\tdylan\tmerci\r\n");

        let mut stats = Stats::new();
        let report = Ingestor::new(&mut stats)
            .ingest_reader(&scanner(), Cursor::new(log))
            .unwrap();

        assert_eq!(report.lines, 3);
        assert_eq!(report.stored, 3);
        assert_eq!(report.malformed, 0);

        let texts: Vec<&str> = stats.messages().map(|m| m.text()).collect();
        assert_eq!(texts, vec!["bonjour", "caf\u{fffd} au lait", "merci"]);
        assert_eq!(stats.user("zqz", "dylan").unwrap().message_count(), 1);
    }

    #[test]
    fn test_reader_failure_is_fatal() {
        struct Broken;

        impl std::io::Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk on fire"))
            }
        }

        let mut stats = Stats::new();
        let err = Ingestor::new(&mut stats)
            .ingest_reader(&scanner(), BufReader::new(Broken))
            .unwrap_err();
        assert!(matches!(err, IngestError::Read { .. }));
    }
}
