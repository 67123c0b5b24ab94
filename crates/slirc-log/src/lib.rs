//! # slirc-log
//!
//! Parsers that turn IRC client log files into normalized chat events.
//!
//! ## Features
//!
//! - WeeChat log line parsing (joins, parts, quits, topic changes, messages)
//! - Lines without a statistic event (actions, mode changes, topic info)
//!   are reported as "no event" instead of failing
//! - Log format selection by name, with unknown formats surfaced as `None`
//!
//! The crate only classifies lines. Aggregating events is left to the
//! consumer.

#![deny(clippy::all)]
#![warn(missing_docs)]

//! ## Quick Start
//!
//! ```rust
//! use slirc_log::{EventKind, Scanner};
//!
//! let scanner = Scanner::new_default("deviate.log", "zqz", "#deviate", "weechat")
//!     .expect("weechat is a known format");
//!
//! let line = "2013-08-07 16:49:40\t-->\tdylan (dylan@zqz.ca) has joined #deviate";
//! let event = scanner.parse_line(line).unwrap().unwrap();
//!
//! assert_eq!(event.kind, EventKind::Join);
//! assert_eq!(event.nick, "dylan");
//! assert_eq!(event.channel.as_deref(), Some("#deviate"));
//! ```

pub mod error;
pub mod event;
pub mod format;
pub mod scanner;
mod weechat;

pub use self::error::{LogError, Result};
pub use self::event::{EventKind, LogEvent};
pub use self::format::LogFormat;
pub use self::scanner::Scanner;
