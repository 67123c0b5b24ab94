//! Log source configuration.

use serde::Deserialize;
use slirc_log::Scanner;

/// One `[[source]]` block: a log file and where its lines belong.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Path to the log file.
    pub file: String,
    /// Network every event in the file is attributed to.
    pub network: String,
    /// Channel attributed to chat lines.
    pub channel: String,
    /// Log format name (default: "weechat").
    #[serde(default = "default_format")]
    pub format: String,
}

impl SourceConfig {
    /// Build the scanner for this source, or `None` if the format is unknown.
    pub fn scanner(&self) -> Option<Scanner> {
        Scanner::new_default(&self.file, &self.network, &self.channel, &self.format)
    }
}

fn default_format() -> String {
    "weechat".to_string()
}
