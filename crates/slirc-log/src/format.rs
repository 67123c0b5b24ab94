//! Supported log formats.

/// A client log format the scanner understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum LogFormat {
    /// WeeChat `logger` plugin output (`date<TAB>prefix<TAB>message`).
    Weechat,
}

/// All formats, in lookup order.
const FORMATS: &[LogFormat] = &[LogFormat::Weechat];

impl LogFormat {
    /// Returns the format name as used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weechat => "weechat",
        }
    }

    /// Look up a format by name, ignoring ASCII case.
    ///
    /// # Example
    ///
    /// ```
    /// use slirc_log::LogFormat;
    ///
    /// assert_eq!(LogFormat::from_name("WeeChat"), Some(LogFormat::Weechat));
    /// assert_eq!(LogFormat::from_name("irssi"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        FORMATS
            .iter()
            .copied()
            .find(|format| format.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
