//! Store configuration: output line separator and malformed-line handling.

/// Line terminator written after every record on store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineSeparator {
    /// `\r\n` on Windows, `\n` everywhere else.
    #[default]
    Platform,
    /// Always `\n`.
    Lf,
    /// Always `\r\n`.
    CrLf,
}

impl LineSeparator {
    /// The terminator as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Platform => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// What `load` does with a line that yields no key/value pair.
///
/// A line is malformed when it is neither blank nor a comment and its parsed
/// key is empty, e.g. `= value` or `: value`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MalformedLinePolicy {
    /// Keep the line verbatim (like a comment) and log a warning.
    #[default]
    Preserve,
    /// Fail the whole load with [`PropsError::MalformedLine`](crate::PropsError::MalformedLine).
    Reject,
}

/// Configuration for an [`OrderedConfigStore`](crate::OrderedConfigStore).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// Terminator appended to every line on store.
    pub line_separator: LineSeparator,
    /// Handling of unparseable lines on load.
    pub malformed: MalformedLinePolicy,
}

impl StoreConfig {
    /// Use `separator` for stored lines.
    pub fn with_line_separator(mut self, separator: LineSeparator) -> Self {
        self.line_separator = separator;
        self
    }

    /// Use `policy` for malformed lines.
    pub fn with_malformed_policy(mut self, policy: MalformedLinePolicy) -> Self {
        self.malformed = policy;
        self
    }
}
