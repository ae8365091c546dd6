//! Writer options and the small enums they are built from.

use std::borrow::Cow;
use std::fmt;

/// How an output target is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Truncate existing content
    #[default]
    Overwrite,
    /// Append to existing content
    Append,
    /// Fail if the target already exists
    CreateNew,
}

impl WriteMode {
    /// Parse a mode from a string.
    ///
    /// Accepts the long names as well as the `fopen`-style `w`, `a` and `x`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "overwrite" | "truncate" | "w" => Some(WriteMode::Overwrite),
            "append" | "a" => Some(WriteMode::Append),
            "create_new" | "create-new" | "x" => Some(WriteMode::CreateNew),
            _ => None,
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteMode::Overwrite => write!(f, "overwrite"),
            WriteMode::Append => write!(f, "append"),
            WriteMode::CreateNew => write!(f, "create_new"),
        }
    }
}

/// End-of-line marker written after each line outside compact mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "lf" | "\n" | "unix" => Some(LineEnding::Lf),
            "crlf" | "\r\n" | "windows" => Some(LineEnding::CrLf),
            _ => None,
        }
    }
}

/// Which leaf values count as empty and are written as `<tag/>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyValuePolicy {
    /// Only absent values and empty text.
    #[default]
    Strict,
    /// Also numeric zero, `false` and the text `"0"`.
    Falsy,
}

impl EmptyValuePolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Some(EmptyValuePolicy::Strict),
            "falsy" => Some(EmptyValuePolicy::Falsy),
            _ => None,
        }
    }
}

/// Formatting options for a `StreamWriter`.
///
/// Building or changing options never touches a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOptions {
    /// Encoding label declared in the default header
    pub encoding: String,
    /// Suppress all indentation and line breaks
    pub compact: bool,
    /// Custom header line; `None` means the XML declaration
    pub header: Option<String>,
    pub line_ending: LineEnding,
    pub empty_values: EmptyValuePolicy,
    /// Track open tag names and reject mismatched closes
    pub strict: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            encoding: Self::DEFAULT_ENCODING.to_string(),
            compact: false,
            header: None,
            line_ending: LineEnding::default(),
            empty_values: EmptyValuePolicy::default(),
            strict: false,
        }
    }
}

impl WriterOptions {
    pub const DEFAULT_ENCODING: &'static str = "utf-8";

    /// Create options with the defaults: utf-8, indented, XML declaration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set encoding, compact mode and header in one go.
    ///
    /// Passing `None` for the header restores the XML declaration built from
    /// `encoding`.
    pub fn configure(&mut self, encoding: impl Into<String>, compact: bool, header: Option<String>) {
        self.encoding = encoding.into();
        self.compact = compact;
        self.header = header;
    }

    /// Set the declared encoding label.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Enable or disable compact output.
    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Replace the header line.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn with_empty_values(mut self, policy: EmptyValuePolicy) -> Self {
        self.empty_values = policy;
        self
    }

    /// Enable or disable tag-name verification on close.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// The header line as it will be written.
    pub fn header_line(&self) -> Cow<'_, str> {
        match &self.header {
            Some(custom) => Cow::Borrowed(custom),
            None => Cow::Owned(format!(
                "<?xml version=\"1.0\" encoding=\"{}\"?>",
                self.encoding
            )),
        }
    }
}
