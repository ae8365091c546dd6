//! CLI integration helpers for xmlfeed.
//!
//! This module turns command-line style output arguments into an
//! `OutputTarget` plus writer options, so binaries do not have to repeat the
//! token conventions.
//!
//! # Example
//!
//! ```rust,ignore
//! use xmlfeed::cli::OutputArgs;
//!
//! let args = OutputArgs::new().with_output("feed.xml").with_compact();
//! let mut writer = args.open_writer()?;
//! writer.leaf("name", "Mug")?;
//! writer.close()?;
//! ```

use std::sync::Arc;

use crate::config::{WriteMode, WriterOptions};
use crate::error::WriterError;
use crate::io::{FileOutput, OutputTarget, StderrOutput, StdoutOutput, TempFileOutput};
use crate::writer::TargetWriter;

/// Common output arguments for CLI applications.
#[derive(Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output token. `None` means stdout.
    pub output: Option<String>,
    /// Append to an existing file instead of truncating it.
    pub append: bool,
    /// Refuse to write over an existing file.
    pub create_new: bool,
    /// Write without indentation and line breaks.
    pub compact: bool,
    /// Declared encoding label.
    pub encoding: Option<String>,
    /// Skip the header line.
    pub no_header: bool,
}

impl OutputArgs {
    /// Create new empty output arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output token.
    pub fn with_output(mut self, token: impl Into<String>) -> Self {
        self.output = Some(token.into());
        self
    }

    /// Enable append mode.
    pub fn with_append(mut self) -> Self {
        self.append = true;
        self
    }

    /// Enable create-new mode.
    pub fn with_create_new(mut self) -> Self {
        self.create_new = true;
        self
    }

    /// Enable compact output.
    pub fn with_compact(mut self) -> Self {
        self.compact = true;
        self
    }

    /// Set the encoding label.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Check if writing to stdout.
    pub fn is_stdout(&self) -> bool {
        matches!(self.output.as_deref(), None | Some("-") | Some("stdout"))
    }

    /// Get the write mode based on flags. Append wins over create-new.
    pub fn write_mode(&self) -> WriteMode {
        if self.append {
            WriteMode::Append
        } else if self.create_new {
            WriteMode::CreateNew
        } else {
            WriteMode::Overwrite
        }
    }

    /// Build writer options from the flags.
    pub fn options(&self) -> WriterOptions {
        let mut options = WriterOptions::new().compact(self.compact);
        if let Some(encoding) = &self.encoding {
            options = options.with_encoding(encoding.clone());
        }
        options
    }

    /// Resolve the output token into a target.
    pub fn target(&self) -> std::io::Result<Arc<dyn OutputTarget>> {
        parse_output(self.output.as_deref().unwrap_or("-"))
    }

    /// Resolve the target and open a writer on it.
    pub fn open_writer(&self) -> Result<TargetWriter, WriterError> {
        let token = self.output.as_deref().unwrap_or("-");
        let target = parse_output(token).map_err(|source| WriterError::SinkOpen {
            target: token.to_string(),
            mode: self.write_mode(),
            source,
        })?;
        TargetWriter::open(target.as_ref(), self.write_mode(), self.options(), !self.no_header)
    }
}

/// Parse an output token into a target.
///
/// - `-` or `stdout`: standard output
/// - `stderr`: standard error
/// - `temp` or `temp:<prefix>`: a new temporary file
/// - `@<path>`: the file at `path`, even if it looks like a keyword
/// - anything else: a file path
pub fn parse_output(token: &str) -> std::io::Result<Arc<dyn OutputTarget>> {
    if let Some(path) = token.strip_prefix('@') {
        return Ok(Arc::new(FileOutput::new(path)));
    }
    if token == "-" || token.eq_ignore_ascii_case("stdout") {
        return Ok(Arc::new(StdoutOutput::new()));
    }
    if token.eq_ignore_ascii_case("stderr") {
        return Ok(Arc::new(StderrOutput::new()));
    }
    if token.eq_ignore_ascii_case("temp") {
        return Ok(Arc::new(TempFileOutput::new(TempFileOutput::DEFAULT_PREFIX)?));
    }
    if let Some(prefix) = token.strip_prefix("temp:") {
        return Ok(Arc::new(TempFileOutput::new(prefix)?));
    }
    Ok(Arc::new(FileOutput::new(token)))
}
