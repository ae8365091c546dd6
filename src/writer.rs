//! Streaming XML writer.
//!
//! `StreamWriter` turns a linear sequence of open/leaf/close calls into
//! nested, indented markup written straight to its sink. It keeps no tree:
//! the only structural state is the nesting depth (plus the open tag names
//! when strict mode is on).
//!
//! The caller is responsible for closing elements with the same names, in
//! reverse order, that it opened them with. Outside strict mode the writer
//! only checks that depth never goes below zero.

use std::fmt;
use std::io::Write;
use std::path::Path;

use crate::config::{WriteMode, WriterConfig, WriterOptions};
use crate::error::{Stage, WriterError};
use crate::format::{LeafFormat, Value, render_leaf};
use crate::io::{BufferedSink, FileOutput, OutputTarget};

/// Writer over a sink opened from an `OutputTarget`.
///
/// Output goes through a `BufferedSink`, so bytes still buffered when a write
/// fails are discarded rather than written later.
pub type TargetWriter = StreamWriter<BufferedSink>;

/// Identifier used when the sink was handed over directly.
const ANONYMOUS_SINK: &str = "<sink>";

/// Streaming writer owning its sink until `close`, `into_inner` or drop.
///
/// After a failed write the writer never flushes its sink again. A sink with
/// a buffer of its own, such as `std::io::BufWriter`, may still flush that
/// buffer when it is dropped; `BufferedSink` does not.
pub struct StreamWriter<W: Write> {
    /// `None` once released
    sink: Option<W>,
    id: String,
    options: WriterOptions,
    depth: usize,
    /// Open tag names, only maintained in strict mode
    open_tags: Vec<String>,
    failed: bool,
}

impl<W: Write> StreamWriter<W> {
    /// Adopt an already open sink. Nothing is written.
    pub fn new(sink: W, options: WriterOptions) -> Self {
        Self {
            sink: Some(sink),
            id: ANONYMOUS_SINK.to_string(),
            options,
            depth: 0,
            open_tags: Vec::new(),
            failed: false,
        }
    }

    /// Adopt an already open sink and write the header line.
    pub fn start(sink: W, options: WriterOptions) -> Result<Self, WriterError> {
        let mut writer = Self::new(sink, options);
        writer.write_header()?;
        Ok(writer)
    }

    /// Set the identifier used in errors and logs.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Change encoding, compact mode and header. Writes nothing.
    pub fn configure(&mut self, encoding: impl Into<String>, compact: bool, header: Option<String>) {
        self.options.configure(encoding, compact, header);
    }

    /// Write the header line: no indentation, line break unless compact.
    pub fn write_header(&mut self) -> Result<(), WriterError> {
        let header = self.options.header_line().into_owned();
        self.emit(Stage::Header, &[&header], false, true)?;
        trace!(sink = %self.id, "header written");
        Ok(())
    }

    /// Write `<tag>` at the current depth and descend one level.
    ///
    /// With `expect_children` false no line break follows, so inline content
    /// and the closing tag can continue on the same line.
    pub fn open_element(&mut self, tag: &str, expect_children: bool) -> Result<(), WriterError> {
        self.open_at(Stage::Element, tag, expect_children)
    }

    /// Ascend one level and write `</tag>`.
    ///
    /// The closing tag is indented only when `expected_children` is true; a
    /// line break always follows. Fails without writing when no element is
    /// open or, in strict mode, when `tag` is not the innermost open element.
    pub fn close_element(&mut self, tag: &str, expected_children: bool) -> Result<(), WriterError> {
        self.close_at(Stage::Element, tag, expected_children)
    }

    /// Write a self-closing `<tag/>` on its own line.
    pub fn empty_element(&mut self, tag: &str) -> Result<(), WriterError> {
        self.emit(Stage::Element, &["<", tag, "/>"], true, true)
    }

    /// Write a leaf with the default format: no decimals, text in CDATA.
    pub fn leaf<'v>(&mut self, tag: &str, value: impl Into<Value<'v>>) -> Result<(), WriterError> {
        self.leaf_with(tag, value, LeafFormat::default())
    }

    /// Write a leaf element holding a single scalar.
    ///
    /// Empty values (per the configured `EmptyValuePolicy`) become `<tag/>`.
    /// Anything else is written inline as `<tag>content</tag>`.
    pub fn leaf_with<'v>(
        &mut self,
        tag: &str,
        value: impl Into<Value<'v>>,
        format: LeafFormat,
    ) -> Result<(), WriterError> {
        let value = value.into();
        if value.is_empty(self.options.empty_values) {
            return self.emit(Stage::Leaf, &["<", tag, "/>"], true, true);
        }

        let content = render_leaf(&value, &format);
        self.open_at(Stage::Leaf, tag, false)?;
        self.emit(Stage::Leaf, &[&content], false, false)?;
        self.close_at(Stage::Leaf, tag, false)
    }

    /// Open `tag` expecting children, run `body`, then close `tag`.
    ///
    /// The close is skipped when `body` fails, since the document is
    /// abandoned at that point anyway.
    pub fn element<F>(&mut self, tag: &str, body: F) -> Result<(), WriterError>
    where
        F: FnOnce(&mut Self) -> Result<(), WriterError>,
    {
        self.open_element(tag, true)?;
        body(self)?;
        self.close_element(tag, true)
    }

    /// Flush buffered output to the underlying sink.
    pub fn flush(&mut self) -> Result<(), WriterError> {
        self.check_usable()?;
        let result = match self.sink.as_mut() {
            Some(sink) => sink.flush(),
            None => return Err(WriterError::Closed),
        };
        result.map_err(|source| self.fail(Stage::Flush, source))
    }

    /// Flush and release the sink.
    pub fn close(self) -> Result<(), WriterError> {
        self.into_inner().map(drop)
    }

    /// Flush and hand the sink back.
    ///
    /// In strict mode, elements left open are reported as
    /// `UnclosedElements` after the sink has been flushed and released.
    pub fn into_inner(mut self) -> Result<W, WriterError> {
        let mut sink = self.sink.take().ok_or(WriterError::Closed)?;

        if self.failed {
            return Err(WriterError::Failed {
                target: self.id.clone(),
            });
        }

        sink.flush().map_err(|source| WriterError::Write {
            stage: Stage::Close,
            target: self.id.clone(),
            source,
        })?;
        debug!(sink = %self.id, depth = self.depth, "sink released");

        if self.depth > 0 {
            warn!(sink = %self.id, depth = self.depth, "closing with unclosed elements");
            if self.options.strict {
                return Err(WriterError::UnclosedElements {
                    target: self.id.clone(),
                    depth: self.depth,
                });
            }
        }
        Ok(sink)
    }

    fn open_at(&mut self, stage: Stage, tag: &str, expect_children: bool) -> Result<(), WriterError> {
        self.emit(stage, &["<", tag, ">"], true, expect_children)?;
        self.depth += 1;
        if self.options.strict {
            self.open_tags.push(tag.to_string());
        }
        Ok(())
    }

    fn close_at(&mut self, stage: Stage, tag: &str, expected_children: bool) -> Result<(), WriterError> {
        if self.depth == 0 {
            return Err(WriterError::DepthUnderflow {
                tag: tag.to_string(),
            });
        }
        // Empty unless strict mode is on.
        if let Some(expected) = self.open_tags.last().filter(|open| open.as_str() != tag) {
            return Err(WriterError::TagMismatch {
                expected: expected.clone(),
                found: tag.to_string(),
            });
        }

        self.check_usable()?;
        self.depth -= 1;
        self.open_tags.pop();
        self.emit(stage, &["</", tag, ">"], expected_children, true)
    }

    fn check_usable(&self) -> Result<(), WriterError> {
        if self.failed {
            return Err(WriterError::Failed {
                target: self.id.clone(),
            });
        }
        if self.sink.is_none() {
            return Err(WriterError::Closed);
        }
        Ok(())
    }

    /// The single write primitive: optional indentation, the parts, optional
    /// line break. Compact mode drops both indentation and line break.
    fn emit(&mut self, stage: Stage, parts: &[&str], indent: bool, eol: bool) -> Result<(), WriterError> {
        self.check_usable()?;
        let pretty = !self.options.compact;
        let indent_levels = if indent && pretty { self.depth } else { 0 };
        let line_ending = if eol && pretty {
            self.options.line_ending.as_str()
        } else {
            ""
        };

        let result = match self.sink.as_mut() {
            Some(sink) => write_line(sink, indent_levels, parts, line_ending),
            None => return Err(WriterError::Closed),
        };
        result.map_err(|source| self.fail(stage, source))
    }

    fn fail(&mut self, stage: Stage, source: std::io::Error) -> WriterError {
        self.failed = true;
        warn!(sink = %self.id, %stage, error = %source, "write failed, writer disabled");
        WriterError::Write {
            stage,
            target: self.id.clone(),
            source,
        }
    }
}

impl<W: Write> fmt::Debug for StreamWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamWriter")
            .field("id", &self.id)
            .field("depth", &self.depth)
            .field("open", &self.sink.is_some())
            .field("failed", &self.failed)
            .field("options", &self.options)
            .finish()
    }
}

fn write_line<W: Write>(
    sink: &mut W,
    indent_levels: usize,
    parts: &[&str],
    line_ending: &str,
) -> std::io::Result<()> {
    for _ in 0..indent_levels {
        sink.write_all(b"\t")?;
    }
    for part in parts {
        sink.write_all(part.as_bytes())?;
    }
    sink.write_all(line_ending.as_bytes())
}

impl TargetWriter {
    /// Open `target` in `mode` and, if `write_header`, write the header.
    ///
    /// A target that cannot be opened yields `WriterError::SinkOpen`.
    pub fn open(
        target: &dyn OutputTarget,
        mode: WriteMode,
        options: WriterOptions,
        write_header: bool,
    ) -> Result<Self, WriterError> {
        let handle = target.open(mode).map_err(|source| WriterError::SinkOpen {
            target: target.id().to_string(),
            mode,
            source,
        })?;
        debug!(sink = target.id(), %mode, "sink opened");

        let mut writer = Self::new(BufferedSink::new(handle), options).with_id(target.id());
        if write_header {
            writer.write_header()?;
        }
        Ok(writer)
    }

    /// Create (or truncate) the file at `path` and write the header.
    pub fn create(path: impl AsRef<Path>, options: WriterOptions) -> Result<Self, WriterError> {
        let target = FileOutput::new(path.as_ref());
        Self::open(&target, WriteMode::Overwrite, options, true)
    }

    /// Open the writer a `WriterConfig` describes.
    ///
    /// Configuration problems are reported as `SinkOpen` with an
    /// `InvalidInput` source, since no sink could be acquired.
    pub fn from_config(config: &WriterConfig) -> Result<Self, WriterError> {
        let resolved = config.resolve().map_err(|e| WriterError::SinkOpen {
            target: config.output.path.clone().unwrap_or_else(|| config.output.kind.clone()),
            mode: WriteMode::default(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
        })?;
        Self::open(
            resolved.target.as_ref(),
            resolved.mode,
            resolved.options,
            resolved.write_header,
        )
    }
}

impl<W: Write> Drop for StreamWriter<W> {
    fn drop(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            if self.failed {
                return;
            }
            if let Err(_e) = sink.flush() {
                warn!(sink = %self.id, error = %_e, "flush on drop failed");
            }
            trace!(sink = %self.id, depth = self.depth, "sink released on drop");
        }
    }
}
