//! # xmlfeed
//!
//! A streaming XML writer for feeds and exports.
//!
//! ## Overview
//!
//! xmlfeed provides:
//! - **Streaming output**: Elements are written to the sink as they are
//!   produced; the document is never held in memory
//! - **Well-formedness bookkeeping**: Nesting depth is tracked and a close
//!   without a matching open is rejected; an opt-in strict mode also checks
//!   tag names
//! - **Value formatting**: Deterministic numeric rounding, CDATA wrapping
//!   for text, `<tag/>` for empty values
//! - **Output targets**: Files, temporary files, stdout/stderr and in-memory
//!   sinks, opened in overwrite, append or create-new mode
//! - **Error handling**: Every failure is a returned `WriterError`; nothing
//!   panics or exits the process
//! - **Configuration**: Writer setups loadable from YAML/JSON
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use xmlfeed::{LeafFormat, TargetWriter, WriterOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut writer = TargetWriter::create("feed.xml", WriterOptions::default())?;
//!
//!     writer.element("products", |w| {
//!         w.element("product", |w| {
//!             w.leaf("name", "Breakfast white mug")?;
//!             w.leaf_with("price", 5.00, LeafFormat::new().decimals(2))?;
//!             w.leaf("quantity", 20)
//!         })
//!     })?;
//!
//!     writer.close()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Output format
//!
//! Outside compact mode every element sits on its own line, indented with
//! one tab per nesting level, and leaves are written inline:
//!
//! ```text
//! <?xml version="1.0" encoding="utf-8"?>
//! <products>
//! 	<product>
//! 		<name><![CDATA[Breakfast white mug]]></name>
//! 		<price>5</price>
//! 		<note/>
//! 	</product>
//! </products>
//! ```
//!
//! Compact mode drops every tab and line break.
//!
//! ## Features
//!
//! - `yaml` - Load `WriterConfig` from YAML (enabled by default)
//! - `json` - Load `WriterConfig` from JSON
//! - `tracing` - Emit debug/trace events through `tracing`
//! - `miette` - Pretty error reporting with miette

#[macro_use]
mod trace;

// Core modules
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod writer;

// Re-exports for convenience
pub use config::{
    ConfigError, EmptyValuePolicy, LineEnding, OutputConfig, WriteMode, WriterConfig,
    WriterOptions,
};
pub use error::{Stage, WriterError};
pub use format::{LeafFormat, Value};
pub use io::{BufferedSink, FileOutput, InMemorySink, OutputTarget, StderrOutput, StdoutOutput, TempFileOutput};
pub use writer::{StreamWriter, TargetWriter};

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::WriterDiagnostic;

// Internal test modules (see src/tests)
#[cfg(test)]
mod tests;
