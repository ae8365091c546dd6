//! Configuration types for writers.
//!
//! This module provides:
//! - `WriterOptions`: Formatting options (encoding, compact mode, header, ...)
//! - `WriteMode`: How an output target is opened
//! - `WriterConfig`: A complete writer configuration loadable from YAML/JSON

mod file;
mod options;

pub use file::{ConfigError, OutputConfig, ResolvedConfig, WriterConfig};
pub use options::{EmptyValuePolicy, LineEnding, WriteMode, WriterOptions};
