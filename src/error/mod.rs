//! Error types for xmlfeed write operations.
//!
//! This module provides:
//! - `Stage`: Indicates where in the document lifecycle an error occurred
//! - `WriterError`: Every failure a `StreamWriter` can report
//!
//! Nothing here is recovered locally. A writer that hit an I/O failure stays
//! failed, and opening a sink never terminates the process.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::config::WriteMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Error while acquiring the sink
    Open,
    Header,
    Element,
    Leaf,
    Flush,
    /// Error while releasing the sink
    Close,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Open => write!(f, "Open"),
            Stage::Header => write!(f, "Header"),
            Stage::Element => write!(f, "Element"),
            Stage::Leaf => write!(f, "Leaf"),
            Stage::Flush => write!(f, "Flush"),
            Stage::Close => write!(f, "Close"),
        }
    }
}

#[derive(Debug, Error)]
pub enum WriterError {
    /// The output handle could not be created (permissions, bad path, ...).
    #[error("[{}] {target}: cannot open sink in {mode} mode: {source}", Stage::Open)]
    SinkOpen {
        target: String,
        mode: WriteMode,
        #[source]
        source: io::Error,
    },

    /// A write to an already open sink failed. Never retried.
    #[error("[{stage}] {target}: write failed: {source}")]
    Write {
        stage: Stage,
        target: String,
        #[source]
        source: io::Error,
    },

    /// `close_element` was called with no element open.
    #[error("cannot close </{tag}>: no element is open")]
    DepthUnderflow { tag: String },

    /// Strict mode only: the closing tag does not match the innermost open one.
    #[error("cannot close </{found}>: innermost open element is <{expected}>")]
    TagMismatch { expected: String, found: String },

    /// Strict mode only: the sink was released with elements still open.
    #[error("{target}: document closed with {depth} element(s) still open")]
    UnclosedElements { target: String, depth: usize },

    /// An earlier write failed; the writer produces no further output.
    #[error("{target}: sink failed earlier, refusing further output")]
    Failed { target: String },

    #[error("writer is already closed")]
    Closed,
}

impl WriterError {
    /// The lifecycle stage the error belongs to, when it is an I/O error.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            WriterError::SinkOpen { .. } => Some(Stage::Open),
            WriterError::Write { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Whether the underlying sink is unusable after this error.
    ///
    /// Contract violations (underflow, mismatch) leave the sink untouched.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            WriterError::SinkOpen { .. }
                | WriterError::Write { .. }
                | WriterError::Failed { .. }
                | WriterError::Closed
        )
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
