//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::WriterError;

/// A diagnostic wrapper for writer errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct WriterDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

fn help_for(err: &WriterError) -> &'static str {
    match err {
        WriterError::SinkOpen { .. } => {
            "Check that the output path exists and is writable, or pick another write mode"
        }
        WriterError::Write { .. } | WriterError::Failed { .. } => {
            "The output stream failed; the partial document should be discarded"
        }
        WriterError::DepthUnderflow { .. } => {
            "Every close_element call needs a matching, earlier open_element call"
        }
        WriterError::TagMismatch { .. } => "Close elements in the reverse order they were opened",
        WriterError::UnclosedElements { .. } => "Close every open element before closing the writer",
        WriterError::Closed => "The writer was already closed",
    }
}

impl From<WriterError> for WriterDiagnostic {
    fn from(e: WriterError) -> Self {
        let severity = if e.is_fatal() {
            Severity::Error
        } else {
            Severity::Warning
        };
        WriterDiagnostic {
            message: e.to_string(),
            help: Some(help_for(&e).into()),
            source: Some(Box::new(e)),
            severity,
        }
    }
}

impl From<WriterError> for miette::Report {
    fn from(e: WriterError) -> Self {
        miette::Report::new(WriterDiagnostic::from(e))
    }
}
