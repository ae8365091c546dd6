//! Output targets a `StreamWriter` can acquire its sink from.
//!
//! This module provides:
//! - `OutputTarget`: Trait for output destinations
//! - Standard implementations for files, temporary files, stdout/stderr
//! - An in-memory implementation for testing
//! - `BufferedSink`: The buffer a `TargetWriter` writes through

mod buffered;
mod memory;
mod output;
mod std_io;

pub use buffered::BufferedSink;
pub use memory::InMemorySink;
pub use output::OutputTarget;
pub use std_io::{FileOutput, StderrOutput, StdoutOutput, TempFileOutput};
