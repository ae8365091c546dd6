//! Standard output targets: files, temporary files and stdout/stderr.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::OutputTarget;

/// Output target for writing to stdout.
#[derive(Debug, Clone)]
pub struct StdoutOutput {
    id: String,
}

impl StdoutOutput {
    /// Create a new stdout output target.
    pub fn new() -> Self {
        Self { id: "-".into() }
    }
}

impl Default for StdoutOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputTarget for StdoutOutput {
    fn id(&self) -> &str {
        &self.id
    }

    fn open_overwrite(&self) -> io::Result<Box<dyn Write + Send>> {
        Ok(Box::new(io::stdout()))
    }

    fn open_append(&self) -> io::Result<Box<dyn Write + Send>> {
        Ok(Box::new(io::stdout()))
    }

    fn open_create_new(&self) -> io::Result<Box<dyn Write + Send>> {
        Ok(Box::new(io::stdout()))
    }
}

/// Output target for writing to stderr.
#[derive(Debug, Clone)]
pub struct StderrOutput {
    id: String,
}

impl StderrOutput {
    /// Create a new stderr output target.
    pub fn new() -> Self {
        Self {
            id: "stderr".into(),
        }
    }
}

impl Default for StderrOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputTarget for StderrOutput {
    fn id(&self) -> &str {
        &self.id
    }

    fn open_overwrite(&self) -> io::Result<Box<dyn Write + Send>> {
        Ok(Box::new(io::stderr()))
    }

    fn open_append(&self) -> io::Result<Box<dyn Write + Send>> {
        Ok(Box::new(io::stderr()))
    }

    fn open_create_new(&self) -> io::Result<Box<dyn Write + Send>> {
        Ok(Box::new(io::stderr()))
    }
}

/// Output target for writing to files.
#[derive(Debug, Clone)]
pub struct FileOutput {
    id: String,
    path: PathBuf,
}

impl FileOutput {
    /// Create a new file output target.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id = path.to_string_lossy().into_owned();
        Self { id, path }
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputTarget for FileOutput {
    fn id(&self) -> &str {
        &self.id
    }

    fn open_overwrite(&self) -> io::Result<Box<dyn Write + Send>> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&self.path)?;
        Ok(Box::new(file))
    }

    fn open_append(&self) -> io::Result<Box<dyn Write + Send>> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        Ok(Box::new(file))
    }

    fn open_create_new(&self) -> io::Result<Box<dyn Write + Send>> {
        let file = OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&self.path)?;
        Ok(Box::new(file))
    }
}

/// Output target backed by a freshly created, uniquely named file.
///
/// The file is created (empty) when the target is built and is kept on disk
/// afterwards; removing it is up to the caller. Because the file already
/// exists, `WriteMode::CreateNew` fails on it.
#[derive(Debug, Clone)]
pub struct TempFileOutput {
    inner: FileOutput,
}

impl TempFileOutput {
    /// Default file name prefix.
    pub const DEFAULT_PREFIX: &'static str = "xmlfeed";

    /// Create a temporary file with the given prefix in the system temp dir.
    pub fn new(prefix: &str) -> io::Result<Self> {
        Self::in_dir(std::env::temp_dir(), prefix)
    }

    /// Create a temporary file with the given prefix in `dir`.
    pub fn in_dir(dir: impl AsRef<Path>, prefix: &str) -> io::Result<Self> {
        let file = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(".xml")
            .tempfile_in(dir)?;
        let (_, path) = file.keep().map_err(|e| e.error)?;
        Ok(Self {
            inner: FileOutput::new(path),
        })
    }

    /// Get the generated file path.
    pub fn path(&self) -> &Path {
        self.inner.path()
    }
}

impl OutputTarget for TempFileOutput {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn open_overwrite(&self) -> io::Result<Box<dyn Write + Send>> {
        self.inner.open_overwrite()
    }

    fn open_append(&self) -> io::Result<Box<dyn Write + Send>> {
        self.inner.open_append()
    }

    fn open_create_new(&self) -> io::Result<Box<dyn Write + Send>> {
        self.inner.open_create_new()
    }
}
