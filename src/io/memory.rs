//! In-memory output implementation for testing.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use super::OutputTarget;

/// In-memory output sink for testing.
///
/// Clones share the same buffer, so a test can hand one clone to a writer and
/// inspect the document through another.
#[derive(Debug, Clone)]
pub struct InMemorySink {
    id: String,
    buf: Arc<Mutex<Vec<u8>>>,
}

impl InMemorySink {
    /// Create a new empty in-memory sink.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            buf: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.buf.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get the contents of the sink as bytes.
    pub fn contents(&self) -> Vec<u8> {
        self.lock().clone()
    }

    /// Get the contents of the sink as a string.
    pub fn contents_string(&self) -> String {
        String::from_utf8_lossy(&self.contents()).into_owned()
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear the sink contents.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn handle(&self) -> Box<dyn Write + Send> {
        Box::new(InMemoryWriteHandle {
            buf: self.buf.clone(),
        })
    }
}

impl OutputTarget for InMemorySink {
    fn id(&self) -> &str {
        &self.id
    }

    fn open_overwrite(&self) -> io::Result<Box<dyn Write + Send>> {
        self.clear();
        Ok(self.handle())
    }

    fn open_append(&self) -> io::Result<Box<dyn Write + Send>> {
        Ok(self.handle())
    }

    fn open_create_new(&self) -> io::Result<Box<dyn Write + Send>> {
        if !self.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("in-memory sink '{}' already holds data", self.id),
            ));
        }
        Ok(self.handle())
    }
}

/// Write handle for in-memory sink.
struct InMemoryWriteHandle {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl std::fmt::Debug for InMemoryWriteHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryWriteHandle").finish()
    }
}

impl Write for InMemoryWriteHandle {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .buf
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
