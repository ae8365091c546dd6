//! Buffered handle that stops writing for good after its first failure.

use std::fmt;
use std::io::{self, Write};

const DEFAULT_CAPACITY: usize = 8 * 1024;

/// Buffering wrapper around an opened output handle.
///
/// Behaves like `std::io::BufWriter` until a write or flush to the handle
/// fails. From then on the sink is poisoned: pending bytes are discarded,
/// every later call returns an error without touching the handle, and drop
/// writes nothing.
pub struct BufferedSink {
    inner: Box<dyn Write + Send>,
    buf: Vec<u8>,
    capacity: usize,
    poisoned: bool,
}

impl BufferedSink {
    /// Wrap `inner` with the default 8 KiB buffer.
    pub fn new(inner: Box<dyn Write + Send>) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, inner)
    }

    pub fn with_capacity(capacity: usize, inner: Box<dyn Write + Send>) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(capacity),
            capacity,
            poisoned: false,
        }
    }

    /// Whether a write to the handle has failed.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Bytes accepted but not yet handed to the handle.
    pub fn buffered(&self) -> &[u8] {
        &self.buf
    }

    fn check_healthy(&self) -> io::Result<()> {
        if self.poisoned {
            return Err(io::Error::other(
                "sink disabled after an earlier write failure",
            ));
        }
        Ok(())
    }

    fn poison(&mut self) {
        self.poisoned = true;
        self.buf.clear();
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        self.check_healthy()?;
        let result = self.inner.write_all(&self.buf);
        self.buf.clear();
        if result.is_err() {
            self.poison();
        }
        result
    }
}

impl Write for BufferedSink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.check_healthy()?;
        if self.buf.len() + data.len() > self.capacity {
            self.flush_buf()?;
        }
        if data.len() >= self.capacity {
            if let Err(e) = self.inner.write_all(data) {
                self.poison();
                return Err(e);
            }
        } else {
            self.buf.extend_from_slice(data);
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_buf()?;
        let result = self.inner.flush();
        if result.is_err() {
            self.poison();
        }
        result
    }
}

impl fmt::Debug for BufferedSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedSink")
            .field("buffered", &self.buf.len())
            .field("capacity", &self.capacity)
            .field("poisoned", &self.poisoned)
            .finish()
    }
}

impl Drop for BufferedSink {
    fn drop(&mut self) {
        if !self.poisoned {
            let _ = self.flush();
        }
    }
}
