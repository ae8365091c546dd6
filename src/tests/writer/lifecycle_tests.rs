//! Sink acquisition, failure handling and guaranteed release.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::{
    FileOutput, InMemorySink, OutputTarget, Stage, StreamWriter, TargetWriter, WriteMode,
    WriterError, WriterOptions,
};

/// A sink whose writes always fail.
struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A sink that accepts `budget` bytes, then fails.
struct LimitedSink {
    written: Vec<u8>,
    budget: usize,
}

impl Write for LimitedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written.len() + buf.len() > self.budget {
            return Err(io::Error::new(io::ErrorKind::WriteZero, "disk full"));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Target whose first write fails and whose later writes succeed.
#[derive(Debug, Clone, Default)]
struct FlakyTarget {
    state: Arc<Mutex<FlakyState>>,
}

#[derive(Debug, Default)]
struct FlakyState {
    calls: usize,
    accepted: Vec<u8>,
}

struct FlakyHandle(Arc<Mutex<FlakyState>>);

impl Write for FlakyHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.0.lock().unwrap();
        state.calls += 1;
        if state.calls == 1 {
            return Err(io::Error::other("transient"));
        }
        state.accepted.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl FlakyTarget {
    fn handle(&self) -> io::Result<Box<dyn Write + Send>> {
        Ok(Box::new(FlakyHandle(Arc::clone(&self.state))))
    }
}

impl OutputTarget for FlakyTarget {
    fn id(&self) -> &str {
        "flaky"
    }

    fn open_overwrite(&self) -> io::Result<Box<dyn Write + Send>> {
        self.handle()
    }

    fn open_append(&self) -> io::Result<Box<dyn Write + Send>> {
        self.handle()
    }

    fn open_create_new(&self) -> io::Result<Box<dyn Write + Send>> {
        self.handle()
    }
}

#[test]
fn open_writes_header_to_target() {
    let sink = InMemorySink::new("mem");
    let w = TargetWriter::open(&sink, WriteMode::Overwrite, WriterOptions::default(), true)
        .unwrap();
    assert_eq!(w.id(), "mem");
    w.close().unwrap();

    assert_eq!(
        sink.contents_string(),
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n"
    );
}

#[test]
fn open_without_header_writes_nothing() {
    let sink = InMemorySink::new("mem");
    let w = TargetWriter::open(&sink, WriteMode::Overwrite, WriterOptions::default(), false)
        .unwrap();
    w.close().unwrap();

    assert!(sink.is_empty());
}

#[test]
fn unreachable_path_is_a_sink_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let target = FileOutput::new(dir.path().join("missing").join("feed.xml"));

    let err = TargetWriter::open(&target, WriteMode::Overwrite, WriterOptions::default(), true)
        .err()
        .expect("open must fail");

    assert!(matches!(err, WriterError::SinkOpen { mode: WriteMode::Overwrite, .. }));
    assert_eq!(err.stage(), Some(Stage::Open));
    assert!(err.is_fatal());
    assert!(err.to_string().contains("feed.xml"));
}

#[test]
fn create_new_refuses_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feed.xml");
    std::fs::write(&path, "old").unwrap();

    let target = FileOutput::new(&path);
    let err = TargetWriter::open(&target, WriteMode::CreateNew, WriterOptions::default(), true)
        .err()
        .expect("create_new must fail");

    match err {
        WriterError::SinkOpen { source, .. } => {
            assert_eq!(source.kind(), io::ErrorKind::AlreadyExists)
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "old");
}

#[test]
fn create_writes_file_and_append_continues_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feed.xml");

    let mut w = TargetWriter::create(&path, WriterOptions::default()).unwrap();
    w.open_element("items", true).unwrap();
    w.leaf("item", "one").unwrap();
    w.close().unwrap();

    let target = FileOutput::new(&path);
    let mut w = TargetWriter::open(&target, WriteMode::Append, WriterOptions::default(), false)
        .unwrap();
    // Depth is not persisted; the continuation starts at depth zero.
    w.leaf("item", "two").unwrap();
    w.close().unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<items>\n\t<item><![CDATA[one]]></item>\n\
<item><![CDATA[two]]></item>\n"
    );
}

#[test]
fn write_failure_is_reported_and_disables_writer() {
    let mut w = StreamWriter::new(BrokenSink, WriterOptions::default()).with_id("pipe");

    let err = w.open_element("a", true).unwrap_err();
    match &err {
        WriterError::Write { stage, target, source } => {
            assert_eq!(*stage, Stage::Element);
            assert_eq!(target, "pipe");
            assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(w.depth(), 0);

    assert!(matches!(
        w.leaf("b", "x"),
        Err(WriterError::Failed { .. })
    ));
    assert!(matches!(w.flush(), Err(WriterError::Failed { .. })));
    assert!(matches!(w.close(), Err(WriterError::Failed { .. })));
}

#[test]
fn partial_output_stops_at_the_failed_write() {
    let sink = LimitedSink {
        written: Vec::new(),
        budget: 12,
    };
    let mut w = StreamWriter::new(sink, WriterOptions::default());
    w.open_element("root", true).unwrap();

    let err = w.leaf("name", "long enough to overflow").unwrap_err();
    assert_eq!(err.stage(), Some(Stage::Leaf));
    assert!(matches!(w.empty_element("x"), Err(WriterError::Failed { .. })));
}

#[test]
fn dropping_an_open_writer_flushes_everything() {
    let sink = InMemorySink::new("mem");
    {
        let mut w = TargetWriter::open(&sink, WriteMode::Overwrite, WriterOptions::default(), true)
            .unwrap();
        w.open_element("products", true).unwrap();
        w.leaf("name", "Mug").unwrap();
        // Abandoned mid-document: no close, no flush.
    }

    assert_eq!(
        sink.contents_string(),
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<products>\n\t<name><![CDATA[Mug]]></name>\n"
    );
}

#[test]
fn into_inner_hands_back_the_sink() {
    let mut w = StreamWriter::new(Vec::new(), WriterOptions::default());
    w.empty_element("x").unwrap();
    w.flush().unwrap();

    assert_eq!(w.into_inner().unwrap(), b"<x/>\n".to_vec());
}

#[test]
fn independent_writers_do_not_share_state() {
    let mut a = StreamWriter::new(Vec::new(), WriterOptions::default());
    let mut b = StreamWriter::new(Vec::new(), WriterOptions::default().compact(true));
    a.open_element("a", true).unwrap();
    b.open_element("b", true).unwrap();
    b.close_element("b", true).unwrap();

    assert_eq!(a.depth(), 1);
    assert_eq!(b.depth(), 0);
    assert_eq!(b.into_inner().unwrap(), b"<b></b>".to_vec());
}

#[test]
fn buffered_bytes_are_discarded_after_a_failed_write() {
    let target = FlakyTarget::default();
    let mut w = TargetWriter::open(&target, WriteMode::Overwrite, WriterOptions::default(), false)
        .unwrap();

    // Larger than the buffer, so writing it pushes out the pending `<a>`.
    let long = "x".repeat(9000);
    let err = w.leaf("a", long.as_str()).unwrap_err();
    assert_eq!(err.stage(), Some(Stage::Leaf));
    assert!(err.to_string().contains("flaky"));

    drop(w);

    let state = target.state.lock().unwrap();
    assert_eq!(state.calls, 1);
    assert!(state.accepted.is_empty());
}

#[test]
fn failed_writer_releases_nothing_through_into_inner() {
    let target = FlakyTarget::default();
    let mut w = TargetWriter::open(&target, WriteMode::Overwrite, WriterOptions::default(), false)
        .unwrap();
    w.open_element("root", true).unwrap();
    assert!(w.flush().is_err());

    assert!(matches!(w.into_inner(), Err(WriterError::Failed { .. })));
    let state = target.state.lock().unwrap();
    assert_eq!(state.calls, 1);
    assert!(state.accepted.is_empty());
}
