//! Tests for file, temp file and standard stream targets.

use std::fs;
use std::io::{ErrorKind, Write};

use crate::{FileOutput, OutputTarget, StderrOutput, StdoutOutput, TempFileOutput, WriteMode};

#[test]
fn file_output_writes_and_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.xml");

    let out = FileOutput::new(path.clone());

    {
        let mut w = out.open_overwrite().unwrap();
        w.write_all(b"abc").unwrap();
    }
    assert_eq!(fs::read(&path).unwrap(), b"abc".to_vec());

    {
        let mut w = out.open_append().unwrap();
        w.write_all(b"def").unwrap();
    }
    assert_eq!(fs::read(&path).unwrap(), b"abcdef".to_vec());

    {
        let mut w = out.open(WriteMode::Overwrite).unwrap();
        w.write_all(b"x").unwrap();
    }
    assert_eq!(fs::read(&path).unwrap(), b"x".to_vec());
}

#[test]
fn file_output_create_new() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.xml");
    let out = FileOutput::new(&path);

    out.open_create_new().unwrap().write_all(b"1").unwrap();
    let err = out.open_create_new().err().expect("second create_new must fail");
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(out.id(), path.to_string_lossy());
}

#[test]
fn temp_file_output_creates_prefixed_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = TempFileOutput::in_dir(dir.path(), "feed").unwrap();

    let name = out.path().file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("feed"), "unexpected name {name}");
    assert!(name.ends_with(".xml"));
    assert!(out.path().exists());

    out.open_overwrite().unwrap().write_all(b"<a/>").unwrap();
    assert_eq!(fs::read_to_string(out.path()).unwrap(), "<a/>");

    // The file already exists, so create_new is refused.
    assert!(out.open_create_new().is_err());
}

#[test]
fn temp_file_outputs_are_unique() {
    let dir = tempfile::tempdir().unwrap();
    let a = TempFileOutput::in_dir(dir.path(), "x").unwrap();
    let b = TempFileOutput::in_dir(dir.path(), "x").unwrap();
    assert_ne!(a.path(), b.path());
}

#[test]
fn std_stream_ids() {
    assert_eq!(StdoutOutput::new().id(), "-");
    assert_eq!(StderrOutput::default().id(), "stderr");
}
