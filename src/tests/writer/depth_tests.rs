//! Depth bookkeeping, underflow and strict tag matching.

use super::{buffer_writer, output};
use crate::{StreamWriter, WriterError, WriterOptions};

#[test]
fn balanced_sequence_returns_to_depth_zero() {
    let mut w = buffer_writer(WriterOptions::default());
    w.open_element("a", true).unwrap();
    w.open_element("b", true).unwrap();
    assert_eq!(w.depth(), 2);
    w.leaf("c", "x").unwrap();
    assert_eq!(w.depth(), 2);
    w.close_element("b", true).unwrap();
    w.close_element("a", true).unwrap();
    assert_eq!(w.depth(), 0);
}

#[test]
fn underflow_is_an_error_and_writes_nothing() {
    let mut w = buffer_writer(WriterOptions::default());

    let err = w.close_element("root", true).unwrap_err();
    assert!(matches!(err, WriterError::DepthUnderflow { ref tag } if tag == "root"));
    assert!(!err.is_fatal());
    assert_eq!(w.depth(), 0);
    assert_eq!(output(w), "");
}

#[test]
fn underflow_after_balanced_sequence() {
    let mut w = buffer_writer(WriterOptions::default());
    w.element("a", |_| Ok(())).unwrap();

    assert!(matches!(
        w.close_element("a", true),
        Err(WriterError::DepthUnderflow { .. })
    ));
    // The writer is still usable after a contract violation.
    w.empty_element("b").unwrap();
    assert_eq!(output(w), "<a>\n</a>\n<b/>\n");
}

#[test]
fn tag_names_are_trusted_outside_strict_mode() {
    let mut w = buffer_writer(WriterOptions::default());
    w.open_element("a", true).unwrap();
    w.close_element("b", true).unwrap();

    assert_eq!(output(w), "<a>\n</b>\n");
}

#[test]
fn strict_mode_rejects_mismatched_close() {
    let mut w = buffer_writer(WriterOptions::default().strict(true));
    w.open_element("a", true).unwrap();
    w.open_element("b", true).unwrap();

    let err = w.close_element("a", true).unwrap_err();
    match err {
        WriterError::TagMismatch { expected, found } => {
            assert_eq!(expected, "b");
            assert_eq!(found, "a");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(w.depth(), 2);

    w.close_element("b", true).unwrap();
    w.close_element("a", true).unwrap();
    assert_eq!(output(w), "<a>\n\t<b>\n\t</b>\n</a>\n");
}

#[test]
fn strict_mode_tracks_leaves() {
    let mut w = buffer_writer(WriterOptions::default().strict(true));
    w.element("a", |w| w.leaf("b", "x")).unwrap();
    assert_eq!(output(w), "<a>\n\t<b><![CDATA[x]]></b>\n</a>\n");
}

#[test]
fn strict_mode_reports_unclosed_elements_on_close() {
    let mut w = buffer_writer(WriterOptions::default().strict(true));
    w.open_element("a", true).unwrap();

    let err = w.into_inner().unwrap_err();
    assert!(matches!(err, WriterError::UnclosedElements { depth: 1, .. }));
}

#[test]
fn lenient_close_with_open_elements_still_releases() {
    let mut w = StreamWriter::new(Vec::new(), WriterOptions::default());
    w.open_element("a", true).unwrap();

    let bytes = w.into_inner().unwrap();
    assert_eq!(bytes, b"<a>\n".to_vec());
}
