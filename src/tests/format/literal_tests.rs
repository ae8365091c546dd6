//! CDATA wrapping and escaping.

use std::borrow::Cow;

use crate::format::{escape_text, wrap_cdata};

#[test]
fn wrap_plain_text() {
    assert_eq!(wrap_cdata("Mug"), "<![CDATA[Mug]]>");
    assert_eq!(wrap_cdata(""), "<![CDATA[]]>");
}

#[test]
fn wrap_splits_every_terminator() {
    assert_eq!(
        wrap_cdata("]]>a]]>"),
        "<![CDATA[]]]]><![CDATA[>a]]]]><![CDATA[>]]>"
    );
}

#[test]
fn wrap_keeps_partial_terminators() {
    assert_eq!(wrap_cdata("a]]b]>c"), "<![CDATA[a]]b]>c]]>");
}

#[test]
fn escape_borrows_clean_text() {
    assert!(matches!(escape_text("plain text"), Cow::Borrowed(_)));
}

#[test]
fn escape_markup_characters() {
    assert_eq!(escape_text("<a & b>"), "&lt;a &amp; b&gt;");
    assert_eq!(escape_text("\"quoted\" 'single'"), "\"quoted\" 'single'");
}

#[test]
fn escape_keeps_multibyte_text() {
    assert_eq!(escape_text("čaj & káva"), "čaj &amp; káva");
}
