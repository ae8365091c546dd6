//! CDATA wrapping and text escaping.

use std::borrow::Cow;

pub const CDATA_OPEN: &str = "<![CDATA[";
pub const CDATA_CLOSE: &str = "]]>";

/// Wrap `text` in a CDATA section.
///
/// Text goes in verbatim. A `]]>` inside it would end the section early, so
/// it is split across two sections: `]]` closes the first, `>` opens the next.
pub fn wrap_cdata(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + CDATA_OPEN.len() + CDATA_CLOSE.len());
    out.push_str(CDATA_OPEN);
    let mut rest = text;
    while let Some(pos) = rest.find(CDATA_CLOSE) {
        out.push_str(&rest[..pos]);
        out.push_str("]]]]><![CDATA[>");
        rest = &rest[pos + CDATA_CLOSE.len()..];
    }
    out.push_str(rest);
    out.push_str(CDATA_CLOSE);
    out
}

/// Escape `&`, `<` and `>` for use as element text.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    if !text.bytes().any(|b| matches!(b, b'&' | b'<' | b'>')) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
