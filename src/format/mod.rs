//! Leaf value formatting.
//!
//! This module provides:
//! - `Value`: A scalar leaf value (text, number, bool or absent)
//! - `LeafFormat`: Rounding and CDATA-wrapping options for one leaf
//! - `render_leaf`: Turns a non-empty value into the exact text written
//!   between a leaf's open and close tags
//!
//! The wrapping rule: a value is wrapped in `<![CDATA[...]]>` when
//! `wrap_literal` is set and the value is text, or when `force_wrap_literal`
//! is also set. Numbers are rounded first, so a forced wrap puts the rounded
//! text inside the section. Unwrapped text is escaped.
//!
//! Text that reads as a number (`"19.990"`, `"5"`) is handled as that number
//! unless `numeric_text` is turned off.

use std::borrow::Cow;

mod literal;
mod number;
mod value;

pub use literal::{CDATA_CLOSE, CDATA_OPEN, escape_text, wrap_cdata};
pub use number::format_float;
pub use value::Value;

/// Per-leaf formatting options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafFormat {
    /// Decimal places numbers are rounded to
    pub decimals: u32,
    /// Wrap text values in CDATA
    pub wrap_literal: bool,
    /// Wrap numbers in CDATA too (needs `wrap_literal`)
    pub force_wrap_literal: bool,
    /// Treat text that reads as a number as that number
    pub numeric_text: bool,
}

impl Default for LeafFormat {
    fn default() -> Self {
        Self {
            decimals: 0,
            wrap_literal: true,
            force_wrap_literal: false,
            numeric_text: true,
        }
    }
}

impl LeafFormat {
    pub fn new() -> Self {
        Self::default()
    }

    /// No CDATA at all; text is escaped instead.
    ///
    /// `&`, `<` and `>` become entities, so text holding ready-made markup
    /// is written as character data, not as elements.
    pub fn raw() -> Self {
        Self::default().wrap_literal(false)
    }

    /// Set the number of decimal places.
    pub fn decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn wrap_literal(mut self, wrap: bool) -> Self {
        self.wrap_literal = wrap;
        self
    }

    pub fn force_wrap_literal(mut self, force: bool) -> Self {
        self.force_wrap_literal = force;
        self
    }

    /// Enable or disable reading numbers out of text values.
    ///
    /// With this off, text is always text: `"19.990"` keeps its digits and is
    /// wrapped like any other string.
    pub fn numeric_text(mut self, enabled: bool) -> Self {
        self.numeric_text = enabled;
        self
    }

    /// Whether `value` is rounded and left unwrapped as a number.
    pub fn treats_as_number(&self, value: &Value<'_>) -> bool {
        value.is_numeric() || (self.numeric_text && value.numeric_text().is_some())
    }

    /// Whether `value` ends up inside a CDATA section.
    pub fn wraps(&self, value: &Value<'_>) -> bool {
        self.wrap_literal && (!self.treats_as_number(value) || self.force_wrap_literal)
    }
}

/// Render the content of a leaf element.
///
/// Emptiness is the caller's decision; an `Absent` value renders as nothing.
pub fn render_leaf(value: &Value<'_>, format: &LeafFormat) -> String {
    let parsed: Option<Value<'_>> = if format.numeric_text {
        value.numeric_text()
    } else {
        None
    };
    let value = parsed.as_ref().unwrap_or(value);

    let text: Cow<'_, str> = match value {
        Value::Absent => Cow::Borrowed(""),
        Value::Text(t) => Cow::Borrowed(t.as_ref()),
        Value::Integer(n) => Cow::Owned(n.to_string()),
        Value::Unsigned(n) => Cow::Owned(n.to_string()),
        Value::Float(f) => Cow::Owned(format_float(*f, format.decimals)),
        Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
    };

    if format.wraps(value) {
        wrap_cdata(&text)
    } else {
        escape_text(&text).into_owned()
    }
}
