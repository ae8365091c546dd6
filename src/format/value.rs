//! Scalar values a leaf element can hold.

use std::borrow::Cow;

use crate::config::EmptyValuePolicy;

/// A scalar leaf value.
///
/// Most callers never name this type: `leaf` accepts anything that converts
/// into it (`&str`, `String`, integers, floats, `bool`, and `Option`s of
/// those, where `None` becomes `Absent`).
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Absent,
    Text(Cow<'a, str>),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
}

impl Value<'_> {
    /// Whether the value is a number by type.
    ///
    /// Text is never numeric here; see `numeric_text` for text that reads as
    /// a number.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Value::Integer(_) | Value::Unsigned(_) | Value::Float(_)
        )
    }

    /// The number a text value spells, if any.
    ///
    /// Accepts optional surrounding whitespace, a sign, digits with an
    /// optional fraction and an optional exponent: `"5"`, `"-0.5"`, `".5"`,
    /// `"1e3"`. Words such as `"inf"` or `"NaN"`, hex, and values that
    /// overflow to infinity are not numbers. Integers that fit in 64 bits
    /// stay integers.
    pub fn numeric_text(&self) -> Option<Value<'static>> {
        match self {
            Value::Text(text) => parse_number(text),
            _ => None,
        }
    }

    /// Whether the value is written as `<tag/>` under `policy`.
    pub fn is_empty(&self, policy: EmptyValuePolicy) -> bool {
        match (self, policy) {
            (Value::Absent, _) => true,
            (Value::Text(t), EmptyValuePolicy::Strict) => t.is_empty(),
            (Value::Text(t), EmptyValuePolicy::Falsy) => t.is_empty() || t == "0",
            (_, EmptyValuePolicy::Strict) => false,
            (Value::Integer(n), EmptyValuePolicy::Falsy) => *n == 0,
            (Value::Unsigned(n), EmptyValuePolicy::Falsy) => *n == 0,
            (Value::Float(f), EmptyValuePolicy::Falsy) => *f == 0.0,
            (Value::Bool(b), EmptyValuePolicy::Falsy) => !*b,
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Text(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(s: &'a String) -> Self {
        Value::Text(Cow::Borrowed(s.as_str()))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::Text(Cow::Owned(s))
    }
}

impl<'a> From<Cow<'a, str>> for Value<'a> {
    fn from(s: Cow<'a, str>) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value<'_> {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value<'_> {
    fn from(f: f32) -> Self {
        // Go through the f32's own shortest form so 0.1f32 stays 0.1.
        Value::Float(f.to_string().parse().unwrap_or(f64::from(f)))
    }
}

macro_rules! impl_from_int {
    ($variant:ident as $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Value<'_> {
                fn from(n: $t) -> Self {
                    Value::$variant(n as $target)
                }
            }
        )*
    };
}

impl_from_int!(Integer as i64: i8, i16, i32, i64, isize);
impl_from_int!(Unsigned as u64: u8, u16, u32, u64, usize);

impl<'a, T> From<Option<T>> for Value<'a>
where
    T: Into<Value<'a>>,
{
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Absent, Into::into)
    }
}

fn parse_number(text: &str) -> Option<Value<'static>> {
    let text = text.trim_matches(|c: char| c.is_ascii_whitespace());
    let body = text.strip_prefix(['+', '-']).unwrap_or(text);
    let starts_like_number = body.starts_with(|c: char| c.is_ascii_digit() || c == '.');
    let only_number_chars = body
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !starts_like_number || !only_number_chars {
        return None;
    }

    if let Ok(n) = text.parse::<i64>() {
        return Some(Value::Integer(n));
    }
    if let Ok(n) = text.parse::<u64>() {
        return Some(Value::Unsigned(n));
    }
    text.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Value::Float)
}
