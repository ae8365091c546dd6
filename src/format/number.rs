//! Numeric rendering: rounding and plain decimal text.
//!
//! Rounding is half away from zero, applied to the shortest decimal string
//! that round-trips to the same `f64`. Working on that string instead of the
//! binary value means `11.005` rounds to `11.01`, which is what a reader of
//! the number expects, and the result does not depend on the platform.

/// Render `value` rounded to `decimals` places.
///
/// The output never uses an exponent or thousands separators. Trailing
/// fractional zeros and a trailing `.` are dropped, and negative zero is
/// written as `0`. Non-finite values render as `NAN`, `INF` and `-INF`.
pub fn format_float(value: f64, decimals: u32) -> String {
    if value.is_nan() {
        return "NAN".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.into();
    }

    // Display for f64 is the shortest round-trip form and never an exponent.
    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    let keep = decimals as usize;

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(keep))
        .collect();
    let mut int_len = int_part.len();

    let round_up = frac_part.as_bytes().get(keep).is_some_and(|d| *d >= b'5');
    if round_up && increment(&mut digits) {
        digits.insert(0, b'1');
        int_len += 1;
    }

    let (int_digits, frac_digits) = digits.split_at(int_len);
    let frac_len = frac_digits
        .iter()
        .rposition(|d| *d != b'0')
        .map_or(0, |i| i + 1);
    let frac_digits = &frac_digits[..frac_len];

    let is_zero = frac_digits.is_empty() && int_digits.iter().all(|d| *d == b'0');

    let mut out = String::with_capacity(digits.len() + 2);
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.extend(int_digits.iter().map(|d| char::from(*d)));
    if !frac_digits.is_empty() {
        out.push('.');
        out.extend(frac_digits.iter().map(|d| char::from(*d)));
    }
    out
}

/// Add one to an ASCII digit string. Returns the carry out of the top digit.
fn increment(digits: &mut [u8]) -> bool {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return false;
        }
    }
    true
}
