//! Small building blocks shared by the parser, the registries and validation

use std::fmt;

use serde::Serialize;

/// Kind of a single textual pipe parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// Any non-empty text
    String,
    /// Text that coerces to an integral number, such as `3`, `-1`, `1.0` or `1e2`
    Int,
}

impl ParamKind {
    /// Check whether a single token satisfies this kind
    pub fn accepts(self, token: &str) -> bool {
        match self {
            ParamKind::String => !token.is_empty(),
            ParamKind::Int => coerce_int(token).is_some(),
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::String => write!(f, "string"),
            ParamKind::Int => write!(f, "int"),
        }
    }
}

/// Check a parameter list against an exact, ordered shape.
///
/// The arity must match and every token must satisfy the kind at the same
/// position. There is no partial credit.
pub fn is_sequence_of(expected: &[ParamKind], params: &[String]) -> bool {
    expected.len() == params.len()
        && expected
            .iter()
            .zip(params)
            .all(|(kind, token)| kind.accepts(token))
}

/// Coerce a textual parameter to an integral number.
///
/// Surrounding whitespace is ignored and blank text counts as zero. Decimal
/// and exponent notation are accepted as long as the value is finite and
/// has no fractional part, so `1.0`, `2e0` and integers wider than `i64`
/// all qualify. The result is an `f64`; callers saturate or bound it.
pub fn coerce_int(token: &str) -> Option<f64> {
    let token = token.trim();
    if token.is_empty() {
        return Some(0.0);
    }
    // f64's parser also knows `inf` and `NaN`; only plain numerals count here
    let numeral = token
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !numeral {
        return None;
    }
    let value = token.parse::<f64>().ok()?;
    (value.is_finite() && value.fract() == 0.0).then_some(value)
}

/// Append `value` unless it is already present. Returns true if it was added.
pub fn push_unique<T: PartialEq>(items: &mut Vec<T>, value: T) -> bool {
    if items.contains(&value) {
        false
    } else {
        items.push(value);
        true
    }
}

/// Split on `separator` and trim whitespace around every piece
pub fn split_and_trim(input: &str, separator: char) -> Vec<&str> {
    input.split(separator).map(str::trim).collect()
}
