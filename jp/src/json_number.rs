// SPDX-License-Identifier: Apache-2.0

use core::ops::Deref;
use core::str::FromStr;

/// Parsed interpretation of a number lexeme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberResult {
    /// Integer that fits in an `i64`
    Integer(i64),
    /// Integer too large for `i64` (use the raw string for exact representation)
    IntegerOverflow,
    /// Number with a decimal point
    Float(f64),
    /// Number with a decimal point whose magnitude does not fit in an `f64`
    FloatOverflow,
}

/// A JSON number that keeps the exact lexeme it was scanned from.
///
/// The lexeme is what gets serialized, so `30` stays `30` and `1.50` stays
/// `1.50`. Numeric views are derived from it on construction.
#[derive(Debug, Clone)]
pub struct JsonNumber {
    raw: String,
    parsed: NumberResult,
}

impl JsonNumber {
    /// Builds a number from a lexeme the tokenizer has already validated:
    /// an optional `-`, ASCII digits and at most one `.`, with at least one digit.
    pub(crate) fn from_lexeme(lexeme: &str) -> Self {
        let parsed = if is_integer(lexeme) {
            parse_integer(lexeme)
        } else {
            parse_float(lexeme)
        };
        JsonNumber {
            raw: lexeme.to_string(),
            parsed,
        }
    }

    pub fn parsed(&self) -> &NumberResult {
        &self.parsed
    }

    /// Get the number as an `i64` if it's an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self.parsed {
            NumberResult::Integer(val) => Some(val),
            _ => None,
        }
    }

    /// Get the number as an `f64`. Integers are converted, overflowing
    /// integers are parsed from the raw lexeme. `None` if the value is not
    /// finite as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self.parsed {
            NumberResult::Float(val) => Some(val),
            NumberResult::Integer(val) => Some(val as f64),
            NumberResult::IntegerOverflow => {
                f64::from_str(&self.raw).ok().filter(|val| val.is_finite())
            }
            NumberResult::FloatOverflow => None,
        }
    }

    /// The exact lexeme. Never loses information.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parse the number as a custom type using the exact string representation.
    pub fn parse<T: FromStr>(&self) -> Result<T, T::Err> {
        T::from_str(self.as_str())
    }

    /// Check if this number represents an integer (no decimal point).
    pub fn is_integer(&self) -> bool {
        matches!(
            self.parsed,
            NumberResult::Integer(_) | NumberResult::IntegerOverflow
        )
    }
}

impl PartialEq for JsonNumber {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for JsonNumber {}

impl From<i64> for JsonNumber {
    fn from(val: i64) -> Self {
        JsonNumber {
            raw: val.to_string(),
            parsed: NumberResult::Integer(val),
        }
    }
}

impl From<i32> for JsonNumber {
    fn from(val: i32) -> Self {
        JsonNumber::from(i64::from(val))
    }
}

impl From<u32> for JsonNumber {
    fn from(val: u32) -> Self {
        JsonNumber::from(i64::from(val))
    }
}

impl AsRef<str> for JsonNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for JsonNumber {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl core::fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.raw)
    }
}

fn is_integer(lexeme: &str) -> bool {
    !lexeme.contains('.')
}

fn parse_integer(lexeme: &str) -> NumberResult {
    match i64::from_str(lexeme) {
        Ok(val) => NumberResult::Integer(val),
        Err(_) => NumberResult::IntegerOverflow,
    }
}

fn parse_float(lexeme: &str) -> NumberResult {
    match f64::from_str(lexeme) {
        Ok(val) if val.is_finite() => NumberResult::Float(val),
        _ => NumberResult::FloatOverflow,
    }
}
