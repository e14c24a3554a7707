// SPDX-License-Identifier: Apache-2.0

//! Compact canonical serialization.
//!
//! Output has no inserted whitespace, object keys come out in sorted order and
//! strings are re-escaped so that the result always scans back to the same
//! value. Only the escapes the tokenizer understands are produced; other
//! characters, including control characters, are written as-is.

use core::fmt::Write;

use crate::value::Value;

/// Renders `value` as canonical text.
pub fn to_string(value: &Value) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_value(value, &mut out);
    out
}

/// Writes `value` as canonical text into any `fmt::Write` sink.
pub fn write_value<W: Write + ?Sized>(value: &Value, out: &mut W) -> core::fmt::Result {
    match value {
        Value::Null => out.write_str("null"),
        Value::Boolean(true) => out.write_str("true"),
        Value::Boolean(false) => out.write_str("false"),
        Value::Number(n) => out.write_str(n.as_str()),
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.write_char('[')?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_value(item, out)?;
            }
            out.write_char(']')
        }
        Value::Object(map) => {
            out.write_char('{')?;
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_string(key, out)?;
                out.write_char(':')?;
                write_value(item, out)?;
            }
            out.write_char('}')
        }
    }
}

fn write_string<W: Write + ?Sized>(s: &str, out: &mut W) -> core::fmt::Result {
    out.write_char('"')?;
    for c in s.chars() {
        match escape(c) {
            Some(e) => {
                out.write_char('\\')?;
                out.write_char(e)?;
            }
            None => out.write_char(c)?,
        }
    }
    out.write_char('"')
}

fn escape(c: char) -> Option<char> {
    match c {
        '"' => Some('"'),
        '\\' => Some('\\'),
        '\n' => Some('n'),
        '\r' => Some('r'),
        '\t' => Some('t'),
        '\u{8}' => Some('b'),
        '\u{c}' => Some('f'),
        _ => None,
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write_value(self, f)
    }
}
