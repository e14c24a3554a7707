// SPDX-License-Identifier: Apache-2.0

use crate::json_number::JsonNumber;
use crate::value::Value;

/// Characters that form single-character punctuation tokens.
pub const PUNCTUATION: [char; 6] = ['{', '}', '[', ']', ':', ','];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A string literal, stored decoded
    String,
    /// A number literal, stored as its lexeme
    Number,
    /// `true` or `false`
    Boolean,
    /// `null`
    Null,
    /// One of `{ } [ ] : ,`
    Punctuation,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Boolean => "boolean",
            TokenKind::Null => "null",
            TokenKind::Punctuation => "json syntax",
        }
    }
}

impl core::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified lexeme together with its position in the input.
///
/// `line` is 1-based. `column` is the scanner cursor after the lexeme, except
/// for number tokens, which carry the column just before their first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// True if this is the punctuation token `c`.
    pub fn is_punctuation(&self, c: char) -> bool {
        self.kind == TokenKind::Punctuation && self.text.chars().eq(core::iter::once(c))
    }

    /// Converts a scalar token into the value it denotes.
    ///
    /// Returns `None` for punctuation, which never stands for a value on its own.
    pub fn scalar_value(&self) -> Option<Value> {
        match self.kind {
            TokenKind::String => Some(Value::String(self.text.clone())),
            TokenKind::Number => Some(Value::Number(JsonNumber::from_lexeme(&self.text))),
            TokenKind::Boolean => Some(Value::Boolean(self.text == "true")),
            TokenKind::Null => Some(Value::Null),
            TokenKind::Punctuation => None,
        }
    }
}
