// SPDX-License-Identifier: Apache-2.0

use crate::token::TokenKind;
use crate::tokenizer;

/// What the parser was in the middle of when the tokens ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    Object,
    Array,
    Value,
}

impl core::fmt::Display for Context {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Context::Object => "object",
            Context::Array => "array",
            Context::Value => "value",
        })
    }
}

/// Errors that can occur during JSON parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// An error bubbled up from the underlying tokenizer.
    TokenizerError(tokenizer::Error),
    /// The token sequence was empty.
    NoTokens,
    /// A token that cannot start a value (or the document) at this point.
    UnexpectedToken {
        kind: TokenKind,
        text: String,
        line: usize,
        column: usize,
    },
    /// Something other than a string where an object key belongs.
    ExpectedObjectKey {
        found: String,
        line: usize,
        column: usize,
    },
    /// An object key not followed by `:`.
    ExpectedColon {
        key: String,
        line: usize,
        column: usize,
    },
    /// A value not followed by `,` or the container's closing bracket.
    ExpectedCommaOrEnd {
        closing: char,
        line: usize,
        column: usize,
    },
    /// A `,` directly followed by the container's closing bracket.
    TrailingComma {
        closing: char,
        line: usize,
        column: usize,
    },
    /// Tokens ran out before the construct was complete.
    UnexpectedEnd(Context),
    /// A token after the top-level value while trailing tokens are rejected.
    TrailingToken {
        text: String,
        line: usize,
        column: usize,
    },
    /// Nesting went past the configured maximum depth.
    MaxDepthReached {
        depth: usize,
        line: usize,
        column: usize,
    },
}

impl From<tokenizer::Error> for ParseError {
    fn from(err: tokenizer::Error) -> Self {
        ParseError::TokenizerError(err)
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::TokenizerError(e) => write!(f, "{e}"),
            ParseError::NoTokens => f.write_str("no tokens to parse"),
            ParseError::UnexpectedToken {
                text,
                line,
                column,
                ..
            } => write!(f, "unexpected token '{text}' at line {line}, col {column}"),
            ParseError::ExpectedObjectKey {
                found,
                line,
                column,
            } => write!(
                f,
                "expected object key at line {line}, col {column}, but got '{found}'"
            ),
            ParseError::ExpectedColon { key, line, column } => write!(
                f,
                "expected ':' after object key '{key}' at line {line}, col {column}"
            ),
            ParseError::ExpectedCommaOrEnd {
                closing: '}',
                line,
                column,
            } => write!(f, "expected ',' or '}}' after value at line {line}, col {column}"),
            ParseError::ExpectedCommaOrEnd {
                closing,
                line,
                column,
            } => write!(
                f,
                "expected ',' or '{closing}' after array value at line {line}, col {column}"
            ),
            ParseError::TrailingComma {
                closing,
                line,
                column,
            } => write!(
                f,
                "trailing comma before '{closing}' at line {line}, col {column}"
            ),
            ParseError::UnexpectedEnd(context) => {
                write!(f, "unexpected end of input while parsing {context}")
            }
            ParseError::TrailingToken { text, line, column } => write!(
                f,
                "unexpected trailing token '{text}' at line {line}, col {column}"
            ),
            ParseError::MaxDepthReached {
                depth,
                line,
                column,
            } => write!(
                f,
                "maximum nesting depth of {depth} exceeded at line {line}, col {column}"
            ),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::TokenizerError(e) => Some(e),
            _ => None,
        }
    }
}
