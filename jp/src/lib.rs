// SPDX-License-Identifier: Apache-2.0

//! A small JSON reader: a character-level tokenizer, a recursive-descent
//! parser over the resulting tokens, and a compact canonical serializer.
//!
//! ```
//! let doc = jp::parse(r#"{"name": "John", "age": 30, "name": "Jane"}"#).unwrap();
//! assert_eq!(doc.value.to_string(), r#"{"age":30,"name":"Jane"}"#);
//! assert_eq!(doc.warnings.len(), 1);
//! ```
//!
//! The grammar is deliberately narrow: no exponents in numbers, no `\u`
//! escapes in strings, and the document root must be an object or an array.

mod config;
pub use config::{ParserConfig, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};

mod token;
pub use token::{Token, TokenKind, PUNCTUATION};

pub mod tokenizer;
pub use tokenizer::{tokenize, Tokenizer};

mod json_number;
pub use json_number::{JsonNumber, NumberResult};

mod value;
pub use value::Value;

mod warning;
pub use warning::Warning;

mod parse_error;
pub use parse_error::{Context, ParseError};

mod parser;
pub use parser::{Document, Parser};

pub mod serializer;

/// Tokenizes and parses `input` with the default [`ParserConfig`].
pub fn parse(input: &str) -> Result<Document, ParseError> {
    parse_with_config(input, ParserConfig::default())
}

/// Tokenizes and parses `input`.
pub fn parse_with_config(input: &str, config: ParserConfig) -> Result<Document, ParseError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser::with_config(&tokens, config);
    let value = parser.parse()?;
    Ok(Document {
        value,
        warnings: parser.take_warnings(),
    })
}

/// Renders `value` as compact canonical text.
pub fn to_canonical_string(value: &Value) -> String {
    serializer::to_string(value)
}
