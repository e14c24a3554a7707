// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::config::ParserConfig;
use crate::parse_error::{Context, ParseError};
use crate::serializer;
use crate::token::{Token, TokenKind};
use crate::value::Value;
use crate::warning::Warning;

/// A parsed value together with the warnings collected while parsing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub value: Value,
    pub warnings: Vec<Warning>,
}

/// Recursive-descent parser over an immutable token slice.
///
/// The only state is an index into the tokens, the current nesting depth and
/// the warnings seen so far. After an error the cursor position is
/// unspecified, so a parser should not be reused once `parse` has failed.
pub struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
    config: ParserConfig,
    warnings: Vec<Warning>,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self::with_config(tokens, ParserConfig::default())
    }

    pub fn with_config(tokens: &'t [Token], config: ParserConfig) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
            config,
            warnings: Vec::new(),
        }
    }

    /// Index of the next unconsumed token.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<Warning> {
        core::mem::take(&mut self.warnings)
    }

    /// Parses one top-level object or array.
    pub fn parse(&mut self) -> Result<Value, ParseError> {
        let first = self.peek().ok_or(ParseError::NoTokens)?;
        let value = if first.is_punctuation('{') {
            self.parse_object()?
        } else if first.is_punctuation('[') {
            self.parse_array()?
        } else {
            return Err(unexpected(first));
        };

        if let Some(extra) = self.peek() {
            if self.config.reject_trailing_tokens {
                return Err(ParseError::TrailingToken {
                    text: extra.text.clone(),
                    line: extra.line,
                    column: extra.column,
                });
            }
            debug!(
                "ignoring {} trailing token(s) after the top-level value",
                self.tokens.len() - self.pos
            );
        }
        Ok(value)
    }

    /// Parses and renders the result as canonical text.
    pub fn parse_canonical(&mut self) -> Result<String, ParseError> {
        let value = self.parse()?;
        Ok(serializer::to_string(&value))
    }

    /// Parses an object; the cursor must be on its `{`.
    pub fn parse_object(&mut self) -> Result<Value, ParseError> {
        self.enter('{')?;
        let mut map = BTreeMap::new();

        if self.peek().is_some_and(|t| t.is_punctuation('}')) {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Object(map));
        }

        loop {
            let key_token = self.bump().ok_or(ParseError::UnexpectedEnd(Context::Object))?;
            if key_token.kind != TokenKind::String {
                return Err(ParseError::ExpectedObjectKey {
                    found: key_token.text.clone(),
                    line: key_token.line,
                    column: key_token.column,
                });
            }
            let key = key_token.text.clone();

            if map.contains_key(&key) {
                self.warn(Warning::DuplicateKey {
                    key: key.clone(),
                    line: key_token.line,
                    column: key_token.column,
                });
            }

            match self.bump() {
                Some(t) if t.is_punctuation(':') => {}
                Some(_) => {
                    return Err(ParseError::ExpectedColon {
                        key,
                        line: key_token.line,
                        column: key_token.column,
                    })
                }
                None => return Err(ParseError::UnexpectedEnd(Context::Object)),
            }

            let value = self.parse_value()?;
            map.insert(key, value);

            if self.separator_or_end('}', Context::Object)? {
                break;
            }
        }

        self.depth -= 1;
        Ok(Value::Object(map))
    }

    /// Parses an array; the cursor must be on its `[`.
    pub fn parse_array(&mut self) -> Result<Value, ParseError> {
        self.enter('[')?;
        let mut items = Vec::new();

        if self.peek().is_some_and(|t| t.is_punctuation(']')) {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Array(items));
        }

        loop {
            items.push(self.parse_value()?);

            if self.separator_or_end(']', Context::Array)? {
                break;
            }
        }

        self.depth -= 1;
        Ok(Value::Array(items))
    }

    /// Parses any value at the cursor.
    pub fn parse_value(&mut self) -> Result<Value, ParseError> {
        let token = self.peek().ok_or(ParseError::UnexpectedEnd(Context::Value))?;
        if token.is_punctuation('{') {
            return self.parse_object();
        }
        if token.is_punctuation('[') {
            return self.parse_array();
        }
        let value = token.scalar_value().ok_or_else(|| unexpected(token))?;
        self.pos += 1;
        Ok(value)
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Consumes the opening bracket and accounts for the new nesting level.
    fn enter(&mut self, open: char) -> Result<(), ParseError> {
        let token = match self.bump() {
            Some(t) if t.is_punctuation(open) => t,
            Some(t) => return Err(unexpected(t)),
            None => return Err(ParseError::UnexpectedEnd(Context::Value)),
        };
        let limit = self.config.depth_limit();
        if self.depth >= limit {
            return Err(ParseError::MaxDepthReached {
                depth: limit,
                line: token.line,
                column: token.column,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// After a member or element: consumes `,` or `close`.
    /// Returns `true` when the container is finished.
    fn separator_or_end(&mut self, close: char, context: Context) -> Result<bool, ParseError> {
        let token = self.bump().ok_or(ParseError::UnexpectedEnd(context))?;
        if token.is_punctuation(close) {
            return Ok(true);
        }
        if !token.is_punctuation(',') {
            return Err(ParseError::ExpectedCommaOrEnd {
                closing: close,
                line: token.line,
                column: token.column,
            });
        }

        match self.peek() {
            Some(next) if next.is_punctuation(close) => {
                if !self.config.allow_trailing_commas {
                    return Err(ParseError::TrailingComma {
                        closing: close,
                        line: next.line,
                        column: next.column,
                    });
                }
                self.pos += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn warn(&mut self, warning: Warning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }
}

fn unexpected(token: &Token) -> ParseError {
    ParseError::UnexpectedToken {
        kind: token.kind,
        text: token.text.clone(),
        line: token.line,
        column: token.column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize;
    use test_log::test;

    fn tok(kind: TokenKind, text: &str, line: usize, column: usize) -> Token {
        Token::new(kind, text, line, column)
    }

    fn parse_str(input: &str) -> Result<Value, ParseError> {
        let tokens = tokenize(input)?;
        Parser::new(&tokens).parse()
    }

    fn parse_with(input: &str, config: ParserConfig) -> Result<Value, ParseError> {
        let tokens = tokenize(input)?;
        Parser::with_config(&tokens, config).parse()
    }

    fn canonical(input: &str) -> String {
        let tokens = tokenize(input).unwrap();
        Parser::new(&tokens).parse_canonical().unwrap()
    }

    #[test]
    fn test_parse_object_from_tokens() {
        use TokenKind::*;
        let tokens = vec![
            tok(Punctuation, "{", 1, 1),
            tok(String, "name", 2, 2),
            tok(Punctuation, ":", 2, 7),
            tok(String, "John", 2, 9),
            tok(Punctuation, ",", 2, 14),
            tok(String, "age", 3, 2),
            tok(Punctuation, ":", 3, 6),
            tok(Number, "30", 3, 8),
            tok(Punctuation, "}", 4, 1),
        ];
        let mut parser = Parser::new(&tokens);
        let value = parser.parse().unwrap();

        assert_eq!(value.get("name"), Some(&Value::from("John")));
        assert_eq!(value.get("age"), Some(&Value::from(30)));
        assert_eq!(parser.position(), tokens.len());
        assert!(parser.warnings().is_empty());
    }

    #[test]
    fn test_parse_array_from_tokens() {
        use TokenKind::*;
        let tokens = vec![
            tok(Punctuation, "[", 1, 1),
            tok(Number, "1", 1, 1),
            tok(Punctuation, ",", 1, 3),
            tok(Number, "2", 1, 3),
            tok(Punctuation, ",", 1, 5),
            tok(Number, "3", 1, 5),
            tok(Punctuation, "]", 1, 7),
        ];
        let value = Parser::new(&tokens).parse().unwrap();
        assert_eq!(
            value,
            Value::from(vec![Value::from(1), Value::from(2), Value::from(3)])
        );
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(parse_str("{}"), Ok(Value::Object(BTreeMap::new())));
        assert_eq!(parse_str("[]"), Ok(Value::Array(vec![])));
        assert_eq!(canonical("[{}, [], {\"a\": []}]"), r#"[{},[],{"a":[]}]"#);
    }

    #[test]
    fn test_nested_object() {
        let value = parse_str(r#"{"person": {"name": "John"}}"#).unwrap();
        assert_eq!(
            value.get("person").and_then(|p| p.get("name")),
            Some(&Value::from("John"))
        );
    }

    #[test]
    fn test_array_of_objects() {
        assert_eq!(
            canonical(r#"[{"name":"John","age":30}]"#),
            r#"[{"age":30,"name":"John"}]"#
        );
    }

    #[test]
    fn test_scalar_values() {
        let value = parse_str(r#"[true, false, null, "s", -1.5]"#).unwrap();
        assert_eq!(
            value,
            Value::from(vec![
                Value::from(true),
                Value::from(false),
                Value::Null,
                Value::from("s"),
                Value::Number(crate::JsonNumber::from_lexeme("-1.5")),
            ])
        );
    }

    #[test]
    fn test_null_member_value() {
        assert_eq!(canonical(r#"{"key":null}"#), r#"{"key":null}"#);
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let tokens = tokenize(r#"{"a":1,"a":2}"#).unwrap();
        let mut parser = Parser::new(&tokens);
        let value = parser.parse().unwrap();

        assert_eq!(value.get("a"), Some(&Value::from(2)));
        assert_eq!(
            parser.warnings(),
            &[Warning::DuplicateKey {
                key: "a".into(),
                line: 1,
                column: 10,
            }]
        );
        assert_eq!(parser.take_warnings().len(), 1);
        assert!(parser.warnings().is_empty());
    }

    #[test]
    fn test_root_must_be_container() {
        assert_eq!(parse_str(""), Err(ParseError::NoTokens));
        assert_eq!(
            parse_str(r#""x""#),
            Err(ParseError::UnexpectedToken {
                kind: TokenKind::String,
                text: "x".into(),
                line: 1,
                column: 3,
            })
        );
        assert_eq!(
            parse_str("null").unwrap_err().to_string(),
            "unexpected token 'null' at line 1, col 4"
        );
    }

    #[test]
    fn test_missing_closing_brace() {
        assert_eq!(
            parse_str(r#"{"name":"John","age":30"#),
            Err(ParseError::UnexpectedEnd(Context::Object))
        );
        assert_eq!(
            parse_str("[1,2"),
            Err(ParseError::UnexpectedEnd(Context::Array))
        );
        assert_eq!(
            parse_str(r#"{"a":"#),
            Err(ParseError::UnexpectedEnd(Context::Value))
        );
        assert_eq!(
            parse_str(r#"{"a""#),
            Err(ParseError::UnexpectedEnd(Context::Object))
        );
        assert_eq!(parse_str("{"), Err(ParseError::UnexpectedEnd(Context::Object)));
    }

    #[test]
    fn test_expected_key() {
        assert_eq!(
            parse_str("{1:2}").unwrap_err().to_string(),
            "expected object key at line 1, col 1, but got '1'"
        );
        assert!(matches!(
            parse_str("{,}"),
            Err(ParseError::ExpectedObjectKey { .. })
        ));
    }

    #[test]
    fn test_expected_colon() {
        assert_eq!(
            parse_str(r#"{"a" 1}"#).unwrap_err().to_string(),
            "expected ':' after object key 'a' at line 1, col 4"
        );
    }

    #[test]
    fn test_expected_comma() {
        assert_eq!(
            parse_str(r#"{"a":1 "b":2}"#),
            Err(ParseError::ExpectedCommaOrEnd {
                closing: '}',
                line: 1,
                column: 10,
            })
        );
        assert_eq!(
            parse_str("[1 2]").unwrap_err().to_string(),
            "expected ',' or ']' after array value at line 1, col 3"
        );
    }

    #[test]
    fn test_unexpected_punctuation_value() {
        assert_eq!(
            parse_str("[}]"),
            Err(ParseError::UnexpectedToken {
                kind: TokenKind::Punctuation,
                text: "}".into(),
                line: 1,
                column: 2,
            })
        );
        assert!(matches!(
            parse_str("[,]"),
            Err(ParseError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            parse_str(r#"{"a"::1}"#),
            Err(ParseError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn test_trailing_commas() {
        assert_eq!(
            parse_str(r#"{"a":1,}"#),
            Err(ParseError::TrailingComma {
                closing: '}',
                line: 1,
                column: 8,
            })
        );
        assert_eq!(
            parse_str("[1,]").unwrap_err().to_string(),
            "trailing comma before ']' at line 1, col 4"
        );

        let lenient = ParserConfig::new().allow_trailing_commas(true);
        assert_eq!(
            parse_with(r#"{"a":[1,],}"#, lenient).map(|v| v.to_string()),
            Ok(r#"{"a":[1]}"#.to_string())
        );
    }

    #[test]
    fn test_trailing_tokens() {
        assert_eq!(parse_str("[1] [2]").map(|v| v.to_string()), Ok("[1]".into()));
        assert_eq!(parse_str("{} 42").map(|v| v.to_string()), Ok("{}".into()));

        let strict = ParserConfig::new().reject_trailing_tokens(true);
        assert_eq!(
            parse_with("[1] [2]", strict),
            Err(ParseError::TrailingToken {
                text: "[".into(),
                line: 1,
                column: 5,
            })
        );
        assert!(parse_with("[1]", strict).is_ok());
    }

    #[test]
    fn test_max_depth() {
        let shallow = ParserConfig::new().max_depth(2);
        assert!(parse_with("[[1]]", shallow).is_ok());
        assert_eq!(
            parse_with("[[[1]]]", shallow),
            Err(ParseError::MaxDepthReached {
                depth: 2,
                line: 1,
                column: 3,
            })
        );
        assert!(matches!(
            parse_with(r#"{"a":{"b":{}}}"#, shallow),
            Err(ParseError::MaxDepthReached { depth: 2, .. })
        ));
    }

    #[test]
    fn test_oversized_max_depth_is_capped() {
        let mut config = ParserConfig::new();
        config.max_depth = usize::MAX;
        let deep = format!("{}{}", "[".repeat(2000), "]".repeat(2000));
        // enough stack for the capped recursion depth in debug builds
        let result = std::thread::Builder::new()
            .stack_size(32 * 1024 * 1024)
            .spawn(move || parse_with(&deep, config))
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(
            result,
            Err(ParseError::MaxDepthReached {
                depth: crate::MAX_DEPTH_LIMIT,
                line: 1,
                column: crate::MAX_DEPTH_LIMIT + 1,
            })
        );
    }

    #[test]
    fn test_depth_unwinds_between_siblings() {
        let shallow = ParserConfig::new().max_depth(2);
        assert!(parse_with("[[1],[2],{},[]]", shallow).is_ok());
    }

    #[test]
    fn test_parse_value_directly() {
        let tokens = tokenize(r#""just a string""#).unwrap();
        let mut parser = Parser::new(&tokens);
        assert_eq!(parser.parse_value(), Ok(Value::from("just a string")));
        assert_eq!(
            parser.parse_value(),
            Err(ParseError::UnexpectedEnd(Context::Value))
        );
    }
}
