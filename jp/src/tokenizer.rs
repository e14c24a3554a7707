// SPDX-License-Identifier: Apache-2.0

use core::iter::{FusedIterator, Peekable};
use core::str::Chars;

use log::{debug, trace};

use crate::token::{Token, TokenKind, PUNCTUATION};

#[derive(Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrKind,
    line: usize,
    column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrKind {
    /// No lexeme starts with this character
    UnexpectedCharacter(char),
    /// Backslash followed by something outside `b f n r t \ / "`
    InvalidEscape(char),
    /// Input ended inside a string literal
    UnterminatedString,
    /// Number lexeme without a single digit, e.g. `-` or `.`
    InvalidNumber(String),
    /// Starts with `t` or `f` but is not `true` or `false`
    InvalidBoolean(char),
    /// Starts with `n` but is not `null`
    InvalidNull(char),
}

impl Error {
    pub fn new<T>(kind: ErrKind, line: usize, column: usize) -> Result<T, Self> {
        Err(Self { kind, line, column })
    }

    pub fn kind(&self) -> &ErrKind {
        &self.kind
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?} at {}:{}", self.kind, self.line, self.column)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.kind {
            ErrKind::UnexpectedCharacter(c) => write!(f, "unexpected character '{c}'")?,
            ErrKind::InvalidEscape(c) => write!(f, "invalid escape character '\\{c}'")?,
            ErrKind::UnterminatedString => f.write_str("unterminated string")?,
            ErrKind::InvalidNumber(lexeme) => write!(f, "invalid number '{lexeme}'")?,
            ErrKind::InvalidBoolean(c) => {
                write!(f, "invalid boolean value starting with '{c}'")?
            }
            ErrKind::InvalidNull(c) => write!(f, "invalid null value starting with '{c}'")?,
        }
        write!(f, " at line {}, col {}", self.line, self.column)
    }
}

impl std::error::Error for Error {}

/// Single-pass scanner turning text into [`Token`]s.
///
/// Yields `Result<Token, Error>`; after the first error the iterator is
/// exhausted.
pub struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
    failed: bool,
}

/// Scans the whole input, stopping at the first lexical error.
pub fn tokenize(input: &str) -> Result<Vec<Token>, Error> {
    let tokens = Tokenizer::new(input).collect::<Result<Vec<_>, _>>()?;
    debug!("--finished-- {} tokens", tokens.len());
    Ok(tokens)
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            chars: input.chars().peekable(),
            line: 1,
            column: 0,
            failed: false,
        }
    }

    /// Current cursor as `(line, column)`.
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, Error> {
        self.skip_whitespace();
        let Some(&ch) = self.chars.peek() else {
            return Ok(None);
        };

        // fixed priority: string, number, punctuation, boolean, null
        if let Some(token) = self.scan_string(ch)? {
            return Ok(Some(token));
        }
        if let Some(token) = self.scan_number(ch)? {
            return Ok(Some(token));
        }
        if let Some(token) = self.scan_punctuation(ch) {
            return Ok(Some(token));
        }
        if let Some(token) = self.scan_boolean(ch)? {
            return Ok(Some(token));
        }
        if let Some(token) = self.scan_null(ch)? {
            return Ok(Some(token));
        }
        Error::new(ErrKind::UnexpectedCharacter(ch), self.line, self.column)
    }

    fn scan_string(&mut self, ch: char) -> Result<Option<Token>, Error> {
        if ch != '"' {
            return Ok(None);
        }
        self.advance();

        let mut value = String::new();
        loop {
            match self.advance() {
                Some('"') => {
                    return Ok(Some(Token::new(
                        TokenKind::String,
                        value,
                        self.line,
                        self.column,
                    )));
                }
                Some('\\') => match self.advance() {
                    Some(escape) => match unescape(escape) {
                        Some(c) => value.push(c),
                        None => {
                            return Error::new(
                                ErrKind::InvalidEscape(escape),
                                self.line,
                                self.column,
                            )
                        }
                    },
                    None => break,
                },
                Some(c) => value.push(c),
                None => break,
            }
        }
        Error::new(ErrKind::UnterminatedString, self.line, self.column)
    }

    fn scan_number(&mut self, ch: char) -> Result<Option<Token>, Error> {
        if !(ch == '-' || ch == '.' || ch.is_ascii_digit()) {
            return Ok(None);
        }
        let start = self.column;
        let mut lexeme = String::new();

        if ch == '-' {
            lexeme.push(ch);
            self.advance();
        }

        let mut has_decimal = false;
        while let Some(&c) = self.chars.peek() {
            match c {
                c if c.is_ascii_digit() => lexeme.push(c),
                '.' if !has_decimal => {
                    has_decimal = true;
                    lexeme.push(c);
                }
                _ => break,
            }
            self.advance();
        }

        // a sign or decimal point alone is not a number
        if !lexeme.chars().any(|c| c.is_ascii_digit()) {
            return Error::new(ErrKind::InvalidNumber(lexeme), self.line, start);
        }
        Ok(Some(Token::new(TokenKind::Number, lexeme, self.line, start)))
    }

    fn scan_punctuation(&mut self, ch: char) -> Option<Token> {
        if !PUNCTUATION.contains(&ch) {
            return None;
        }
        self.advance();
        Some(Token::new(
            TokenKind::Punctuation,
            ch,
            self.line,
            self.column,
        ))
    }

    fn scan_boolean(&mut self, ch: char) -> Result<Option<Token>, Error> {
        let word = match ch {
            't' => "true",
            'f' => "false",
            _ => return Ok(None),
        };
        if !self.consume_word(word) {
            return Error::new(ErrKind::InvalidBoolean(ch), self.line, self.column);
        }
        Ok(Some(Token::new(
            TokenKind::Boolean,
            word,
            self.line,
            self.column,
        )))
    }

    fn scan_null(&mut self, ch: char) -> Result<Option<Token>, Error> {
        if ch != 'n' {
            return Ok(None);
        }
        if !self.consume_word("null") {
            return Error::new(ErrKind::InvalidNull(ch), self.line, self.column);
        }
        Ok(Some(Token::new(
            TokenKind::Null,
            "null",
            self.line,
            self.column,
        )))
    }

    /// Consumes `word` if the input continues with it; leaves the cursor alone otherwise.
    fn consume_word(&mut self, word: &str) -> bool {
        let n = word.chars().count();
        if !self.chars.clone().take(n).eq(word.chars()) {
            return false;
        }
        for _ in 0..n {
            self.advance();
        }
        true
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(Some(token)) => {
                trace!("Token: {:?}", token);
                Some(Ok(token))
            }
            Ok(None) => None,
            Err(e) => {
                debug!("Tokenizer failed: {:?}", e);
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for Tokenizer<'_> {}

fn unescape(escape: char) -> Option<char> {
    match escape {
        '"' => Some('"'),
        '\\' => Some('\\'),
        '/' => Some('/'),
        'b' => Some('\u{8}'),
        'f' => Some('\u{c}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        _ => None,
    }
}
