// jackc - A single-pass compiler translating Jack classes into Hack VM code
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Lexer module for the jackc compiler.
//!
//! This module tokenizes Jack source code into a finite sequence of tokens.
//! It handles:
//! - Line comments (`// ...`) and block comments (`/* ... */`, `/** ... */`)
//! - String constants (the text between double quotes, kept verbatim)
//! - Single-character delimiters, each emitted as its own symbol token
//! - Classification of the remaining words into keywords, integer constants
//!   and identifiers

mod tokens;
pub mod xml;

pub use tokens::{Token, TokenKind};

use crate::error::{CompileError, ErrorCode, Span};
use crate::grammar;

/// Largest integer constant the language accepts.
pub const MAX_INT_CONST: u32 = 32767;

/// The lexer state for tokenizing source code.
pub struct Lexer<'source> {
    /// The source code being tokenized.
    source: &'source str,
    /// Current byte position in the source.
    position: usize,
    /// Current line number (1-indexed).
    line: usize,
    /// Current column number (1-indexed).
    column: usize,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Get the current position in the source.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get the current line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the current column number.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Check if we've reached the end of the source.
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Peek at the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    /// Peek at the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.position..].chars();
        chars.next();
        chars.next()
    }

    /// Advance to the next character and return it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Create a span from start position to current position.
    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.position)
    }

    /// Get the next token from the source.
    pub fn next_token(&mut self) -> Result<Option<(Token, Span)>, CompileError> {
        loop {
            let Some(c) = self.peek() else {
                return Ok(None);
            };

            if c == '/' && self.peek_next() == Some('/') {
                self.skip_line_comment();
                continue;
            }

            if c == '/' && self.peek_next() == Some('*') {
                self.skip_block_comment()?;
                continue;
            }

            if c == '"' {
                return self.scan_string().map(Some);
            }

            if grammar::is_symbol(c) {
                let start = self.position;
                self.advance();
                return Ok(Some((Token::symbol(c), self.span_from(start))));
            }

            // Whitespace and control characters only separate words
            if c.is_whitespace() || c.is_control() {
                self.advance();
                continue;
            }

            return self.scan_word().map(Some);
        }
    }

    /// Skip a line comment, leaving the terminating newline in place.
    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip a block comment including its closing `*/`.
    fn skip_block_comment(&mut self) -> Result<(), CompileError> {
        let start = self.position;
        self.advance(); // consume /
        self.advance(); // consume *

        loop {
            match self.peek() {
                None => {
                    return Err(CompileError::new(
                        ErrorCode::UnterminatedComment,
                        "Unterminated block comment",
                        self.span_from(start),
                    )
                    .with_hint("Close the comment with '*/'"));
                }
                Some('*') if self.peek_next() == Some('/') => {
                    self.advance();
                    self.advance();
                    return Ok(());
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// Scan a string constant. Everything up to the closing quote is kept.
    fn scan_string(&mut self) -> Result<(Token, Span), CompileError> {
        let start = self.position;
        self.advance(); // consume opening "
        let content_start = self.position;

        loop {
            match self.peek() {
                None => {
                    return Err(CompileError::new(
                        ErrorCode::UnterminatedString,
                        "Unterminated string constant",
                        self.span_from(start),
                    ));
                }
                Some('"') => break,
                Some(_) => {
                    self.advance();
                }
            }
        }

        let content = &self.source[content_start..self.position];
        self.advance(); // consume closing "

        Ok((Token::string_const(content), self.span_from(start)))
    }

    /// Scan a word up to the next separator, delimiter, or quote.
    fn scan_word(&mut self) -> Result<(Token, Span), CompileError> {
        let start = self.position;

        while let Some(c) = self.peek() {
            if c.is_whitespace() || c.is_control() || c == '"' || grammar::is_symbol(c) {
                break;
            }
            self.advance();
        }

        let text = &self.source[start..self.position];
        classify(text, self.span_from(start)).map(|token| (token, self.span_from(start)))
    }
}

/// Classify a buffered word.
///
/// Tried in order: keyword, single delimiter, integer constant, identifier.
fn classify(text: &str, span: Span) -> Result<Token, CompileError> {
    if grammar::is_keyword(text) {
        return Ok(Token::keyword(text));
    }

    let mut chars = text.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if grammar::is_symbol(c) {
            return Ok(Token::symbol(c));
        }
    }

    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        return match text.parse::<u32>() {
            Ok(value) if value <= MAX_INT_CONST => Ok(Token::new(TokenKind::IntConst, text)),
            _ => Err(CompileError::new(
                ErrorCode::IntegerOutOfRange,
                format!("Integer constant {} is out of range", text),
                span,
            )
            .with_hint(format!("Integer constants must be between 0 and {}", MAX_INT_CONST))),
        };
    }

    if is_identifier(text) {
        return Ok(Token::identifier(text));
    }

    Err(CompileError::new(
        ErrorCode::InvalidToken,
        format!("Invalid token '{}'", text),
        span,
    ))
}

/// Check whether text is a well-formed identifier.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Tokenize source code into a vector of tokens with spans.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>, CompileError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    while let Some(token_span) = lexer.next_token()? {
        tokens.push(token_span);
    }

    Ok(tokens)
}
