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

//! Parser helper methods for token stream navigation and error handling.
//!
//! This module provides utility methods for the parser including:
//! - Token stream navigation (peek, advance, check)
//! - Token matching and expectation
//! - Parse tree bookkeeping
//! - Error creation

use super::Parser;
use crate::codegen::Emitter;
use crate::error::{CompileError, ErrorCode, Span};
use crate::grammar;
use crate::lexer::{Token, TokenKind};
use crate::symbols::{StorageKind, Symbol};
use crate::tree::Production;

/// Trait for parser helper operations.
pub trait ParserHelpers {
    /// Check if we've reached the end of the token stream.
    fn is_at_end(&self) -> bool;

    /// Peek at the current token without advancing.
    fn peek(&self) -> Option<&Token>;

    /// Peek at the current token's span.
    fn peek_span(&self) -> Option<Span>;

    /// Peek at a token ahead by n positions.
    fn peek_ahead(&self, n: usize) -> Option<&Token>;

    /// Get the previous token's span (for error reporting).
    fn previous_span(&self) -> Span;

    /// Advance to the next token and return the current one.
    ///
    /// The consumed token is recorded as a leaf of the open production.
    fn advance(&mut self) -> Option<(Token, Span)>;

    /// Check if the current token is the given keyword.
    fn check_keyword(&self, word: &str) -> bool;

    /// Check if the current token is the given symbol.
    fn check_symbol(&self, symbol: char) -> bool;

    /// Consume the current token if it is the given symbol.
    fn match_symbol(&mut self, symbol: char) -> bool;

    /// Expect the given keyword, or return an error.
    fn expect_keyword(&mut self, word: &str, message: &str) -> Result<Span, CompileError>;

    /// Expect the given symbol, or return an error.
    fn expect_symbol(&mut self, symbol: char, message: &str) -> Result<Span, CompileError>;

    /// Expect an identifier and return its name.
    fn expect_identifier(&mut self, message: &str) -> Result<(String, Span), CompileError>;

    /// Expect a type: `int`, `char`, `boolean`, a class name, and `void` if allowed.
    fn expect_type(&mut self, allow_void: bool, message: &str) -> Result<String, CompileError>;

    /// Define a variable, or fail once its kind has run out of indices.
    fn declare(
        &mut self,
        name: &str,
        declared_type: &str,
        kind: StorageKind,
        span: Span,
    ) -> Result<(), CompileError>;

    /// Resolve a variable through the symbol table.
    fn resolve(&self, name: &str, span: Span) -> Result<Symbol, CompileError>;

    /// Create an error at the current position.
    fn error(&self, code: ErrorCode, message: impl Into<String>) -> CompileError;

    /// Create an error describing what was found instead of what was expected.
    fn unexpected(&self, message: &str) -> CompileError;

    /// Create the error for a call whose argument count does not fit a `u16`.
    fn too_many_arguments(&self, span: Span) -> CompileError;

    /// Open a production in the parse tree, if one is recorded.
    fn open(&mut self, production: Production);

    /// Close the innermost production in the parse tree.
    fn close(&mut self);
}

impl<'a, E: Emitter> ParserHelpers for Parser<'a, E> {
    fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position).map(|(t, _)| t)
    }

    fn peek_span(&self) -> Option<Span> {
        self.tokens.get(self.position).map(|(_, s)| s.clone())
    }

    fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n).map(|(t, _)| t)
    }

    fn previous_span(&self) -> Span {
        if self.position > 0 {
            self.tokens[self.position - 1].1.clone()
        } else if let Some((_, span)) = self.tokens.first() {
            span.clone()
        } else {
            Span::new(0, 0)
        }
    }

    fn advance(&mut self) -> Option<(Token, Span)> {
        let result = self.tokens.get(self.position)?.clone();
        self.position += 1;
        if let Some(tree) = self.tree.as_mut() {
            tree.leaf(result.0.clone());
        }
        Some(result)
    }

    fn check_keyword(&self, word: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(word))
    }

    fn check_symbol(&self, symbol: char) -> bool {
        self.peek().is_some_and(|t| t.is_symbol(symbol))
    }

    fn match_symbol(&mut self, symbol: char) -> bool {
        if self.check_symbol(symbol) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, word: &str, message: &str) -> Result<Span, CompileError> {
        if self.check_keyword(word) {
            if let Some((_, span)) = self.advance() {
                return Ok(span);
            }
        }
        Err(self.unexpected(message))
    }

    fn expect_symbol(&mut self, symbol: char, message: &str) -> Result<Span, CompileError> {
        if self.check_symbol(symbol) {
            if let Some((_, span)) = self.advance() {
                return Ok(span);
            }
        }
        Err(self.unexpected(message))
    }

    fn expect_identifier(&mut self, message: &str) -> Result<(String, Span), CompileError> {
        if self.peek().is_some_and(Token::is_identifier) {
            if let Some((token, span)) = self.advance() {
                return Ok((token.content, span));
            }
        }
        Err(self.unexpected(message))
    }

    fn expect_type(&mut self, allow_void: bool, message: &str) -> Result<String, CompileError> {
        let accepted = self.peek().is_some_and(|t| match t.kind {
            TokenKind::Identifier => true,
            TokenKind::Keyword => {
                grammar::is_primitive_type(&t.content) || (allow_void && t.content == "void")
            }
            _ => false,
        });
        if accepted {
            if let Some((token, _)) = self.advance() {
                return Ok(token.content);
            }
        }
        Err(self.unexpected(message))
    }

    fn declare(
        &mut self,
        name: &str,
        declared_type: &str,
        kind: StorageKind,
        span: Span,
    ) -> Result<(), CompileError> {
        if self.symbols.define(name, declared_type, kind).is_some() {
            return Ok(());
        }
        Err(CompileError::new(
            ErrorCode::IntegerOutOfRange,
            format!("Too many '{}' variables, '{}' does not get an index", kind, name),
            span,
        )
        .with_hint(format!("At most {} '{}' variables fit in one scope", u16::MAX, kind))
        .at_token(self.position.saturating_sub(1)))
    }

    fn resolve(&self, name: &str, span: Span) -> Result<Symbol, CompileError> {
        let index = self.position.saturating_sub(1);
        self.symbols
            .resolve(name, span)
            .cloned()
            .map_err(|e| e.at_token(index))
    }

    fn error(&self, code: ErrorCode, message: impl Into<String>) -> CompileError {
        let span = self.peek_span().unwrap_or_else(|| self.previous_span());
        CompileError::new(code, message, span).at_token(self.position)
    }

    fn unexpected(&self, message: &str) -> CompileError {
        match self.peek() {
            Some(found) => self.error(
                ErrorCode::UnexpectedToken,
                format!("{}, found {}", message, found),
            ),
            None => self.error(
                ErrorCode::UnexpectedEndOfFile,
                format!("{}, found end of file", message),
            ),
        }
    }

    fn too_many_arguments(&self, span: Span) -> CompileError {
        CompileError::new(
            ErrorCode::IntegerOutOfRange,
            "Too many arguments in subroutine call",
            span,
        )
        .with_hint(format!("A call passes at most {} arguments", u16::MAX))
        .at_token(self.position.saturating_sub(1))
    }

    fn open(&mut self, production: Production) {
        if let Some(tree) = self.tree.as_mut() {
            tree.open(production);
        }
    }

    fn close(&mut self) {
        if let Some(tree) = self.tree.as_mut() {
            tree.close();
        }
    }
}
