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

//! Expression parsing.
//!
//! Jack has no operator precedence: `Term (op Term)*` is evaluated strictly
//! left to right, so each operator is emitted right after its right operand.
//! Subroutine calls decide between the three call forms by looking at the
//! token after the first identifier and at the symbol table.

use super::helpers::ParserHelpers;
use super::Parser;
use crate::codegen::{BinaryOp, Command, Emitter, Segment, UnaryOp};
use crate::error::{CompileError, ErrorCode, Span};
use crate::grammar;
use crate::lexer::TokenKind;
use crate::tree::Production;

/// Extension trait for expression parsing.
pub trait ExpressionParser {
    /// Parse `term (op term)*`.
    fn parse_expression(&mut self) -> Result<(), CompileError>;

    /// Parse a single term.
    fn parse_term(&mut self) -> Result<(), CompileError>;

    /// Parse the rest of a subroutine call whose first identifier was consumed.
    fn parse_subroutine_call(&mut self, name: &str) -> Result<(), CompileError>;

    /// Parse a comma-separated argument list and return the argument count.
    fn parse_expression_list(&mut self) -> Result<u16, CompileError>;

    /// Emit the run-time construction of a string constant.
    fn emit_string_constant(&mut self, text: &str, span: Span) -> Result<(), CompileError>;
}

impl<'a, E: Emitter> ExpressionParser for Parser<'a, E> {
    fn parse_expression(&mut self) -> Result<(), CompileError> {
        self.open(Production::Expression);
        self.parse_term()?;

        while self
            .peek()
            .is_some_and(|t| t.kind == TokenKind::Symbol && grammar::is_binary_op(&t.content))
        {
            let Some((token, span)) = self.advance() else {
                break;
            };
            let symbol = token.content.chars().next().unwrap_or_default();
            let op = BinaryOp::from_symbol(symbol, span)?;
            self.parse_term()?;
            self.emitter.emit(op.instruction());
        }

        self.close();
        Ok(())
    }

    fn parse_term(&mut self) -> Result<(), CompileError> {
        self.open(Production::Term);

        let Some((token, span)) = self.tokens.get(self.position).cloned() else {
            return Err(self.unexpected("Expected expression"));
        };

        match token.kind {
            TokenKind::IntConst => {
                self.advance();
                let value = token.content.parse::<u16>().map_err(|_| {
                    CompileError::new(
                        ErrorCode::IntegerOutOfRange,
                        format!("Integer constant '{}' is out of range", token.content),
                        span.clone(),
                    )
                })?;
                self.emitter.write_push(Segment::Constant, value);
            }
            TokenKind::StringConst => {
                self.advance();
                self.emit_string_constant(&token.content, span)?;
            }
            TokenKind::Keyword if grammar::is_keyword_constant(&token.content) => {
                self.advance();
                match token.content.as_str() {
                    "true" => {
                        self.emitter.write_push(Segment::Constant, 1);
                        self.emitter.write_arithmetic(Command::Neg);
                    }
                    "this" => self.emitter.write_push(Segment::Pointer, 0),
                    // false, null
                    _ => self.emitter.write_push(Segment::Constant, 0),
                }
            }
            TokenKind::Symbol if token.is_symbol('(') => {
                self.advance();
                self.parse_expression()?;
                self.expect_symbol(')', "Expected ')' after expression")?;
            }
            TokenKind::Symbol if grammar::is_unary_op(&token.content) => {
                self.advance();
                let symbol = token.content.chars().next().unwrap_or_default();
                let op = UnaryOp::from_symbol(symbol, span)?;
                self.parse_term()?;
                self.emitter.emit(op.instruction());
            }
            TokenKind::Identifier => {
                let next = self.peek_ahead(1);
                let is_call = next.is_some_and(|t| t.is_symbol('(') || t.is_symbol('.'));
                let is_index = next.is_some_and(|t| t.is_symbol('['));
                self.advance();

                if is_call {
                    self.parse_subroutine_call(&token.content)?;
                } else {
                    let variable = self.resolve(&token.content, span)?;
                    self.emitter.write_push(variable.segment(), variable.index);
                    if is_index {
                        self.expect_symbol('[', "Expected '['")?;
                        self.parse_expression()?;
                        self.expect_symbol(']', "Expected ']' after array index")?;
                        self.emitter.write_arithmetic(Command::Add);
                        self.emitter.write_pop(Segment::Pointer, 1);
                        self.emitter.write_push(Segment::That, 0);
                    }
                }
            }
            _ => return Err(self.unexpected("Expected expression")),
        }

        self.close();
        Ok(())
    }

    fn parse_subroutine_call(&mut self, name: &str) -> Result<(), CompileError> {
        let (target, receivers) = if self.match_symbol('.') {
            let (subroutine, _) = self.expect_identifier("Expected subroutine name after '.'")?;
            match self.symbols.lookup(name).cloned() {
                // obj.method(): the object is the implicit first argument
                Some(object) => {
                    self.emitter.write_push(object.segment(), object.index);
                    (format!("{}.{}", object.declared_type, subroutine), 1)
                }
                None => (format!("{}.{}", name, subroutine), 0),
            }
        } else if self.context.has_receiver() {
            self.emitter.write_push(Segment::Pointer, 0);
            (format!("{}.{}", self.context.class_name, name), 1)
        } else {
            (format!("{}.{}", self.context.class_name, name), 0)
        };

        self.expect_symbol('(', "Expected '(' in subroutine call")?;
        let n_args = self.parse_expression_list()?;
        let close = self.expect_symbol(')', "Expected ')' after arguments")?;

        let n_args = n_args
            .checked_add(receivers)
            .ok_or_else(|| self.too_many_arguments(close))?;
        self.emitter.write_call(&target, n_args);
        Ok(())
    }

    fn parse_expression_list(&mut self) -> Result<u16, CompileError> {
        self.open(Production::ExpressionList);
        let mut count = 0u16;
        if !self.check_symbol(')') {
            loop {
                self.parse_expression()?;
                count = match count.checked_add(1) {
                    Some(count) => count,
                    None => return Err(self.too_many_arguments(self.previous_span())),
                };
                if !self.match_symbol(',') {
                    break;
                }
            }
        }
        self.close();
        Ok(count)
    }

    fn emit_string_constant(&mut self, text: &str, span: Span) -> Result<(), CompileError> {
        let out_of_range = |what: String| {
            CompileError::new(ErrorCode::IntegerOutOfRange, what, span.clone())
        };

        let length = u16::try_from(text.chars().count())
            .map_err(|_| out_of_range("String constant is too long".to_string()))?;
        self.emitter.write_push(Segment::Constant, length);
        self.emitter.write_call("String.new", 1);

        for c in text.chars() {
            let code = u16::try_from(u32::from(c)).map_err(|_| {
                out_of_range(format!("Character '{}' has no 16-bit character code", c))
            })?;
            self.emitter.write_push(Segment::Constant, code);
            self.emitter.write_call("String.appendChar", 2);
        }
        Ok(())
    }
}
