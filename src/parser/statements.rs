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

//! Statement parsing.
//!
//! `let` and `do` are handled here; `if`, `while`, and `return` live in
//! `control_flow`.

use super::control_flow::ControlFlowParser;
use super::expressions::ExpressionParser;
use super::helpers::ParserHelpers;
use super::Parser;
use crate::codegen::{Command, Emitter, Segment};
use crate::error::CompileError;
use crate::grammar;
use crate::lexer::TokenKind;
use crate::tree::Production;

/// Extension trait for statement parsing.
pub trait StatementParser {
    /// Parse a possibly empty sequence of statements.
    fn parse_statements(&mut self) -> Result<(), CompileError>;

    /// Parse a single statement, dispatching on its keyword.
    fn parse_statement(&mut self) -> Result<(), CompileError>;

    /// Parse `let name ([index])? = expression;`.
    fn parse_let_statement(&mut self) -> Result<(), CompileError>;

    /// Parse `do subroutineCall;`.
    fn parse_do_statement(&mut self) -> Result<(), CompileError>;
}

impl<'a, E: Emitter> StatementParser for Parser<'a, E> {
    fn parse_statements(&mut self) -> Result<(), CompileError> {
        self.open(Production::Statements);
        while self
            .peek()
            .is_some_and(|t| t.kind == TokenKind::Keyword && grammar::is_statement(&t.content))
        {
            self.parse_statement()?;
        }
        self.close();
        Ok(())
    }

    fn parse_statement(&mut self) -> Result<(), CompileError> {
        let keyword = self.peek().map(|t| t.content.clone()).unwrap_or_default();
        match keyword.as_str() {
            "let" => self.parse_let_statement(),
            "if" => self.parse_if_statement(),
            "while" => self.parse_while_statement(),
            "do" => self.parse_do_statement(),
            "return" => self.parse_return_statement(),
            _ => Err(self.unexpected("Expected statement")),
        }
    }

    fn parse_let_statement(&mut self) -> Result<(), CompileError> {
        self.open(Production::LetStatement);
        self.expect_keyword("let", "Expected 'let'")?;
        let (name, span) = self.expect_identifier("Expected variable name after 'let'")?;
        let target = self.resolve(&name, span)?;

        if self.match_symbol('[') {
            self.emitter.write_push(target.segment(), target.index);
            self.parse_expression()?;
            self.expect_symbol(']', "Expected ']' after array index")?;
            self.emitter.write_arithmetic(Command::Add);

            self.expect_symbol('=', "Expected '=' in let statement")?;
            self.parse_expression()?;

            // The value is parked in temp 0 while `that` is retargeted.
            self.emitter.write_pop(Segment::Temp, 0);
            self.emitter.write_pop(Segment::Pointer, 1);
            self.emitter.write_push(Segment::Temp, 0);
            self.emitter.write_pop(Segment::That, 0);
        } else {
            self.expect_symbol('=', "Expected '=' in let statement")?;
            self.parse_expression()?;
            self.emitter.write_pop(target.segment(), target.index);
        }

        self.expect_symbol(';', "Expected ';' after let statement")?;
        self.close();
        Ok(())
    }

    fn parse_do_statement(&mut self) -> Result<(), CompileError> {
        self.open(Production::DoStatement);
        self.expect_keyword("do", "Expected 'do'")?;
        let (name, _) = self.expect_identifier("Expected subroutine call after 'do'")?;
        self.parse_subroutine_call(&name)?;
        self.expect_symbol(';', "Expected ';' after do statement")?;
        self.emitter.write_pop(Segment::Temp, 0);
        self.close();
        Ok(())
    }
}
