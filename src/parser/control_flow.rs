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

//! Control flow statement parsing for the parser.
//!
//! This module provides control flow statement parsing:
//! - If/else statements
//! - While loops
//! - Return statements

use super::expressions::ExpressionParser;
use super::helpers::ParserHelpers;
use super::statements::StatementParser;
use super::Parser;
use crate::codegen::labels::{IF_END, IF_FALSE, WHILE_END, WHILE_EXP};
use crate::codegen::{Command, Emitter};
use crate::error::CompileError;
use crate::tree::Production;

/// Extension trait for control flow parsing.
pub trait ControlFlowParser {
    /// Parse an if statement.
    fn parse_if_statement(&mut self) -> Result<(), CompileError>;

    /// Parse a while statement.
    fn parse_while_statement(&mut self) -> Result<(), CompileError>;

    /// Parse a return statement.
    fn parse_return_statement(&mut self) -> Result<(), CompileError>;

    /// Parse `{ statements }`.
    fn parse_braced_statements(&mut self, construct: &str) -> Result<(), CompileError>;
}

impl<'a, E: Emitter> ControlFlowParser for Parser<'a, E> {
    fn parse_if_statement(&mut self) -> Result<(), CompileError> {
        self.open(Production::IfStatement);
        self.expect_keyword("if", "Expected 'if'")?;
        self.expect_symbol('(', "Expected '(' after 'if'")?;
        self.parse_expression()?;
        self.expect_symbol(')', "Expected ')' after condition")?;

        let false_label = self.context.make_label(IF_FALSE);
        let end_label = self.context.make_label(IF_END);

        self.emitter.write_arithmetic(Command::Not);
        self.emitter.write_if(&false_label);
        self.parse_braced_statements("if")?;
        self.emitter.write_goto(&end_label);
        self.emitter.write_label(&false_label);

        if self.check_keyword("else") {
            self.advance();
            self.parse_braced_statements("else")?;
        }

        self.emitter.write_label(&end_label);
        self.close();
        Ok(())
    }

    fn parse_while_statement(&mut self) -> Result<(), CompileError> {
        self.open(Production::WhileStatement);
        self.expect_keyword("while", "Expected 'while'")?;

        let exp_label = self.context.make_label(WHILE_EXP);
        let end_label = self.context.make_label(WHILE_END);

        self.emitter.write_label(&exp_label);
        self.expect_symbol('(', "Expected '(' after 'while'")?;
        self.parse_expression()?;
        self.expect_symbol(')', "Expected ')' after condition")?;
        self.emitter.write_arithmetic(Command::Not);
        self.emitter.write_if(&end_label);

        self.parse_braced_statements("while")?;
        self.emitter.write_goto(&exp_label);
        self.emitter.write_label(&end_label);
        self.close();
        Ok(())
    }

    fn parse_return_statement(&mut self) -> Result<(), CompileError> {
        self.open(Production::ReturnStatement);
        self.expect_keyword("return", "Expected 'return'")?;
        if !self.check_symbol(';') {
            self.parse_expression()?;
        }
        self.expect_symbol(';', "Expected ';' after return statement")?;
        self.emitter.write_return();
        self.close();
        Ok(())
    }

    fn parse_braced_statements(&mut self, construct: &str) -> Result<(), CompileError> {
        self.expect_symbol('{', &format!("Expected '{{' to open '{}' body", construct))?;
        self.parse_statements()?;
        self.expect_symbol('}', &format!("Expected statement or '}}' to close '{}' body", construct))?;
        Ok(())
    }
}
