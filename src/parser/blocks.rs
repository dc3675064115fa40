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

//! Class and subroutine declaration parsing.
//!
//! This module provides:
//! - The class production
//! - Static and field declarations
//! - Subroutine declarations, parameter lists, and bodies
//! - Local variable declarations
//!
//! Declarations only populate the symbol table. The first instructions of a
//! subroutine are emitted once all of its `var` declarations are known.

use super::context::SubroutineKind;
use super::helpers::ParserHelpers;
use super::statements::StatementParser;
use super::Parser;
use crate::codegen::{Emitter, Segment};
use crate::error::CompileError;
use crate::grammar;
use crate::lexer::{Token, TokenKind};
use crate::symbols::StorageKind;
use crate::tree::Production;

/// Extension trait for declaration parsing.
pub trait BlockParser {
    /// Parse `class Name { classVarDec* subroutineDec* }`.
    fn parse_class(&mut self) -> Result<(), CompileError>;

    /// Parse `('static' | 'field') type name (',' name)* ';'`.
    fn parse_class_var_dec(&mut self) -> Result<(), CompileError>;

    /// Parse a constructor, function, or method.
    fn parse_subroutine_dec(&mut self) -> Result<(), CompileError>;

    /// Parse `(type name (',' type name)*)?`.
    fn parse_parameter_list(&mut self) -> Result<(), CompileError>;

    /// Parse `{ varDec* statements }` and emit the subroutine entry.
    fn parse_subroutine_body(&mut self) -> Result<(), CompileError>;

    /// Parse `'var' type name (',' name)* ';'`.
    fn parse_var_dec(&mut self) -> Result<(), CompileError>;
}

fn is_keyword_where(token: Option<&Token>, predicate: fn(&str) -> bool) -> bool {
    token.is_some_and(|t| t.kind == TokenKind::Keyword && predicate(&t.content))
}

impl<'a, E: Emitter> BlockParser for Parser<'a, E> {
    fn parse_class(&mut self) -> Result<(), CompileError> {
        self.open(Production::Class);
        self.expect_keyword("class", "Expected 'class'")?;
        let (name, _) = self.expect_identifier("Expected class name after 'class'")?;
        self.context.class_name = name;
        self.expect_symbol('{', "Expected '{' after class name")?;

        let mut has_class_vars = false;
        while is_keyword_where(self.peek(), grammar::is_class_var_dec) {
            self.parse_class_var_dec()?;
            has_class_vars = true;
        }
        if has_class_vars {
            self.dump_class_table();
        }

        while is_keyword_where(self.peek(), grammar::is_subroutine_dec) {
            self.parse_subroutine_dec()?;
        }

        self.expect_symbol('}', "Expected subroutine declaration or '}'")?;
        self.close();
        Ok(())
    }

    fn parse_class_var_dec(&mut self) -> Result<(), CompileError> {
        self.open(Production::ClassVarDec);
        let kind = match self.peek().and_then(|t| StorageKind::from_keyword(&t.content)) {
            Some(kind) if kind.is_class_scope() => kind,
            _ => return Err(self.unexpected("Expected 'static' or 'field'")),
        };
        self.advance();

        let declared_type = self.expect_type(false, "Expected variable type")?;
        loop {
            let (name, span) = self.expect_identifier("Expected variable name")?;
            self.declare(&name, &declared_type, kind, span)?;
            if !self.match_symbol(',') {
                break;
            }
        }
        self.expect_symbol(';', "Expected ';' after variable declaration")?;
        self.close();
        Ok(())
    }

    fn parse_subroutine_dec(&mut self) -> Result<(), CompileError> {
        self.open(Production::SubroutineDec);
        let kind = match self.peek().and_then(|t| SubroutineKind::from_keyword(&t.content)) {
            Some(kind) => kind,
            None => return Err(self.unexpected("Expected 'constructor', 'function' or 'method'")),
        };
        self.advance();

        self.symbols.start_subroutine();
        self.expect_type(true, "Expected return type")?;
        let (name, _) = self.expect_identifier("Expected subroutine name")?;
        self.context.enter_subroutine(&name, kind);

        if kind == SubroutineKind::Method {
            let class_name = self.context.class_name.clone();
            let span = self.previous_span();
            self.declare("this", &class_name, StorageKind::Arg, span)?;
        }

        self.expect_symbol('(', "Expected '(' after subroutine name")?;
        self.parse_parameter_list()?;
        self.expect_symbol(')', "Expected ')' after parameter list")?;
        self.parse_subroutine_body()?;

        self.dump_subroutine_table();
        self.close();
        Ok(())
    }

    fn parse_parameter_list(&mut self) -> Result<(), CompileError> {
        self.open(Production::ParameterList);
        if !self.check_symbol(')') {
            loop {
                let declared_type = self.expect_type(false, "Expected parameter type")?;
                let (name, span) = self.expect_identifier("Expected parameter name")?;
                self.declare(&name, &declared_type, StorageKind::Arg, span)?;
                if !self.match_symbol(',') {
                    break;
                }
            }
        }
        self.close();
        Ok(())
    }

    fn parse_subroutine_body(&mut self) -> Result<(), CompileError> {
        self.open(Production::SubroutineBody);
        self.expect_symbol('{', "Expected '{' to open subroutine body")?;
        while self.check_keyword("var") {
            self.parse_var_dec()?;
        }

        let n_locals = self.symbols.var_count(StorageKind::Var);
        self.emitter
            .write_function(&self.context.qualified_name(), n_locals);

        match self.context.subroutine_kind {
            Some(SubroutineKind::Method) => {
                self.emitter.write_push(Segment::Argument, 0);
                self.emitter.write_pop(Segment::Pointer, 0);
            }
            Some(SubroutineKind::Constructor) => {
                let n_fields = self.symbols.var_count(StorageKind::Field);
                self.emitter.write_push(Segment::Constant, n_fields);
                self.emitter.write_call("Memory.alloc", 1);
                self.emitter.write_pop(Segment::Pointer, 0);
            }
            Some(SubroutineKind::Function) | None => {}
        }

        self.parse_statements()?;
        self.expect_symbol('}', "Expected statement or '}'")?;
        self.close();
        Ok(())
    }

    fn parse_var_dec(&mut self) -> Result<(), CompileError> {
        self.open(Production::VarDec);
        self.expect_keyword("var", "Expected 'var'")?;
        let declared_type = self.expect_type(false, "Expected variable type")?;
        loop {
            let (name, span) = self.expect_identifier("Expected variable name")?;
            self.declare(&name, &declared_type, StorageKind::Var, span)?;
            if !self.match_symbol(',') {
                break;
            }
        }
        self.expect_symbol(';', "Expected ';' after variable declaration")?;
        self.close();
        Ok(())
    }
}
