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

//! Two-scope symbol table.
//!
//! Jack has exactly two nesting levels, so instead of a scope stack the table
//! keeps one class scope (statics and fields) and one subroutine scope
//! (arguments and locals). Lookups try the subroutine scope first.

use super::scope::Scope;
use super::symbol::{StorageKind, Symbol};
use crate::error::{CompileError, ErrorCode, Span};

/// Column layout of a dump row: name, kind, type, index.
fn render_row(symbol: &Symbol) -> String {
    format!(
        "{:>15} {:>8} {:>15} {:>4}\n",
        symbol.name,
        symbol.kind.name(),
        symbol.declared_type,
        symbol.index
    )
}

/// The symbol table for one compiled class.
#[derive(Debug, Default)]
pub struct SymbolTable {
    /// Statics and fields; lives for the whole class.
    class_scope: Scope,
    /// Arguments and locals; reset per subroutine.
    subroutine_scope: Scope,
}

impl SymbolTable {
    /// Create an empty symbol table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new subroutine: clears the subroutine scope and its counters.
    pub fn start_subroutine(&mut self) {
        self.subroutine_scope.clear();
    }

    /// Define a symbol in the scope implied by its kind.
    ///
    /// Redefining a name in the same scope silently replaces the old entry.
    /// Returns `None` when the kind has run out of indices.
    pub fn define(&mut self, name: &str, declared_type: &str, kind: StorageKind) -> Option<&Symbol> {
        if kind.is_class_scope() {
            self.class_scope.define(name, declared_type, kind)
        } else {
            self.subroutine_scope.define(name, declared_type, kind)
        }
    }

    /// Number of symbols defined so far for a kind.
    pub fn var_count(&self, kind: StorageKind) -> u16 {
        if kind.is_class_scope() {
            self.class_scope.count(kind)
        } else {
            self.subroutine_scope.count(kind)
        }
    }

    /// Look up a symbol, subroutine scope first.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.subroutine_scope
            .lookup(name)
            .or_else(|| self.class_scope.lookup(name))
    }

    /// Check whether a name is defined in either scope.
    pub fn has(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Resolve a name or fail with `UnknownSymbol`.
    pub fn resolve(&self, name: &str, span: Span) -> Result<&Symbol, CompileError> {
        self.lookup(name).ok_or_else(|| {
            CompileError::new(
                ErrorCode::UnknownSymbol,
                format!("Unknown symbol '{}'", name),
                span,
            )
            .with_hint("Declare it as a field, static, parameter, or local variable")
        })
    }

    /// The storage kind of a name.
    pub fn kind_of(&self, name: &str, span: Span) -> Result<StorageKind, CompileError> {
        self.resolve(name, span).map(|s| s.kind)
    }

    /// The declared type of a name.
    pub fn type_of(&self, name: &str, span: Span) -> Result<&str, CompileError> {
        self.resolve(name, span).map(|s| s.declared_type.as_str())
    }

    /// The running index of a name within its kind.
    pub fn index_of(&self, name: &str, span: Span) -> Result<u16, CompileError> {
        self.resolve(name, span).map(|s| s.index)
    }

    /// Render the class scope as dump rows.
    pub fn render_class_scope(&self) -> String {
        let mut output: String = self.class_scope.sorted().into_iter().map(render_row).collect();
        output.push('\n');
        output
    }

    /// Render the subroutine scope as dump rows.
    pub fn render_subroutine_scope(&self) -> String {
        let mut output: String = self
            .subroutine_scope
            .sorted()
            .into_iter()
            .map(render_row)
            .collect();
        output.push('\n');
        output
    }
}
