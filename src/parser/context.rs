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

//! Compilation context tracking the class and subroutine being compiled.

use crate::codegen::LabelGenerator;
use std::fmt;

/// The three kinds of Jack subroutines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubroutineKind {
    Constructor,
    Function,
    Method,
}

impl SubroutineKind {
    /// Map a declaration keyword to its kind.
    pub fn from_keyword(word: &str) -> Option<SubroutineKind> {
        match word {
            "constructor" => Some(SubroutineKind::Constructor),
            "function" => Some(SubroutineKind::Function),
            "method" => Some(SubroutineKind::Method),
            _ => None,
        }
    }

    /// Whether `this` refers to an object inside subroutines of this kind.
    pub fn has_receiver(&self) -> bool {
        matches!(self, SubroutineKind::Constructor | SubroutineKind::Method)
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SubroutineKind::Constructor => "constructor",
            SubroutineKind::Function => "function",
            SubroutineKind::Method => "method",
        }
    }
}

impl fmt::Display for SubroutineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// State shared by all productions while one class is compiled.
#[derive(Debug, Default)]
pub struct CompilationContext {
    /// Name of the class being compiled.
    pub class_name: String,
    /// Name of the current subroutine, empty outside subroutines.
    pub subroutine_name: String,
    /// Kind of the current subroutine.
    pub subroutine_kind: Option<SubroutineKind>,
    /// Label source for the whole class.
    pub labels: LabelGenerator,
}

impl CompilationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a subroutine.
    pub fn enter_subroutine(&mut self, name: &str, kind: SubroutineKind) {
        self.subroutine_name = name.to_string();
        self.subroutine_kind = Some(kind);
    }

    /// The VM name of the current subroutine, `Class.sub`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.class_name, self.subroutine_name)
    }

    /// Whether the current subroutine has a receiver in `pointer 0`.
    pub fn has_receiver(&self) -> bool {
        self.subroutine_kind.is_some_and(|k| k.has_receiver())
    }

    /// Generate a unique label with the given prefix.
    pub fn make_label(&mut self, prefix: &str) -> String {
        self.labels.make_label(prefix)
    }
}
