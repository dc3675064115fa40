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

//! Symbol table entries and storage kinds.

use crate::codegen::Segment;
use std::fmt;

/// Where a variable lives, which also decides its scope and index counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKind {
    /// Class-level variable shared by all instances.
    Static,
    /// Per-instance variable.
    Field,
    /// Subroutine parameter (including the implicit `this` of methods).
    Arg,
    /// Subroutine local variable.
    Var,
}

impl StorageKind {
    /// All kinds, in table order.
    pub const ALL: [StorageKind; 4] = [
        StorageKind::Static,
        StorageKind::Field,
        StorageKind::Arg,
        StorageKind::Var,
    ];

    /// Whether symbols of this kind live in the class scope.
    pub fn is_class_scope(&self) -> bool {
        matches!(self, StorageKind::Static | StorageKind::Field)
    }

    /// The VM segment holding variables of this kind.
    pub fn segment(&self) -> Segment {
        match self {
            StorageKind::Static => Segment::Static,
            StorageKind::Field => Segment::This,
            StorageKind::Arg => Segment::Argument,
            StorageKind::Var => Segment::Local,
        }
    }

    /// Map a declaration keyword (`static`, `field`, `var`) to its kind.
    pub fn from_keyword(word: &str) -> Option<StorageKind> {
        match word {
            "static" => Some(StorageKind::Static),
            "field" => Some(StorageKind::Field),
            "var" => Some(StorageKind::Var),
            _ => None,
        }
    }

    /// Short name used in symbol table dumps.
    pub fn name(&self) -> &'static str {
        match self {
            StorageKind::Static => "static",
            StorageKind::Field => "field",
            StorageKind::Arg => "arg",
            StorageKind::Var => "var",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Symbol table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// The symbol name.
    pub name: String,
    /// The declared type: `int`, `char`, `boolean`, or a class name.
    pub declared_type: String,
    /// The storage kind.
    pub kind: StorageKind,
    /// Running index within the kind.
    pub index: u16,
}

impl Symbol {
    /// Create a new symbol.
    pub fn new(name: &str, declared_type: &str, kind: StorageKind, index: u16) -> Self {
        Self {
            name: name.to_string(),
            declared_type: declared_type.to_string(),
            kind,
            index,
        }
    }

    /// The VM segment this symbol is addressed through.
    pub fn segment(&self) -> Segment {
        self.kind.segment()
    }
}
