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

//! Symbol tables mapping identifiers to storage locations.
//!
//! # Module Structure
//!
//! - `symbol` - Symbol entries and storage kinds
//! - `scope` - A name map with per-kind counters
//! - `symbol_table` - The class and subroutine scopes together

mod scope;
mod symbol;
mod symbol_table;

pub use scope::Scope;
pub use symbol::{StorageKind, Symbol};
pub use symbol_table::SymbolTable;
