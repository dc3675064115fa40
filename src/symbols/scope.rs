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

//! A single scope: a name map plus one running counter per storage kind.

use super::symbol::{StorageKind, Symbol};
use std::collections::HashMap;

/// A scope in the symbol table.
#[derive(Debug, Default)]
pub struct Scope {
    /// Symbols defined in this scope.
    symbols: HashMap<String, Symbol>,
    /// Next index per storage kind.
    counters: HashMap<StorageKind, u16>,
}

impl Scope {
    /// Create a new empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a symbol with the next index of its kind.
    ///
    /// An existing entry of the same name is overwritten. Returns `None`
    /// once the count of the kind no longer fits a `u16`.
    pub fn define(&mut self, name: &str, declared_type: &str, kind: StorageKind) -> Option<&Symbol> {
        let counter = self.counters.entry(kind).or_insert(0);
        let index = *counter;
        *counter = counter.checked_add(1)?;

        let symbol = Symbol::new(name, declared_type, kind, index);
        self.symbols.insert(name.to_string(), symbol);
        self.symbols.get(name)
    }

    /// Look up a symbol in this scope.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Number of definitions made for a kind so far.
    pub fn count(&self, kind: StorageKind) -> u16 {
        self.counters.get(&kind).copied().unwrap_or(0)
    }

    /// Remove all symbols and reset every counter.
    pub fn clear(&mut self) {
        self.symbols.clear();
        self.counters.clear();
    }

    /// Symbols ordered by kind, then index.
    pub fn sorted(&self) -> Vec<&Symbol> {
        let mut symbols: Vec<_> = self.symbols.values().collect();
        symbols.sort_by(|a, b| (a.kind, a.index).cmp(&(b.kind, b.index)));
        symbols
    }

    /// Check if the scope is empty.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_assigns_running_index() {
        let mut scope = Scope::new();
        assert_eq!(scope.define("a", "int", StorageKind::Field).unwrap().index, 0);
        assert_eq!(scope.define("b", "int", StorageKind::Static).unwrap().index, 0);
        assert_eq!(scope.define("c", "int", StorageKind::Field).unwrap().index, 1);
        assert_eq!(scope.count(StorageKind::Field), 2);
        assert_eq!(scope.count(StorageKind::Static), 1);
        assert_eq!(scope.count(StorageKind::Var), 0);
    }

    #[test]
    fn test_redefinition_overwrites() {
        let mut scope = Scope::new();
        scope.define("x", "int", StorageKind::Var);
        scope.define("x", "boolean", StorageKind::Var);
        let symbol = scope.lookup("x").unwrap();
        assert_eq!(symbol.declared_type, "boolean");
        assert_eq!(symbol.index, 1);
        assert_eq!(scope.count(StorageKind::Var), 2);
    }

    #[test]
    fn test_define_stops_at_counter_limit() {
        let mut scope = Scope::new();
        scope.counters.insert(StorageKind::Var, u16::MAX - 1);
        assert_eq!(scope.define("last", "int", StorageKind::Var).unwrap().index, u16::MAX - 1);
        assert!(scope.define("overflow", "int", StorageKind::Var).is_none());
        assert!(scope.lookup("overflow").is_none());
        assert_eq!(scope.count(StorageKind::Var), u16::MAX);
        assert!(scope.define("other", "int", StorageKind::Arg).is_some());
    }

    #[test]
    fn test_clear() {
        let mut scope = Scope::new();
        scope.define("x", "int", StorageKind::Arg);
        scope.clear();
        assert!(scope.is_empty());
        assert_eq!(scope.count(StorageKind::Arg), 0);
    }

    #[test]
    fn test_sorted() {
        let mut scope = Scope::new();
        scope.define("z", "int", StorageKind::Var);
        scope.define("a", "int", StorageKind::Arg);
        scope.define("m", "int", StorageKind::Var);
        let names: Vec<_> = scope.sorted().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "z", "m"]);
    }
}
