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

//! Label generation for control flow.
//!
//! VM labels are resolved by the VM translator, so the compiler only has to
//! keep them unique within a class. A single counter is bumped for every
//! label issued.

/// Label prefix for the else branch of an `if`.
pub const IF_FALSE: &str = "IF_FALSE";
/// Label prefix for the join point after an `if`.
pub const IF_END: &str = "IF_END";
/// Label prefix for the condition of a `while`.
pub const WHILE_EXP: &str = "WHILE_EXP";
/// Label prefix for the exit of a `while`.
pub const WHILE_END: &str = "WHILE_END";

/// Issues unique labels.
#[derive(Debug, Default, Clone)]
pub struct LabelGenerator {
    counter: u32,
}

impl LabelGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a unique label with the given prefix.
    pub fn make_label(&mut self, prefix: &str) -> String {
        let label = format!("{}_{}", prefix, self.counter);
        self.counter += 1;
        label
    }

    /// Number of labels issued so far.
    pub fn issued(&self) -> u32 {
        self.counter
    }
}
