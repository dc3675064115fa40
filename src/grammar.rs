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

//! Static grammar tables for the Jack language.
//!
//! The lexer uses the delimiter and keyword sets to split and classify
//! source text. The parser uses the predicates to decide which production
//! to enter next.

/// Single-character delimiters. Each one is always its own `Symbol` token.
pub const SYMBOLS: [char; 19] = [
    '{', '}', '(', ')', '[', ']', '.', ',', ';', '+', '-', '*', '/', '&', '|', '<', '>', '=', '~',
];

/// Reserved words.
pub const KEYWORDS: [&str; 21] = [
    "class",
    "constructor",
    "function",
    "method",
    "field",
    "static",
    "var",
    "int",
    "char",
    "boolean",
    "void",
    "true",
    "false",
    "null",
    "this",
    "let",
    "do",
    "if",
    "else",
    "while",
    "return",
];

/// Check whether a character is a delimiter.
pub fn is_symbol(c: char) -> bool {
    SYMBOLS.contains(&c)
}

/// Check whether a word is reserved.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Does this word open a class-level variable declaration?
pub fn is_class_var_dec(word: &str) -> bool {
    matches!(word, "static" | "field")
}

/// Does this word open a subroutine declaration?
pub fn is_subroutine_dec(word: &str) -> bool {
    matches!(word, "constructor" | "function" | "method")
}

/// Does this word open a statement?
pub fn is_statement(word: &str) -> bool {
    matches!(word, "let" | "if" | "while" | "do" | "return")
}

/// Is this a primitive type keyword?
pub fn is_primitive_type(word: &str) -> bool {
    matches!(word, "int" | "char" | "boolean")
}

/// Is this symbol a binary operator?
pub fn is_binary_op(symbol: &str) -> bool {
    matches!(symbol, "+" | "-" | "*" | "/" | "&" | "|" | "<" | ">" | "=")
}

/// Is this symbol a unary operator?
pub fn is_unary_op(symbol: &str) -> bool {
    matches!(symbol, "-" | "~")
}

/// Is this keyword a constant usable as a term?
pub fn is_keyword_constant(word: &str) -> bool {
    matches!(word, "true" | "false" | "null" | "this")
}
