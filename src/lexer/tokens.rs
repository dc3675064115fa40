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

//! Token definitions for the Jack language.

use std::fmt;

/// The lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A reserved word such as `class` or `while`.
    Keyword,
    /// A single delimiter character.
    Symbol,
    /// A class, subroutine, or variable name.
    Identifier,
    /// A decimal integer constant in `0..=32767`.
    IntConst,
    /// The text between a pair of double quotes.
    StringConst,
}

impl TokenKind {
    /// The tag used for this kind in the XML listings.
    pub fn tag(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Symbol => "symbol",
            TokenKind::Identifier => "identifier",
            TokenKind::IntConst => "integerConstant",
            TokenKind::StringConst => "stringConstant",
        }
    }

    /// Look up a kind by its XML tag.
    pub fn from_tag(tag: &str) -> Option<TokenKind> {
        match tag {
            "keyword" => Some(TokenKind::Keyword),
            "symbol" => Some(TokenKind::Symbol),
            "identifier" => Some(TokenKind::Identifier),
            "integerConstant" => Some(TokenKind::IntConst),
            "stringConstant" => Some(TokenKind::StringConst),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A classified token. Immutable once the lexer produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The lexical class.
    pub kind: TokenKind,
    /// The token text. String constants exclude their quotes.
    pub content: String,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    /// Create a keyword token.
    pub fn keyword(word: &str) -> Self {
        Self::new(TokenKind::Keyword, word)
    }

    /// Create a symbol token.
    pub fn symbol(c: char) -> Self {
        Self::new(TokenKind::Symbol, c.to_string())
    }

    /// Create an identifier token.
    pub fn identifier(name: &str) -> Self {
        Self::new(TokenKind::Identifier, name)
    }

    /// Create an integer constant token.
    pub fn int_const(value: u16) -> Self {
        Self::new(TokenKind::IntConst, value.to_string())
    }

    /// Create a string constant token.
    pub fn string_const(text: &str) -> Self {
        Self::new(TokenKind::StringConst, text)
    }

    /// Check if this token is the given keyword.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.content == word
    }

    /// Check if this token is the given symbol.
    pub fn is_symbol(&self, c: char) -> bool {
        self.kind == TokenKind::Symbol && self.content.len() == 1 && self.content.starts_with(c)
    }

    /// Check if this token is an identifier.
    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    /// Render the token as one XML listing line, e.g. `<symbol> &lt; </symbol>`.
    pub fn to_xml(&self) -> String {
        let tag = self.kind.tag();
        format!("<{}> {} </{}>", tag, super::xml::escape(&self.content), tag)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Keyword => write!(f, "keyword '{}'", self.content),
            TokenKind::Symbol => write!(f, "'{}'", self.content),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.content),
            TokenKind::IntConst => write!(f, "integer constant {}", self.content),
            TokenKind::StringConst => write!(f, "string constant \"{}\"", self.content),
        }
    }
}
