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

//! Error types for the jackc compiler.
//!
//! Every fault aborts the compiling unit. Errors fall into four categories:
//! lexical, syntax, symbol resolution, and internal. Internal errors point at
//! a mismatch inside the compiler itself rather than at the user's source.

use std::ops::Range;
use thiserror::Error;

/// A source span representing a range in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Get the length of this span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merge two spans into one that covers both.
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// The broad class an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The source text could not be split into valid tokens.
    Lex,
    /// The token sequence does not match the grammar.
    Parse,
    /// An identifier could not be resolved.
    Symbol,
    /// The compiler reached a state its own tables do not cover.
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorCategory::Lex => "lexical error",
            ErrorCategory::Parse => "syntax error",
            ErrorCategory::Symbol => "symbol error",
            ErrorCategory::Internal => "internal compiler error",
        };
        f.write_str(name)
    }
}

/// Error codes for the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Lexical errors (E001-E009)
    InvalidToken,
    IntegerOutOfRange,
    UnterminatedString,
    UnterminatedComment,

    // Syntax errors (E100-E109)
    UnexpectedToken,
    UnexpectedEndOfFile,

    // Semantic errors (E200-E209)
    UnknownSymbol,

    // Internal errors (E900-E909)
    UnmappedOperator,
    UnmappedSegment,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ErrorCode {
    /// Get the numeric code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidToken => "E001",
            ErrorCode::IntegerOutOfRange => "E002",
            ErrorCode::UnterminatedString => "E003",
            ErrorCode::UnterminatedComment => "E004",

            ErrorCode::UnexpectedToken => "E100",
            ErrorCode::UnexpectedEndOfFile => "E101",

            ErrorCode::UnknownSymbol => "E200",

            ErrorCode::UnmappedOperator => "E900",
            ErrorCode::UnmappedSegment => "E901",
        }
    }

    /// Get the category this code belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::InvalidToken
            | ErrorCode::IntegerOutOfRange
            | ErrorCode::UnterminatedString
            | ErrorCode::UnterminatedComment => ErrorCategory::Lex,
            ErrorCode::UnexpectedToken | ErrorCode::UnexpectedEndOfFile => ErrorCategory::Parse,
            ErrorCode::UnknownSymbol => ErrorCategory::Symbol,
            ErrorCode::UnmappedOperator | ErrorCode::UnmappedSegment => ErrorCategory::Internal,
        }
    }
}

/// A compiler error with source location.
#[derive(Debug, Error)]
#[error("[{code}] {message}")]
pub struct CompileError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// The source span where the error occurred.
    pub span: Span,
    /// Index of the token the parser stopped at, if the error came from parsing.
    pub token_index: Option<usize>,
    /// Optional hint for fixing the error.
    pub hint: Option<String>,
}

impl CompileError {
    /// Create a new compile error.
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            token_index: None,
            hint: None,
        }
    }

    /// Add a hint to this error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Record the token index the error was raised at.
    pub fn at_token(mut self, index: usize) -> Self {
        self.token_index = Some(index);
        self
    }

    /// Get the error code string.
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    /// Whether this error signals a bug in the compiler rather than in the source.
    pub fn is_internal(&self) -> bool {
        self.category() == ErrorCategory::Internal
    }
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Source location with line and column information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// The content of the line.
    pub line_content: String,
}

impl SourceLocation {
    /// Calculate line and column from a byte offset in source code.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &source[..offset];

        let line = before.chars().filter(|&c| c == '\n').count() + 1;

        let last_newline = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[last_newline..].chars().count() + 1;

        let line_end = source[offset..]
            .find('\n')
            .map(|i| offset + i)
            .unwrap_or(source.len());
        let line_content = source[last_newline..line_end].trim_end_matches('\r').to_string();

        Self {
            line,
            column,
            line_content,
        }
    }
}

/// Format an error with source context.
pub fn format_error(error: &CompileError, source: &str, filename: Option<&str>) -> String {
    let loc = SourceLocation::from_offset(source, error.span.start);
    let filename = filename.unwrap_or("<input>");

    let mut output = String::new();

    if error.is_internal() {
        output.push_str(&format!(
            "{}[{}]: {}\n",
            error.category(),
            error.code_str(),
            error.message
        ));
    } else {
        output.push_str(&format!("error[{}]: {}\n", error.code_str(), error.message));
    }

    output.push_str(&format!("  --> {}:{}:{}\n", filename, loc.line, loc.column));

    let line_num_width = loc.line.to_string().len();
    output.push_str(&format!("{:>width$} |\n", "", width = line_num_width));
    output.push_str(&format!(
        "{:>width$} | {}\n",
        loc.line,
        loc.line_content,
        width = line_num_width
    ));

    let underline_start = loc.column - 1;
    let underline_len = error
        .span
        .len()
        .max(1)
        .min(loc.line_content.len().saturating_sub(underline_start).max(1));
    output.push_str(&format!(
        "{:>width$} | {:>start$}{}\n",
        "",
        "",
        "^".repeat(underline_len),
        width = line_num_width,
        start = underline_start
    ));

    if let Some(index) = error.token_index {
        output.push_str(&format!(
            "{:>width$} = note: at token #{}\n",
            "",
            index,
            width = line_num_width
        ));
    }

    if let Some(hint) = &error.hint {
        output.push_str(&format!(
            "{:>width$} = hint: {}\n",
            "",
            hint,
            width = line_num_width
        ));
    }

    output
}
