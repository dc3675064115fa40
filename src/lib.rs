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

//! jackc Compiler Library
//!
//! This library compiles Jack classes into Hack VM code in a single pass:
//! tokens are parsed by recursive descent and every production emits its
//! instructions as soon as it is recognized.
//!
//! # Modules
//!
//! - [`error`] - Error types and error reporting
//! - [`grammar`] - Reserved words, delimiters, and grammar predicates
//! - [`lexer`] - Tokenization of source code
//! - [`symbols`] - Class and subroutine symbol tables
//! - [`parser`] - Parsing and code generation
//! - [`codegen`] - VM instructions and emitters
//! - [`tree`] - Optional concrete parse tree
//! - [`output`] - Output file naming and writing
//! - [`watch`] - Recompiling on source changes
//!
//! # Example
//!
//! ```no_run
//! use jackc::{codegen, lexer, parser};
//!
//! fn compile(source: &str) -> Result<String, Box<dyn std::error::Error>> {
//!     // Tokenize
//!     let tokens = lexer::tokenize(source)?;
//!
//!     // Parse and generate code
//!     let writer = parser::parse(&tokens, codegen::VmWriter::new())?;
//!
//!     Ok(writer.to_text())
//! }
//! ```

pub mod codegen;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod symbols;
pub mod tree;
pub mod watch;

// Re-export commonly used types
pub use codegen::{Emitter, Instruction, VmWriter};
pub use error::{format_error, CompileError, ErrorCode, Result, SourceLocation, Span};
pub use lexer::Token;
pub use tree::ParseTree;

/// The version of the jackc compiler.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the compiler.
pub const NAME: &str = "jackc";

/// Optional by-products of a compilation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Record the concrete parse tree.
    pub parse_tree: bool,
    /// Record the symbol table dump.
    pub symbol_dump: bool,
}

/// The result of compiling one class.
#[derive(Debug)]
pub struct CompileOutput {
    /// The tokens the source was split into.
    pub tokens: Vec<(Token, Span)>,
    /// The generated VM code.
    pub instructions: Vec<Instruction>,
    /// The parse tree, if requested.
    pub parse_tree: Option<ParseTree>,
    /// The symbol table dump, if requested.
    pub symbol_dump: Option<String>,
}

impl CompileOutput {
    /// The generated code as VM text.
    pub fn vm_text(&self) -> String {
        codegen::render(&self.instructions)
    }

    /// The token listing as XML.
    pub fn tokens_xml(&self) -> String {
        lexer::xml::render_tokens_xml(&self.tokens)
    }
}

/// Compile one Jack class into VM instructions.
///
/// This is the main entry point. On error no partial code is returned.
///
/// # Example
///
/// ```
/// let code = jackc::compile("class A { function void f() { return; } }").unwrap();
/// assert_eq!(code.len(), 2);
/// ```
pub fn compile(source: &str) -> std::result::Result<Vec<Instruction>, CompileError> {
    // Tokenize
    let tokens = lexer::tokenize(source)?;

    // Parse and generate code
    let writer = parser::parse(&tokens, VmWriter::new())?;

    Ok(writer.into_instructions())
}

/// Compile one Jack class into VM text, one instruction per line.
pub fn compile_to_vm(source: &str) -> std::result::Result<String, CompileError> {
    compile(source).map(|instructions| codegen::render(&instructions))
}

/// Compile one Jack class, collecting the requested by-products.
pub fn compile_with_options(
    source: &str,
    options: &CompileOptions,
) -> std::result::Result<CompileOutput, CompileError> {
    let tokens = lexer::tokenize(source)?;

    let mut parser = parser::Parser::new(&tokens, VmWriter::new());
    if options.parse_tree {
        parser = parser.with_parse_tree();
    }
    if options.symbol_dump {
        parser = parser.with_symbol_dump();
    }
    parser.parse()?;
    let output = parser.finish();

    Ok(CompileOutput {
        instructions: output.emitter.into_instructions(),
        parse_tree: output.tree,
        symbol_dump: output.symbol_dump,
        tokens,
    })
}
