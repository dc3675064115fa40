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

//! Parser module for the jackc compiler.
//!
//! This module translates a token stream directly into VM instructions.
//! It uses recursive descent with one production per grammar rule; each
//! production emits its instructions through an [`Emitter`] while it parses,
//! and optionally records itself in a [`ParseTree`].
//!
//! # Module Structure
//!
//! - `blocks` - Class and subroutine declarations (BlockParser trait)
//! - `context` - Class/subroutine state and labels (CompilationContext)
//! - `control_flow` - If, while, and return statements (ControlFlowParser trait)
//! - `expressions` - Expressions, terms, and calls (ExpressionParser trait)
//! - `helpers` - Token stream navigation and error handling (ParserHelpers trait)
//! - `statements` - Let and do statements (StatementParser trait)

// Submodules
pub mod blocks;
pub mod context;
pub mod control_flow;
pub mod expressions;
pub mod helpers;
pub mod statements;

pub use context::{CompilationContext, SubroutineKind};

// Internal imports from submodules
use blocks::BlockParser;
use helpers::ParserHelpers;

use crate::codegen::Emitter;
use crate::error::{CompileError, Span};
use crate::lexer::Token;
use crate::symbols::SymbolTable;
use crate::tree::ParseTree;

/// The parser state.
///
/// All mutable compilation state for one class is owned here.
pub struct Parser<'a, E: Emitter> {
    /// The token stream to parse.
    pub(crate) tokens: &'a [(Token, Span)],
    /// Current position in the token stream.
    pub(crate) position: usize,
    /// Variables visible to the current subroutine.
    pub(crate) symbols: SymbolTable,
    /// Current class, subroutine, and label counter.
    pub(crate) context: CompilationContext,
    /// Instruction sink.
    pub(crate) emitter: E,
    /// Parse tree, when requested.
    pub(crate) tree: Option<ParseTree>,
    /// Symbol table dump, when requested.
    pub(crate) symbol_dump: Option<String>,
}

/// Everything a finished parse produced.
#[derive(Debug)]
pub struct ParseOutput<E> {
    /// The emitter holding the generated code.
    pub emitter: E,
    /// The parse tree, if it was recorded.
    pub tree: Option<ParseTree>,
    /// The symbol table dump, if it was recorded.
    pub symbol_dump: Option<String>,
}

impl<'a, E: Emitter> Parser<'a, E> {
    /// Create a new parser for the given token stream.
    pub fn new(tokens: &'a [(Token, Span)], emitter: E) -> Self {
        Self {
            tokens,
            position: 0,
            symbols: SymbolTable::new(),
            context: CompilationContext::new(),
            emitter,
            tree: None,
            symbol_dump: None,
        }
    }

    /// Record a parse tree while parsing.
    pub fn with_parse_tree(mut self) -> Self {
        self.tree = Some(ParseTree::new());
        self
    }

    /// Record symbol table dumps while parsing.
    pub fn with_symbol_dump(mut self) -> Self {
        self.symbol_dump = Some(String::new());
        self
    }

    /// The symbol table in its current state.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// The compilation context in its current state.
    pub fn context(&self) -> &CompilationContext {
        &self.context
    }

    // ========================================
    // Class Parsing
    // ========================================

    /// Parse exactly one class. Nothing may follow its closing brace.
    pub fn parse(&mut self) -> Result<(), CompileError> {
        self.parse_class()?;
        if !self.is_at_end() {
            return Err(self.unexpected("Expected end of file after class body"));
        }
        Ok(())
    }

    /// Consume the parser, returning what it produced.
    pub fn finish(self) -> ParseOutput<E> {
        ParseOutput {
            emitter: self.emitter,
            tree: self.tree,
            symbol_dump: self.symbol_dump,
        }
    }

    // ========================================
    // Symbol Table Dumps
    // ========================================

    pub(crate) fn dump_class_table(&mut self) {
        if let Some(dump) = self.symbol_dump.as_mut() {
            dump.push_str(&format!("Class Table: {}\n", self.context.class_name));
            dump.push_str(&self.symbols.render_class_scope());
        }
    }

    pub(crate) fn dump_subroutine_table(&mut self) {
        if let Some(dump) = self.symbol_dump.as_mut() {
            dump.push_str(&format!(
                "Subroutine Table: {}\n",
                self.context.qualified_name()
            ));
            dump.push_str(&self.symbols.render_subroutine_scope());
        }
    }
}

/// Parse a token stream, emitting instructions into `emitter`.
pub fn parse<E: Emitter>(tokens: &[(Token, Span)], emitter: E) -> Result<E, CompileError> {
    let mut parser = Parser::new(tokens, emitter);
    parser.parse()?;
    Ok(parser.finish().emitter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::{NullEmitter, VmWriter};
    use crate::error::ErrorCode;
    use crate::lexer::tokenize;
    use pretty_assertions::assert_eq;

    /// Helper to compile source code directly into VM lines.
    fn compile_source(source: &str) -> Result<Vec<String>, CompileError> {
        let tokens = tokenize(source)?;
        let writer = parse(&tokens, VmWriter::new())?;
        Ok(writer
            .instructions()
            .iter()
            .map(|i| i.to_string())
            .collect())
    }

    /// Wrap statements into `class Main { function void main() { ... } }`.
    fn compile_main(decls: &str, statements: &str) -> Vec<String> {
        let source = format!(
            "class Main {{ function void main() {{ {} {} }} }}",
            decls, statements
        );
        compile_source(&source).unwrap()
    }

    /// Body lines of `Main.main`, without the `function` line.
    fn body(decls: &str, statements: &str) -> Vec<String> {
        compile_main(decls, statements)[1..].to_vec()
    }

    // ========================================
    // Parser Creation Tests
    // ========================================

    #[test]
    fn test_parser_creation() {
        let tokens: Vec<(Token, Span)> = vec![];
        let parser = Parser::new(&tokens, NullEmitter::new());
        assert!(parser.is_at_end());
    }

    #[test]
    fn test_parser_peek_and_advance() {
        let tokens = vec![
            (Token::keyword("class"), Span::new(0, 5)),
            (Token::identifier("Main"), Span::new(6, 10)),
        ];
        let mut parser = Parser::new(&tokens, NullEmitter::new());
        assert_eq!(parser.peek(), Some(&Token::keyword("class")));
        let first = parser.advance();
        assert!(matches!(first, Some((ref t, _)) if t.is_keyword("class")));
        assert_eq!(parser.peek(), Some(&Token::identifier("Main")));
    }

    // ========================================
    // Subroutine Tests
    // ========================================

    #[test]
    fn test_empty_function() {
        assert_eq!(
            compile_source("class A { function void f() { return; } }").unwrap(),
            vec!["function A.f 0", "return"]
        );
    }

    #[test]
    fn test_local_count() {
        let lines = compile_main("var int a, b; var boolean c;", "return;");
        assert_eq!(lines[0], "function Main.main 3");
    }

    #[test]
    fn test_method_entry() {
        let lines =
            compile_source("class P { field int x; method int getX() { return x; } }").unwrap();
        assert_eq!(
            lines,
            vec![
                "function P.getX 0",
                "push argument 0",
                "pop pointer 0",
                "push this 0",
                "return",
            ]
        );
    }

    #[test]
    fn test_method_parameters_start_at_one() {
        let lines = compile_source(
            "class P { method void set(int v) { var int t; let t = v; return; } }",
        )
        .unwrap();
        assert!(lines.contains(&"push argument 1".to_string()));
        assert!(lines.contains(&"pop local 0".to_string()));
    }

    #[test]
    fn test_constructor_entry() {
        let lines = compile_source(
            "class P { field int x, y; static int n; \
             constructor P new() { let x = 1; return this; } }",
        )
        .unwrap();
        assert_eq!(
            lines,
            vec![
                "function P.new 0",
                "push constant 2",
                "call Memory.alloc 1",
                "pop pointer 0",
                "push constant 1",
                "pop this 0",
                "push pointer 0",
                "return",
            ]
        );
    }

    // ========================================
    // Statement Tests
    // ========================================

    #[test]
    fn test_let_local() {
        assert_eq!(
            body("var int x;", "let x = 1 + 2; return;"),
            vec!["push constant 1", "push constant 2", "add", "pop local 0", "return"]
        );
    }

    #[test]
    fn test_let_array_element() {
        assert_eq!(
            body("var Array a;", "let a[1] = 5; return;"),
            vec![
                "push local 0",
                "push constant 1",
                "add",
                "push constant 5",
                "pop temp 0",
                "pop pointer 1",
                "push temp 0",
                "pop that 0",
                "return",
            ]
        );
    }

    #[test]
    fn test_do_discards_result() {
        assert_eq!(
            body("", "do Output.printInt(3); return;"),
            vec!["push constant 3", "call Output.printInt 1", "pop temp 0", "return"]
        );
    }

    #[test]
    fn test_return_value() {
        assert_eq!(body("", "return 7;"), vec!["push constant 7", "return"]);
    }

    #[test]
    fn test_if_else() {
        assert_eq!(
            body("var int x;", "if (true) { let x = 1; } else { let x = 2; } return;"),
            vec![
                "push constant 1",
                "neg",
                "not",
                "if-goto IF_FALSE_0",
                "push constant 1",
                "pop local 0",
                "goto IF_END_1",
                "label IF_FALSE_0",
                "push constant 2",
                "pop local 0",
                "label IF_END_1",
                "return",
            ]
        );
    }

    #[test]
    fn test_while() {
        assert_eq!(
            body("var int i;", "while (i < 3) { let i = i + 1; } return;"),
            vec![
                "label WHILE_EXP_0",
                "push local 0",
                "push constant 3",
                "lt",
                "not",
                "if-goto WHILE_END_1",
                "push local 0",
                "push constant 1",
                "add",
                "pop local 0",
                "goto WHILE_EXP_0",
                "label WHILE_END_1",
                "return",
            ]
        );
    }

    // ========================================
    // Expression Tests
    // ========================================

    #[test]
    fn test_left_to_right_evaluation() {
        assert_eq!(
            body("", "return 1 + 2 * 3;"),
            vec![
                "push constant 1",
                "push constant 2",
                "add",
                "push constant 3",
                "call Math.multiply 2",
                "return",
            ]
        );
    }

    #[test]
    fn test_unary_and_parentheses() {
        assert_eq!(
            body("", "return -(4 / ~2);"),
            vec![
                "push constant 4",
                "push constant 2",
                "not",
                "call Math.divide 2",
                "neg",
                "return",
            ]
        );
    }

    #[test]
    fn test_keyword_constants() {
        assert_eq!(
            body("", "return false = null;"),
            vec!["push constant 0", "push constant 0", "eq", "return"]
        );
    }

    #[test]
    fn test_string_constant() {
        assert_eq!(
            body("", "return \"hi\";"),
            vec![
                "push constant 2",
                "call String.new 1",
                "push constant 104",
                "call String.appendChar 2",
                "push constant 105",
                "call String.appendChar 2",
                "return",
            ]
        );
    }

    #[test]
    fn test_array_read() {
        assert_eq!(
            body("var Array a;", "return a[2];"),
            vec![
                "push local 0",
                "push constant 2",
                "add",
                "pop pointer 1",
                "push that 0",
                "return",
            ]
        );
    }

    // ========================================
    // Call Tests
    // ========================================

    #[test]
    fn test_call_on_variable() {
        assert_eq!(
            body("var Point p;", "do p.move(1, 2); return;"),
            vec![
                "push local 0",
                "push constant 1",
                "push constant 2",
                "call Point.move 3",
                "pop temp 0",
                "return",
            ]
        );
    }

    #[test]
    fn test_call_on_class() {
        assert_eq!(
            body("", "do Screen.clearScreen(); return;"),
            vec!["call Screen.clearScreen 0", "pop temp 0", "return"]
        );
    }

    #[test]
    fn test_unqualified_call_in_method() {
        let lines =
            compile_source("class S { method void a() { do b(5); return; } }").unwrap();
        assert_eq!(
            lines,
            vec![
                "function S.a 0",
                "push argument 0",
                "pop pointer 0",
                "push pointer 0",
                "push constant 5",
                "call S.b 2",
                "pop temp 0",
                "return",
            ]
        );
    }

    #[test]
    fn test_unqualified_call_in_function() {
        assert_eq!(
            body("", "do helper(1); return;"),
            vec!["push constant 1", "call Main.helper 1", "pop temp 0", "return"]
        );
    }

    #[test]
    fn test_nested_call_counts() {
        assert_eq!(
            body("", "do Math.max(Math.min(1, 2), 3); return;"),
            vec![
                "push constant 1",
                "push constant 2",
                "call Math.min 2",
                "push constant 3",
                "call Math.max 2",
                "pop temp 0",
                "return",
            ]
        );
    }

    // ========================================
    // Scope Tests
    // ========================================

    #[test]
    fn test_static_and_field_segments() {
        let lines = compile_source(
            "class C { static int s; field int f; \
             method void m() { let f = s; return; } }",
        )
        .unwrap();
        assert_eq!(&lines[3..5], &["push static 0", "pop this 0"]);
    }

    #[test]
    fn test_scope_isolation() {
        let err = compile_source(
            "class C { function void a() { var int x; return; } \
             function void b() { let x = 1; return; } }",
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownSymbol);
    }

    #[test]
    fn test_labels_unique_across_subroutines() {
        let lines = compile_source(
            "class C { function void a() { while (true) { } return; } \
             function void b() { while (true) { } return; } }",
        )
        .unwrap();
        assert!(lines.contains(&"label WHILE_EXP_2".to_string()));
        assert!(lines.contains(&"label WHILE_END_3".to_string()));
    }

    // ========================================
    // Error Tests
    // ========================================

    #[test]
    fn test_unknown_variable() {
        let err = compile_source("class C { function void f() { return y; } }").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownSymbol);
        assert!(err.message.contains("'y'"));
        assert_eq!(err.token_index, Some(10));
    }

    #[test]
    fn test_missing_semicolon() {
        let err = compile_source("class C { function void f() { return } }").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnexpectedToken);
        assert!(err.message.contains("found '}'"));
    }

    #[test]
    fn test_unexpected_end_of_file() {
        let err = compile_source("class C { function void f() {").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnexpectedEndOfFile);
    }

    #[test]
    fn test_trailing_tokens() {
        let err = compile_source("class C { } class D { }").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnexpectedToken);
        assert!(err.message.contains("end of file"));
    }

    #[test]
    fn test_var_after_statement() {
        let err = compile_source("class C { function void f() { return; var int x; } }")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnexpectedToken);
    }

    // ========================================
    // Parse Tree and Symbol Dump Tests
    // ========================================

    #[test]
    fn test_parse_tree_root() {
        let tokens = tokenize("class A { }").unwrap();
        let mut parser = Parser::new(&tokens, NullEmitter::new()).with_parse_tree();
        parser.parse().unwrap();
        let tree = parser.finish().tree.unwrap();
        assert_eq!(
            tree.to_xml(),
            "<class>\n  <keyword> class </keyword>\n  <identifier> A </identifier>\n  \
             <symbol> { </symbol>\n  <symbol> } </symbol>\n</class>\n"
        );
    }

    #[test]
    fn test_symbol_dump() {
        let tokens =
            tokenize("class A { field int x; method void m(int y) { var int z; return; } }")
                .unwrap();
        let mut parser = Parser::new(&tokens, NullEmitter::new()).with_symbol_dump();
        parser.parse().unwrap();
        let dump = parser.finish().symbol_dump.unwrap();
        assert_eq!(
            dump,
            "Class Table: A\n\
             \x20             x    field             int    0\n\
             \n\
             Subroutine Table: A.m\n\
             \x20          this      arg               A    0\n\
             \x20             y      arg             int    1\n\
             \x20             z      var             int    0\n\
             \n"
        );
    }

    #[test]
    fn test_no_class_table_without_class_vars() {
        let tokens = tokenize("class A { function void f() { return; } }").unwrap();
        let mut parser = Parser::new(&tokens, NullEmitter::new()).with_symbol_dump();
        parser.parse().unwrap();
        let dump = parser.finish().symbol_dump.unwrap();
        assert_eq!(dump, "Subroutine Table: A.f\n\n");
    }
}
