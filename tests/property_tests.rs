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


//! Property-based tests for the jackc compiler.
//!
//! These tests use proptest to check invariants that must hold for all
//! inputs, not just hand-picked examples.

use std::collections::HashSet;

use jackc::codegen::{parse_program, Instruction};
use jackc::lexer::{self, xml};
use jackc::symbols::{StorageKind, SymbolTable};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Generate the text of one valid token.
fn token_text() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(jackc::grammar::KEYWORDS.to_vec()).prop_map(String::from),
        prop::sample::select(jackc::grammar::SYMBOLS.to_vec()).prop_map(String::from),
        "[a-zA-Z_][a-zA-Z0-9_]{0,10}",
        (0u16..=32767).prop_map(|n| n.to_string()),
        "0{1,3}[0-9]{1,3}",
        "[a-zA-Z0-9 <>&.,!?;=+\\-\t\n\r\x01]{0,12}".prop_map(|s| format!("\"{}\"", s)),
    ]
}

/// Generate a statement list with nested `if` and `while` blocks.
fn statements() -> impl Strategy<Value = String> {
    let leaf = Just("let x = x + 1;".to_string());
    leaf.prop_recursive(4, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(|body| body.join(" ")),
            prop::collection::vec(inner.clone(), 0..3)
                .prop_map(|body| format!("while (x < 9) {{ {} }}", body.join(" "))),
            prop::collection::vec(inner.clone(), 0..3)
                .prop_map(|body| format!("if (x = 1) {{ {} }}", body.join(" "))),
            (
                prop::collection::vec(inner.clone(), 0..3),
                prop::collection::vec(inner, 0..3)
            )
                .prop_map(|(then, otherwise)| format!(
                    "if (~x) {{ {} }} else {{ {} }}",
                    then.join(" "),
                    otherwise.join(" ")
                )),
        ]
    })
}

fn storage_kind() -> impl Strategy<Value = StorageKind> {
    prop::sample::select(StorageKind::ALL.to_vec())
}

// ============================================================================
// Lexer Properties
// ============================================================================

proptest! {
    /// Tokenizing the same text twice gives the same result.
    #[test]
    fn lexer_is_deterministic(input in "\\PC{0,80}") {
        let first = format!("{:?}", lexer::tokenize(&input));
        let second = format!("{:?}", lexer::tokenize(&input));
        prop_assert_eq!(first, second);
    }

    /// Reading the token listing back yields the tokens it was made from.
    #[test]
    fn token_listing_round_trips(words in prop::collection::vec(token_text(), 1..30)) {
        let source = words.join(" ");
        let tokens = lexer::tokenize(&source).expect("Generated tokens must lex");
        let listing = xml::render_tokens_xml(&tokens);

        let lines: Vec<&str> = listing.lines().collect();
        prop_assert_eq!(lines.first().copied(), Some("<tokens>"));
        prop_assert_eq!(lines.last().copied(), Some("</tokens>"));

        let read_back: Vec<_> = lines[1..lines.len() - 1]
            .iter()
            .map(|line| xml::parse_terminal_line(line).expect("Terminal line must parse"))
            .collect();
        let lexed: Vec<_> = tokens.into_iter().map(|(token, _)| token).collect();
        prop_assert_eq!(read_back, lexed);
    }

    /// Each generated word becomes exactly one token.
    #[test]
    fn words_map_to_single_tokens(words in prop::collection::vec(token_text(), 1..30)) {
        let tokens = lexer::tokenize(&words.join(" ")).expect("Generated tokens must lex");
        prop_assert_eq!(tokens.len(), words.len());
    }

    /// Spans always lie inside the source and never overlap.
    #[test]
    fn spans_are_ordered(words in prop::collection::vec(token_text(), 1..30)) {
        let source = words.join("\n");
        let tokens = lexer::tokenize(&source).expect("Generated tokens must lex");
        let mut last_end = 0;
        for (_, span) in &tokens {
            prop_assert!(span.start >= last_end);
            prop_assert!(span.end <= source.len());
            prop_assert!(span.start < span.end);
            last_end = span.end;
        }
    }
}

// ============================================================================
// Symbol Table Properties
// ============================================================================

proptest! {
    /// Indices are 0, 1, 2, ... per kind, and the count matches.
    #[test]
    fn indices_are_contiguous_per_kind(kinds in prop::collection::vec(storage_kind(), 0..40)) {
        let mut table = SymbolTable::new();
        for (i, kind) in kinds.iter().enumerate() {
            table.define(&format!("v{}", i), "int", *kind);
        }

        for kind in StorageKind::ALL {
            let expected: Vec<u16> = (0..kinds.iter().filter(|k| **k == kind).count() as u16).collect();
            let actual: Vec<u16> = kinds
                .iter()
                .enumerate()
                .filter(|(_, k)| **k == kind)
                .filter_map(|(i, _)| table.lookup(&format!("v{}", i)).map(|s| s.index))
                .collect();
            prop_assert_eq!(&actual, &expected);
            prop_assert_eq!(table.var_count(kind) as usize, expected.len());
        }
    }

    /// Subroutine symbols never leak into the next subroutine.
    #[test]
    fn subroutine_scope_is_isolated(kinds in prop::collection::vec(storage_kind(), 1..20)) {
        let mut table = SymbolTable::new();
        for (i, kind) in kinds.iter().enumerate() {
            table.define(&format!("v{}", i), "int", *kind);
        }
        table.start_subroutine();

        for (i, kind) in kinds.iter().enumerate() {
            prop_assert_eq!(table.has(&format!("v{}", i)), kind.is_class_scope());
        }
        prop_assert_eq!(table.var_count(StorageKind::Arg), 0);
        prop_assert_eq!(table.var_count(StorageKind::Var), 0);
    }

    /// Locals are declared with their running index.
    #[test]
    fn locals_compile_to_their_index(count in 1usize..12, target in 0usize..12) {
        let target = target % count;
        let names: Vec<String> = (0..count).map(|i| format!("v{}", i)).collect();
        let source = format!(
            "class A {{ function void f() {{ var int {}; let v{} = 5; return; }} }}",
            names.join(", "),
            target
        );
        let vm = jackc::compile_to_vm(&source).expect("Generated class must compile");
        let expected_header = format!("function A.f {}\n", count);
        let expected_pop = format!("push constant 5\npop local {}\n", target);
        prop_assert!(vm.starts_with(&expected_header));
        prop_assert!(vm.contains(&expected_pop));
    }
}

// ============================================================================
// Code Generation Properties
// ============================================================================

proptest! {
    /// Every label is defined once and every jump targets a defined label.
    #[test]
    fn labels_are_unique(first in statements(), second in statements()) {
        let source = format!(
            "class A {{ function void f() {{ var int x; {} return; }} \
             method void g() {{ var int x; {} return; }} }}",
            first, second
        );
        let code = jackc::compile(&source).expect("Generated class must compile");

        let mut defined = HashSet::new();
        for instruction in &code {
            if let Instruction::Label(name) = instruction {
                prop_assert!(defined.insert(name.clone()), "label {} defined twice", name);
            }
        }
        for instruction in &code {
            match instruction {
                Instruction::Goto(name) | Instruction::IfGoto(name) => {
                    prop_assert!(defined.contains(name), "jump to undefined label {}", name);
                }
                _ => {}
            }
        }
    }

    /// A call on a variable passes the object as an extra argument.
    #[test]
    fn argument_counts(n in 0usize..8) {
        let args: Vec<String> = (0..n).map(|i| i.to_string()).collect();
        let source = format!(
            "class A {{ method void f() {{ var Point p; do Math.g({args}); do p.g({args}); do g({args}); return; }} }}",
            args = args.join(", ")
        );
        let code = jackc::compile(&source).expect("Generated class must compile");
        let calls: Vec<(String, u16)> = code
            .iter()
            .filter_map(|i| match i {
                Instruction::Call { name, n_args } => Some((name.clone(), *n_args)),
                _ => None,
            })
            .collect();
        let n = n as u16;
        prop_assert_eq!(
            calls,
            vec![
                ("Math.g".to_string(), n),
                ("Point.g".to_string(), n + 1),
                ("A.g".to_string(), n + 1),
            ]
        );
    }

    /// VM text written by the compiler reads back into the same program.
    #[test]
    fn vm_text_reads_back(body in statements()) {
        let source = format!(
            "class A {{ function void f() {{ var int x; {} do Output.printString(\"ok\"); return; }} }}",
            body
        );
        let code = jackc::compile(&source).expect("Generated class must compile");
        let text = jackc::codegen::render(&code);
        let read_back = parse_program(&text).expect("Rendered VM text must parse");
        prop_assert_eq!(read_back, code);
    }
}
