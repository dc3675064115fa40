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


//! Fuzz target for the jackc parser.
//!
//! This fuzzer tokenizes random input and feeds the tokens to the parser,
//! with the parse tree and symbol dump enabled, to find crashes, panics,
//! or infinite loops.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_parser

#![no_main]

use jackc::codegen::NullEmitter;
use jackc::parser::Parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        if let Ok(tokens) = jackc::lexer::tokenize(source) {
            let mut parser = Parser::new(&tokens, NullEmitter::new())
                .with_parse_tree()
                .with_symbol_dump();
            let _ = parser.parse();
            if let Some(tree) = parser.finish().tree {
                let _ = tree.to_xml();
            }
        }
    }
});
