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


//! Fuzz target for the complete jackc pipeline.
//!
//! This fuzzer feeds random source code through the entire compilation
//! pipeline to find crashes at any stage. Successful output must read
//! back as VM text.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_compiler
//!
//! Run for a specific duration:
//!   cargo +nightly fuzz run fuzz_compiler -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        match jackc::compile(source) {
            Ok(code) => {
                let text = jackc::codegen::render(&code);
                assert_eq!(jackc::codegen::parse_program(&text).ok(), Some(code));
            }
            Err(e) => {
                assert!(!e.is_internal(), "internal error: {}", e);
                let _ = jackc::format_error(&e, source, None);
            }
        }
    }
});
