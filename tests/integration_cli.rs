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


//! End-to-end CLI integration tests.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const SEVEN: &str = include_str!("fixtures/valid/Seven.jack");
const SQUARE: &str = include_str!("fixtures/valid/Square.jack");
const LIST: &str = include_str!("fixtures/valid/List.jack");
const UNKNOWN_VARIABLE: &str = include_str!("fixtures/invalid/UnknownVariable.jack");

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_jackc"))
}

fn run(args: &[&std::ffi::OsStr]) -> Output {
    cargo_bin().args(args).output().expect("Failed to execute command")
}

fn write_source(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Test --help flag.
#[test]
fn test_help_flag() {
    let output = cargo_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("jackc"));
    assert!(stdout.contains("--out-dir"));
    assert!(stdout.contains("--emit"));
    assert!(stdout.contains("--verbose"));
    assert!(stdout.contains("--watch"));
}

/// Test --version flag.
#[test]
fn test_version_flag() {
    let output = cargo_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("jackc"));
    assert!(stdout.contains(jackc::VERSION));
}

/// Test that inputs are required.
#[test]
fn test_missing_inputs() {
    let output = cargo_bin().output().expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(2));
}

/// Test compiling a single file next to its source.
#[test]
fn test_compile_single_file() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_source(temp_dir.path(), "Main.jack", SEVEN);

    let output = run(&[source.as_os_str()]);

    assert!(
        output.status.success(),
        "Compilation failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Compiled Main.jack -> "));

    let vm = fs::read_to_string(temp_dir.path().join("Main.vm")).unwrap();
    assert!(vm.starts_with("function Main.main 0\n"));
    assert!(vm.ends_with("pop temp 0\nreturn\n"));
}

/// Test compiling every source in a directory.
#[test]
fn test_compile_directory() {
    let temp_dir = TempDir::new().unwrap();
    write_source(temp_dir.path(), "Square.jack", SQUARE);
    write_source(temp_dir.path(), "List.jack", LIST);
    write_source(temp_dir.path(), "README.txt", "not a source");

    let output = run(&[temp_dir.path().as_os_str()]);

    assert!(
        output.status.success(),
        "Compilation failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(temp_dir.path().join("Square.vm").exists());
    assert!(temp_dir.path().join("List.vm").exists());
    assert!(!temp_dir.path().join("README.vm").exists());

    // Sources are compiled in name order
    let stdout = String::from_utf8_lossy(&output.stdout);
    let list = stdout.find("Compiled List.jack").unwrap();
    let square = stdout.find("Compiled Square.jack").unwrap();
    assert!(list < square);
}

/// Test the output directory option.
#[test]
fn test_out_dir() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_source(temp_dir.path(), "Main.jack", SEVEN);
    let out_dir = temp_dir.path().join("build").join("vm");

    let output = run(&[source.as_os_str(), "-o".as_ref(), out_dir.as_os_str()]);

    assert!(output.status.success());
    assert!(out_dir.join("Main.vm").exists());
    assert!(!temp_dir.path().join("Main.vm").exists());
}

/// Test that diagnostic outputs replace the default VM output.
#[test]
fn test_emit_diagnostics() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_source(temp_dir.path(), "Square.jack", SQUARE);

    let output = run(&[
        source.as_os_str(),
        "--emit".as_ref(),
        "tokens".as_ref(),
        "--emit".as_ref(),
        "tree".as_ref(),
        "--emit".as_ref(),
        "symbols".as_ref(),
    ]);

    assert!(
        output.status.success(),
        "Compilation failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(!temp_dir.path().join("Square.vm").exists());

    let tokens = fs::read_to_string(temp_dir.path().join("SquareT.xml")).unwrap();
    assert!(tokens.starts_with("<tokens>\n<keyword> class </keyword>\n<identifier> Square </identifier>\n"));
    assert!(tokens.contains("<symbol> &lt; </symbol>"));
    assert!(tokens.contains("<symbol> &amp; </symbol>"));

    let tree = fs::read_to_string(temp_dir.path().join("Square.xml")).unwrap();
    assert!(tree.starts_with("<class>\n  <keyword> class </keyword>\n"));
    assert!(tree.ends_with("</class>\n"));
    assert_eq!(tree.matches("<subroutineDec>").count(), 4);

    let symbols = fs::read_to_string(temp_dir.path().join("Square.sym")).unwrap();
    assert!(symbols.starts_with("Class Table: Square\n"));
    assert!(symbols.contains("Subroutine Table: Square.new\n"));
    assert!(symbols.contains("Subroutine Table: Square.incSize\n"));
}

/// Test printing to stdout instead of writing files.
#[test]
fn test_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_source(temp_dir.path(), "Main.jack", SEVEN);

    let output = run(&[source.as_os_str(), "--stdout".as_ref()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, jackc::compile_to_vm(SEVEN).unwrap());
    assert!(!temp_dir.path().join("Main.vm").exists());
}

/// Test verbose output.
#[test]
fn test_verbose() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_source(temp_dir.path(), "Main.jack", SEVEN);

    let output = run(&[source.as_os_str(), "-v".as_ref()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("jackc v"));
    assert!(stdout.contains("Compiling "));
    assert!(stdout.contains("Generated 9 instructions"));
    assert!(stdout.contains("Writing "));
}

// ============================================================================
// Exit Codes
// ============================================================================

/// Test that a compile error exits with 1 and is reported on stderr.
#[test]
fn test_compile_error() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_source(temp_dir.path(), "Main.jack", UNKNOWN_VARIABLE);

    let output = run(&[source.as_os_str()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error[E200]: Unknown symbol 'count'"));
    assert!(stderr.contains("--> Main.jack:3:11"));
    assert!(!temp_dir.path().join("Main.vm").exists());
}

/// Test that one bad file does not stop the others.
#[test]
fn test_compile_error_in_directory() {
    let temp_dir = TempDir::new().unwrap();
    write_source(temp_dir.path(), "Bad.jack", UNKNOWN_VARIABLE);
    write_source(temp_dir.path(), "Square.jack", SQUARE);

    let output = run(&[temp_dir.path().as_os_str()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!temp_dir.path().join("Bad.vm").exists());
    assert!(temp_dir.path().join("Square.vm").exists());
}

/// Test that a directory without sources is a usage error.
#[test]
fn test_empty_directory() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(&[temp_dir.path().as_os_str()]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No .jack files found"));
}

/// Test that an unreadable input is an I/O error.
#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("Missing.jack");

    let output = run(&[missing.as_os_str()]);

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cannot read"));
}

/// Test that an invalid --emit value is rejected by the argument parser.
#[test]
fn test_invalid_emit_value() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_source(temp_dir.path(), "Main.jack", SEVEN);

    let output = run(&[source.as_os_str(), "--emit".as_ref(), "asm".as_ref()]);

    assert_eq!(output.status.code(), Some(2));
}
