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

//! jackc Compiler CLI
//!
//! Compiles Jack classes into Hack VM code.

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use jackc::error::format_error;
use jackc::output::{collect_sources, output_path, write_output, Artifact};
use jackc::watch::SourceWatcher;
use jackc::{CompileOptions, CompileOutput};

/// jackc - A single-pass Jack to Hack VM compiler
#[derive(Parser, Debug)]
#[command(name = "jackc")]
#[command(author = "Marcel Joachim Kloubert")]
#[command(version)]
#[command(about = "A single-pass compiler translating Jack classes into Hack VM code")]
#[command(long_about = r#"
jackc compiles Jack classes into Hack VM code. Every input is either a
.jack file or a directory; a directory compiles all .jack files in it.

Besides VM code it can write diagnostic outputs:
  - vm       Name.vm      VM code
  - tokens   NameT.xml    Token listing
  - tree     Name.xml     Parse tree
  - symbols  Name.sym     Symbol tables

Example usage:
  jackc Main.jack
  jackc Square/ -o build
  jackc Main.jack --emit tokens --emit tree
  jackc Main.jack --emit vm --stdout

Watch mode:
  jackc Square/ --watch
"#)]
struct Cli {
    /// Source files (.jack) or directories to compile
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory (default: next to each source file)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Outputs to produce; may be repeated (default: vm)
    #[arg(long, value_enum)]
    emit: Vec<EmitKind>,

    /// Print outputs to stdout instead of writing files
    #[arg(long)]
    stdout: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Watch the inputs and recompile on changes
    #[arg(short, long)]
    watch: bool,
}

/// Output selectable with `--emit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EmitKind {
    /// VM code
    Vm,
    /// Token listing
    Tokens,
    /// Parse tree
    Tree,
    /// Symbol tables
    Symbols,
}

impl EmitKind {
    fn artifact(&self) -> Artifact {
        match self {
            EmitKind::Vm => Artifact::Vm,
            EmitKind::Tokens => Artifact::Tokens,
            EmitKind::Tree => Artifact::Tree,
            EmitKind::Symbols => Artifact::Symbols,
        }
    }
}

/// Why a compilation run failed, in exit code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Failure {
    Compile,
    Usage,
    Io,
    Internal,
}

impl Failure {
    fn exit_code(&self) -> ExitCode {
        match self {
            Failure::Compile => ExitCode::from(1),
            Failure::Usage => ExitCode::from(2),
            Failure::Io => ExitCode::from(3),
            Failure::Internal => ExitCode::from(4),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut emit: Vec<EmitKind> = Vec::new();
    for kind in &cli.emit {
        if !emit.contains(kind) {
            emit.push(*kind);
        }
    }
    if emit.is_empty() {
        emit.push(EmitKind::Vm);
    }

    if cli.verbose {
        println!("jackc v{}", jackc::VERSION);
        println!(
            "Outputs: {}",
            emit.iter()
                .map(|e| format!("{:?}", e).to_lowercase())
                .collect::<Vec<_>>()
                .join(", ")
        );
        if let Some(dir) = &cli.out_dir {
            println!("Output directory: {}", dir.display());
        }
        println!();
    }

    let result = compile_inputs(&cli, &emit);

    if cli.watch {
        return run_watch_loop(&cli, &emit);
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => failure.exit_code(),
    }
}

/// Compile every source named by the inputs.
///
/// All sources are attempted; the most severe failure is returned.
fn compile_inputs(cli: &Cli, emit: &[EmitKind]) -> Result<(), Failure> {
    let sources = match collect_sources(&cli.inputs) {
        Ok(sources) => sources,
        Err(e) => {
            eprintln!("Error: Cannot read inputs: {}", e);
            return Err(Failure::Io);
        }
    };

    if sources.is_empty() {
        eprintln!("Error: No .jack files found in the given inputs");
        return Err(Failure::Usage);
    }

    if cli.verbose {
        println!("Source files:");
        for source in &sources {
            println!("  - {}", source.display());
        }
        println!();
    }

    let mut worst: Option<Failure> = None;
    for source in &sources {
        if let Err(failure) = compile_file(cli, emit, source) {
            worst = worst.max(Some(failure));
        }
    }

    match worst {
        Some(failure) => Err(failure),
        None => Ok(()),
    }
}

/// Compile one source file and write or print the requested outputs.
fn compile_file(cli: &Cli, emit: &[EmitKind], path: &Path) -> Result<(), Failure> {
    let source = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error: Cannot read {}: {}", path.display(), e);
            return Err(Failure::Io);
        }
    };

    if cli.verbose {
        println!("Compiling {}...", path.display());
    }

    let filename = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("<input>");

    let options = CompileOptions {
        parse_tree: emit.contains(&EmitKind::Tree),
        symbol_dump: emit.contains(&EmitKind::Symbols),
    };

    let output = match jackc::compile_with_options(&source, &options) {
        Ok(output) => output,
        Err(e) => {
            eprint!("{}", format_error(&e, &source, Some(filename)));
            return Err(if e.is_internal() {
                Failure::Internal
            } else {
                Failure::Compile
            });
        }
    };

    if cli.verbose {
        println!(
            "Generated {} instructions from {} tokens",
            output.instructions.len(),
            output.tokens.len()
        );
    }

    let mut written = Vec::new();
    for kind in emit {
        let text = render_artifact(&output, *kind);

        if cli.stdout {
            print!("{}", text);
            continue;
        }

        let target = output_path(path, cli.out_dir.as_deref(), kind.artifact());
        if cli.verbose {
            println!("Writing {}...", target.display());
        }
        if let Err(e) = write_output(&text, &target) {
            eprintln!("Error: Cannot write {}: {}", target.display(), e);
            return Err(Failure::Io);
        }
        written.push(target);
    }

    if !cli.stdout && !cli.verbose {
        println!(
            "Compiled {} -> {}",
            filename,
            written
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    Ok(())
}

/// Render one requested output of a successful compilation.
fn render_artifact(output: &CompileOutput, kind: EmitKind) -> String {
    match kind {
        EmitKind::Vm => output.vm_text(),
        EmitKind::Tokens => output.tokens_xml(),
        EmitKind::Tree => output
            .parse_tree
            .as_ref()
            .map(|tree| tree.to_xml())
            .unwrap_or_default(),
        EmitKind::Symbols => output.symbol_dump.clone().unwrap_or_default(),
    }
}

/// Recompile whenever a watched source changes.
fn run_watch_loop(cli: &Cli, emit: &[EmitKind]) -> ExitCode {
    let watcher = match SourceWatcher::new(&cli.inputs) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: Failed to create file watcher: {}", e);
            return ExitCode::from(6);
        }
    };

    println!();
    println!("Watching for changes... (Press Ctrl+C to stop)");

    loop {
        let changed = match watcher.wait_for_change() {
            Ok(changed) => changed,
            Err(e) => {
                eprintln!("Watch error: {}", e);
                if matches!(e, jackc::watch::WatchError::ChannelClosed) {
                    return ExitCode::from(6);
                }
                continue;
            }
        };

        println!();
        if cli.verbose {
            for path in &changed {
                println!("Changed: {}", path.display());
            }
            println!("Change detected, recompiling...");
        } else {
            println!("Recompiling...");
        }

        if compile_inputs(cli, emit).is_err() {
            println!("Fix errors and save to retry.");
        }
    }
}
