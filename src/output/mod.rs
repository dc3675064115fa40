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

//! Output module for the jackc compiler.
//!
//! This module decides where compiled artifacts go and writes them:
//! - `Name.vm` - VM code
//! - `NameT.xml` - Token listing
//! - `Name.xml` - Parse tree
//! - `Name.sym` - Symbol table dump
//!
//! It also expands directory inputs into the `.jack` files they contain.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File extension of Jack source files.
pub const SOURCE_EXTENSION: &str = "jack";

/// A kind of output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// VM code.
    Vm,
    /// Token listing.
    Tokens,
    /// Parse tree.
    Tree,
    /// Symbol table dump.
    Symbols,
}

impl Artifact {
    /// Suffix appended to the file stem, including the extension.
    pub fn suffix(&self) -> &'static str {
        match self {
            Artifact::Vm => ".vm",
            Artifact::Tokens => "T.xml",
            Artifact::Tree => ".xml",
            Artifact::Symbols => ".sym",
        }
    }
}

/// Check whether a path names a Jack source file.
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(SOURCE_EXTENSION))
}

/// Compute the output path of an artifact.
///
/// Without an output directory the artifact is placed next to its source.
pub fn output_path(source: &Path, out_dir: Option<&Path>, artifact: Artifact) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!("{}{}", stem, artifact.suffix());

    match out_dir {
        Some(dir) => dir.join(file_name),
        None => source.with_file_name(file_name),
    }
}

/// Expand files and directories into a list of source files.
///
/// Directories contribute their `.jack` files, sorted by name, without
/// descending into subdirectories. Files are taken as given.
pub fn collect_sources(inputs: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    let mut sources = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = fs::read_dir(input)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.is_file() && is_source_file(path))
                .collect();
            found.sort();
            sources.extend(found);
        } else {
            sources.push(input.clone());
        }
    }
    Ok(sources)
}

/// Write an artifact to disk, creating the parent directory if needed.
pub fn write_output(text: &str, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_path_next_to_source() {
        let source = Path::new("project/Main.jack");
        assert_eq!(
            output_path(source, None, Artifact::Vm),
            PathBuf::from("project/Main.vm")
        );
        assert_eq!(
            output_path(source, None, Artifact::Tokens),
            PathBuf::from("project/MainT.xml")
        );
        assert_eq!(
            output_path(source, None, Artifact::Tree),
            PathBuf::from("project/Main.xml")
        );
        assert_eq!(
            output_path(source, None, Artifact::Symbols),
            PathBuf::from("project/Main.sym")
        );
    }

    #[test]
    fn test_output_path_in_out_dir() {
        assert_eq!(
            output_path(Path::new("src/Square.jack"), Some(Path::new("build")), Artifact::Vm),
            PathBuf::from("build/Square.vm")
        );
    }

    #[test]
    fn test_is_source_file() {
        assert!(is_source_file(Path::new("Main.jack")));
        assert!(is_source_file(Path::new("Main.JACK")));
        assert!(!is_source_file(Path::new("Main.vm")));
        assert!(!is_source_file(Path::new("jack")));
    }

    #[test]
    fn test_collect_sources_from_directory() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["Main.jack", "Ball.jack", "notes.txt", "Main.vm"] {
            fs::write(temp_dir.path().join(name), "").unwrap();
        }
        fs::create_dir(temp_dir.path().join("sub.jack")).unwrap();

        let sources = collect_sources(&[temp_dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = sources
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["Ball.jack", "Main.jack"]);
    }

    #[test]
    fn test_collect_sources_keeps_files() {
        let files = vec![PathBuf::from("b/Two.jack"), PathBuf::from("a/One.jack")];
        assert_eq!(collect_sources(&files).unwrap(), files);
    }

    #[test]
    fn test_write_output_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("Main.vm");
        write_output("return\n", &path).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "return\n");
    }
}
