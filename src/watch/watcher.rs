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

//! Source watching.
//!
//! Inputs are either single `.jack` files or directories of them. For files
//! the parent directory is watched, so atomic saves (write to a temp file,
//! then rename) are seen too. For directories any `.jack` file created or
//! modified directly inside them counts as a change.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use super::WatchError;
use crate::output::is_source_file;

/// Debounce window for file change events.
/// Multiple rapid changes within this window are collapsed into one.
const DEBOUNCE_DURATION: Duration = Duration::from_millis(100);

/// Watches Jack sources for changes.
///
/// # Example
///
/// ```no_run
/// use std::path::PathBuf;
/// use jackc::watch::SourceWatcher;
///
/// let inputs = vec![PathBuf::from("Main.jack"), PathBuf::from("lib")];
/// let watcher = SourceWatcher::new(&inputs).expect("Failed to create watcher");
///
/// let changed = watcher.wait_for_change().expect("Watch error");
/// println!("{} file(s) changed", changed.len());
/// ```
pub struct SourceWatcher {
    /// The underlying file system watcher.
    _watcher: RecommendedWatcher,
    /// Receiver for file system events.
    rx: Receiver<Result<Event, notify::Error>>,
    /// Individual files being watched.
    files: Vec<PathBuf>,
    /// Directories whose sources are all watched.
    dirs: Vec<PathBuf>,
}

impl SourceWatcher {
    /// Create a watcher for the given files and directories.
    pub fn new(inputs: &[PathBuf]) -> Result<Self, WatchError> {
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx).map_err(WatchError::Create)?;

        let mut files = Vec::new();
        let mut dirs = Vec::new();
        let mut registered = HashSet::new();

        for input in inputs {
            let canonical = input.canonicalize().map_err(|source| WatchError::InvalidPath {
                path: input.clone(),
                source,
            })?;

            let dir = if canonical.is_dir() {
                dirs.push(canonical.clone());
                canonical
            } else {
                let parent = canonical.parent().map(Path::to_path_buf);
                files.push(canonical);
                match parent {
                    Some(parent) => parent,
                    None => continue,
                }
            };

            if registered.insert(dir.clone()) {
                watcher
                    .watch(&dir, RecursiveMode::NonRecursive)
                    .map_err(|source| WatchError::Register {
                        path: dir.clone(),
                        source,
                    })?;
            }
        }

        Ok(Self {
            _watcher: watcher,
            rx,
            files,
            dirs,
        })
    }

    /// The individual files being watched.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// The directories being watched.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Block until a watched source changes.
    ///
    /// Returns the changed sources seen within the debounce window.
    pub fn wait_for_change(&self) -> Result<Vec<PathBuf>, WatchError> {
        loop {
            let event = self.rx.recv().map_err(|_| WatchError::ChannelClosed)??;

            let mut changed = self.relevant_paths(&event);
            if changed.is_empty() {
                continue;
            }

            std::thread::sleep(DEBOUNCE_DURATION);

            // Collect whatever arrived during the debounce window
            while let Ok(pending) = self.rx.try_recv() {
                if let Ok(event) = pending {
                    for path in self.relevant_paths(&event) {
                        if !changed.contains(&path) {
                            changed.push(path);
                        }
                    }
                }
            }

            return Ok(changed);
        }
    }

    fn relevant_paths(&self, event: &Event) -> Vec<PathBuf> {
        match event.kind {
            EventKind::Modify(_) | EventKind::Create(_) => {}
            _ => return Vec::new(),
        }

        event
            .paths
            .iter()
            .map(|p| p.canonicalize().unwrap_or_else(|_| p.clone()))
            .filter(|p| self.is_watched(p))
            .collect()
    }

    /// Check if a path is one of the watched sources.
    pub fn is_watched(&self, path: &Path) -> bool {
        if self.files.iter().any(|f| f == path) {
            return true;
        }
        is_source_file(path)
            && path
                .parent()
                .is_some_and(|parent| self.dirs.iter().any(|d| d == parent))
    }
}
