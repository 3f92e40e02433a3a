//! Shared domain types and defaults

use serde::{Deserialize, Serialize};

/// Name of the project-local ignore file read from the workspace root.
pub const DEFAULT_IGNORE_FILE: &str = ".splitignore";

/// Most panes a single split view will open.
pub const DEFAULT_MAX_FILES: usize = 32;

/// A split view needs at least this many text files.
pub const DEFAULT_MIN_FILES: usize = 2;

/// Leading bytes sampled by the binary classifier.
pub const DEFAULT_SAMPLE_SIZE: usize = 1000;

/// Kind of a filesystem entry as reported by the filesystem capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    pub fn is_dir(self) -> bool {
        matches!(self, EntryKind::Directory)
    }

    pub fn is_file(self) -> bool {
        matches!(self, EntryKind::File)
    }
}

/// Effective configuration after merging defaults, file, env and CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_files: usize,
    pub min_files: usize,
    pub ignore_file: String,
    pub sample_size: usize,
    pub follow_symlinks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            min_files: DEFAULT_MIN_FILES,
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            follow_symlinks: false,
        }
    }
}
