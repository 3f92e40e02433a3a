//! Split-view planning: discovery, binary filtering, limits and layout

use crate::domain::Config;
use crate::layout::{GridCell, GridLayout};
use crate::scan::{load_ignore_file, FileDiscovery, FileSystem};
use crate::utils::{is_binary_file, relative_display};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why no plan could be made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("No files found to open")]
    NoFilesFound,

    #[error("No text files found to open")]
    NoTextFiles,

    #[error("Need at least {required} text files to open in split view (found {found}).")]
    TooFewFiles { found: usize, required: usize },

    #[error("max_files ({max_files}) must be non-zero and at least min_files ({min_files})")]
    InvalidLimits { min_files: usize, max_files: usize },

    #[error("sample_size must be at least 1 byte")]
    InvalidSampleSize,
}

/// One file and the editor group it opens in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pane {
    pub index: usize,
    pub path: PathBuf,
    pub relative_path: String,
    #[serde(flatten)]
    pub cell: GridCell,
}

/// A path discovery had to skip, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPath {
    pub path: PathBuf,
    pub reason: String,
}

/// Everything needed to lay out a split view.
#[derive(Debug, Clone, Serialize)]
pub struct SplitPlan {
    pub workspace_root: PathBuf,
    /// Ignore file that was applied, if one was found.
    pub ignore_file: Option<PathBuf>,
    pub layout: GridLayout,
    pub panes: Vec<Pane>,
    /// Files left after ignore filtering.
    pub found: usize,
    pub binary_skipped: usize,
    /// Number of text files before capping at `max_files`, when capped.
    pub truncated_from: Option<usize>,
    pub skipped: Vec<SkippedPath>,
}

impl SplitPlan {
    pub fn files(&self) -> impl Iterator<Item = &Path> + '_ {
        self.panes.iter().map(|pane| pane.path.as_path())
    }
}

/// Turns a user selection into a [`SplitPlan`].
pub struct SplitPlanner<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    config: &'a Config,
    workspace_root: &'a Path,
}

impl<'a, F: FileSystem + ?Sized> SplitPlanner<'a, F> {
    pub fn new(fs: &'a F, config: &'a Config, workspace_root: &'a Path) -> Self {
        Self { fs, config, workspace_root }
    }

    /// Plan a split view for the selected files and directories.
    ///
    /// Roots that cannot be read are skipped and reported in
    /// [`SplitPlan::skipped`]; only an empty or too small result is an error.
    pub fn plan<P: AsRef<Path>>(&self, roots: &[P]) -> Result<SplitPlan, PlanError> {
        let min_files = self.config.min_files;
        let max_files = self.config.max_files;
        if max_files == 0 || max_files < min_files {
            return Err(PlanError::InvalidLimits { min_files, max_files });
        }
        if self.config.sample_size == 0 {
            return Err(PlanError::InvalidSampleSize);
        }

        let patterns = load_ignore_file(self.fs, self.workspace_root, &self.config.ignore_file);
        let ignore_file =
            patterns.as_ref().map(|_| self.workspace_root.join(&self.config.ignore_file));

        let discovery = FileDiscovery::new(self.fs)
            .with_optional_ignore(patterns.as_ref(), self.workspace_root)
            .collect_all(roots);

        let skipped: Vec<SkippedPath> = discovery
            .skipped
            .iter()
            .map(|e| SkippedPath { path: e.path().to_path_buf(), reason: e.to_string() })
            .collect();

        let found = discovery.files.len();
        if found == 0 {
            return Err(PlanError::NoFilesFound);
        }

        let mut text_files: Vec<PathBuf> = discovery
            .files
            .into_par_iter()
            .filter(|path| {
                let binary = is_binary_file(self.fs, path, self.config.sample_size);
                if binary {
                    tracing::debug!("Skipping binary file {}", path.display());
                }
                !binary
            })
            .collect();
        let binary_skipped = found - text_files.len();

        if text_files.is_empty() {
            return Err(PlanError::NoTextFiles);
        }
        if text_files.len() < min_files {
            return Err(PlanError::TooFewFiles { found: text_files.len(), required: min_files });
        }

        let mut truncated_from = None;
        if text_files.len() > max_files {
            tracing::warn!(
                "Limiting to {} files ({} found). Use {} to filter unwanted files.",
                max_files,
                text_files.len(),
                self.config.ignore_file
            );
            truncated_from = Some(text_files.len());
            text_files.truncate(max_files);
        }

        let layout = GridLayout::for_count(text_files.len());
        let panes = text_files
            .into_iter()
            .enumerate()
            .map(|(index, path)| Pane {
                index,
                relative_path: relative_display(self.workspace_root, &path),
                path,
                cell: layout.cell(index),
            })
            .collect();

        Ok(SplitPlan {
            workspace_root: self.workspace_root.to_path_buf(),
            ignore_file,
            layout,
            panes,
            found,
            binary_skipped,
            truncated_from,
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{LocalFs, MemoryFs};
    use std::fs;
    use tempfile::TempDir;

    fn workspace() -> MemoryFs {
        MemoryFs::new()
            .with_file("/w/src/a.rs", "fn a() {}")
            .with_file("/w/src/b.rs", "fn b() {}")
            .with_file("/w/logo.png", vec![0u8, 1, 2, 3, 0xFF, 0xFE, 0x89, 0x50])
            .with_file("/w/debug.log", "trace")
    }

    #[test]
    fn test_plan_filters_ignored_and_binary_files() {
        let fs = workspace().with_file("/w/.splitignore", "*.log\n");
        let config = Config::default();
        let plan = SplitPlanner::new(&fs, &config, Path::new("/w")).plan(&["/w"]).unwrap();

        let rel: Vec<&str> = plan.panes.iter().map(|p| p.relative_path.as_str()).collect();
        assert_eq!(rel, vec!["src/a.rs", "src/b.rs", ".splitignore"]);
        assert_eq!(plan.ignore_file, Some(PathBuf::from("/w/.splitignore")));
        assert_eq!(plan.found, 4);
        assert_eq!(plan.binary_skipped, 1);
        assert_eq!(plan.layout, GridLayout { columns: 2, rows: 2 });
        assert_eq!(plan.truncated_from, None);
    }

    #[test]
    fn test_plan_without_ignore_file_keeps_everything_textual() {
        let fs = workspace();
        let config = Config::default();
        let plan = SplitPlanner::new(&fs, &config, Path::new("/w")).plan(&["/w"]).unwrap();

        assert!(plan.ignore_file.is_none());
        assert_eq!(plan.panes.len(), 3);
        assert_eq!(plan.panes[2].path, PathBuf::from("/w/debug.log"));
    }

    #[test]
    fn test_plan_caps_at_max_files() {
        let mut fs = MemoryFs::new();
        for i in 0..40 {
            fs.add_file(format!("/w/f{:02}.txt", i), "text");
        }
        let config = Config::default();
        let plan = SplitPlanner::new(&fs, &config, Path::new("/w")).plan(&["/w"]).unwrap();

        assert_eq!(plan.panes.len(), 32);
        assert_eq!(plan.truncated_from, Some(40));
        assert_eq!(plan.panes[31].path, PathBuf::from("/w/f31.txt"));
        assert_eq!(plan.layout, GridLayout { columns: 6, rows: 6 });
        assert_eq!(plan.panes[31].cell.group, 32);
    }

    #[test]
    fn test_plan_needs_two_text_files() {
        let fs = MemoryFs::new().with_file("/w/only.txt", "x").with_file("/w/bin", vec![0u8; 10]);
        let config = Config::default();
        let err = SplitPlanner::new(&fs, &config, Path::new("/w")).plan(&["/w"]).unwrap_err();
        assert_eq!(err, PlanError::TooFewFiles { found: 1, required: 2 });
    }

    #[test]
    fn test_plan_reports_empty_and_binary_only_selections() {
        let config = Config::default();

        let empty =
            MemoryFs::new().with_file("/w/.splitignore", "*.txt").with_file("/w/a.txt", "a");
        let err =
            SplitPlanner::new(&empty, &config, Path::new("/w")).plan(&["/w/a.txt"]).unwrap_err();
        assert_eq!(err, PlanError::NoFilesFound);

        let binary = MemoryFs::new()
            .with_file("/w/a.bin", vec![0u8; 8])
            .with_file("/w/b.bin", vec![1u8; 8]);
        let err = SplitPlanner::new(&binary, &config, Path::new("/w")).plan(&["/w"]).unwrap_err();
        assert_eq!(err, PlanError::NoTextFiles);
    }

    #[test]
    fn test_plan_skips_missing_roots() {
        let fs = workspace();
        let config = Config::default();
        let plan = SplitPlanner::new(&fs, &config, Path::new("/w"))
            .plan(&["/w/src/a.rs", "/w/gone.rs", "/w/src/b.rs"])
            .unwrap();

        assert_eq!(
            plan.files().collect::<Vec<_>>(),
            vec![Path::new("/w/src/a.rs"), Path::new("/w/src/b.rs")]
        );
        assert_eq!(plan.skipped.len(), 1);
        assert_eq!(plan.skipped[0].path, PathBuf::from("/w/gone.rs"));
    }

    #[test]
    fn test_plan_rejects_inconsistent_limits() {
        let fs = workspace();
        let config = Config { max_files: 1, min_files: 2, ..Config::default() };
        let err = SplitPlanner::new(&fs, &config, Path::new("/w")).plan(&["/w"]).unwrap_err();
        assert_eq!(err, PlanError::InvalidLimits { min_files: 2, max_files: 1 });
    }

    #[test]
    fn test_plan_rejects_zero_sample_size() {
        let fs = workspace();
        let config = Config { sample_size: 0, ..Config::default() };
        let err = SplitPlanner::new(&fs, &config, Path::new("/w")).plan(&["/w"]).unwrap_err();
        assert_eq!(err, PlanError::InvalidSampleSize);
    }

    #[test]
    fn test_plan_on_disk_with_oversized_sample() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path();
        fs::write(root.join("a.txt"), "alpha").expect("write a");
        fs::write(root.join("b.txt"), "beta").expect("write b");
        fs::write(root.join("c.bin"), [0u8, 1, 2, 3]).expect("write c");

        let config = Config { sample_size: usize::MAX, ..Config::default() };
        let plan = SplitPlanner::new(&LocalFs::new(), &config, root).plan(&[root]).expect("plan");
        assert_eq!(plan.files().collect::<Vec<_>>(), vec![root.join("a.txt"), root.join("b.txt")]);
        assert_eq!(plan.binary_skipped, 1);
    }
}
