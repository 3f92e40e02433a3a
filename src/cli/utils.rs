//! Shared CLI utilities.

use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::{Config, DEFAULT_IGNORE_FILE};
use crate::workspace::resolve_workspace_root;
use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

/// Flags shared by every command that reads a workspace.
#[derive(Args, Debug, Clone)]
pub struct WorkspaceArgs {
    /// Workspace root that ignore rules are relative to (default: detected)
    #[arg(short = 'w', long, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Config file (default: multisplit.toml or .multisplit.yaml in the workspace)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Ignore file name, looked up in the workspace root
    #[arg(long, value_name = "NAME")]
    pub ignore_file: Option<String>,

    /// Follow symbolic links found inside directories
    #[arg(long)]
    pub follow_symlinks: bool,
}

/// The resolved working context of a command.
pub struct Session {
    pub cwd: PathBuf,
    pub workspace_root: PathBuf,
    pub config: Config,
}

impl Session {
    pub fn open(args: &WorkspaceArgs, max_files: Option<usize>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Cannot determine current directory")?;
        let marker = args.ignore_file.as_deref().unwrap_or(DEFAULT_IGNORE_FILE);
        let workspace_root = resolve_workspace_root(args.workspace.as_deref(), &cwd, marker)?;

        let config = load_config(&workspace_root, args.config.as_deref())?;
        let overrides = CliOverrides {
            max_files,
            ignore_file: args.ignore_file.clone(),
            follow_symlinks: args.follow_symlinks,
        };
        let config = merge_cli_with_config(config, &overrides);
        tracing::debug!("Workspace {} with {:?}", workspace_root.display(), config);

        Ok(Self { cwd, workspace_root, config })
    }

    /// Selected paths as absolute paths; an empty selection means the current directory.
    pub fn roots(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        if paths.is_empty() {
            return vec![absolutize(&self.cwd, Path::new("."))];
        }
        paths.iter().map(|p| absolutize(&self.cwd, p)).collect()
    }
}

/// Canonical form of `path` when it exists, otherwise `path` joined onto `cwd`.
pub fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::absolutize;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn absolutize_keeps_missing_paths_under_cwd() {
        let tmp = TempDir::new().expect("tmp");
        let resolved = absolutize(tmp.path(), Path::new("does/not/exist.txt"));
        assert_eq!(resolved, tmp.path().join("does/not/exist.txt"));
    }
}
