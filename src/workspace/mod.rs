//! Workspace root resolution
//!
//! Ignore rules are matched against paths relative to the workspace root, and
//! the ignore file and config file are looked up there.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Walk up from `start` looking for a directory holding `ignore_file` or `.git`.
///
/// Falls back to `start` when no ancestor qualifies.
pub fn find_workspace_root(start: &Path, ignore_file: &str) -> PathBuf {
    let mut current = start.to_path_buf();
    loop {
        if current.join(ignore_file).is_file() || current.join(".git").exists() {
            if current != start {
                tracing::debug!(
                    "Using workspace root {} (detected from {})",
                    current.display(),
                    start.display()
                );
            }
            return current;
        }
        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }
    tracing::debug!("No workspace marker found; using {} as workspace root", start.display());
    start.to_path_buf()
}

/// Use `explicit` when given (it must be an existing directory), otherwise
/// detect the root from `start`.
pub fn resolve_workspace_root(
    explicit: Option<&Path>,
    start: &Path,
    ignore_file: &str,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        let canonical = path
            .canonicalize()
            .with_context(|| format!("Workspace does not exist: {}", path.display()))?;
        if !canonical.is_dir() {
            anyhow::bail!("Workspace is not a directory: {}", path.display());
        }
        return Ok(canonical);
    }

    let start = start
        .canonicalize()
        .with_context(|| format!("Cannot resolve directory: {}", start.display()))?;
    Ok(find_workspace_root(&start, ignore_file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn find_root_returns_ancestor_with_git() {
        let temp = TempDir::new().expect("tmp");
        let root = temp.path();
        fs::create_dir(root.join(".git")).expect("mkdir .git");
        let subdir = root.join("src").join("lib");
        fs::create_dir_all(&subdir).expect("mkdir subdir");

        assert_eq!(find_workspace_root(&subdir, ".splitignore"), root);
    }

    #[test]
    fn find_root_prefers_nearest_ignore_file() {
        let temp = TempDir::new().expect("tmp");
        let root = temp.path();
        fs::create_dir(root.join(".git")).expect("mkdir .git");
        let pkg = root.join("packages").join("web");
        fs::create_dir_all(pkg.join("src")).expect("mkdir pkg");
        fs::write(pkg.join(".splitignore"), "dist/\n").expect("write ignore");

        assert_eq!(find_workspace_root(&pkg.join("src"), ".splitignore"), pkg);
    }

    #[test]
    fn find_root_returns_start_when_no_marker() {
        let temp = TempDir::new().expect("tmp");
        let dir = temp.path().join("myproject");
        fs::create_dir_all(&dir).expect("mkdir myproject");

        // The temp dir itself may sit under a repository on some machines,
        // so only assert that the result is `dir` or one of its ancestors.
        let found = find_workspace_root(&dir, ".splitignore");
        assert!(dir.starts_with(&found));
    }

    #[test]
    fn resolve_rejects_missing_explicit_workspace() {
        let temp = TempDir::new().expect("tmp");
        let missing = temp.path().join("missing");
        assert!(resolve_workspace_root(Some(&missing), temp.path(), ".splitignore").is_err());
    }

    #[test]
    fn resolve_rejects_file_as_workspace() {
        let temp = TempDir::new().expect("tmp");
        let file = temp.path().join("a.txt");
        fs::write(&file, "a").expect("write");
        assert!(resolve_workspace_root(Some(&file), temp.path(), ".splitignore").is_err());
    }

    #[test]
    fn resolve_uses_explicit_workspace() {
        let temp = TempDir::new().expect("tmp");
        let resolved = resolve_workspace_root(Some(temp.path()), Path::new("."), ".splitignore")
            .expect("resolve");
        assert_eq!(resolved, temp.path().canonicalize().expect("canonical"));
    }
}
