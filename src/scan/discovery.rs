//! Recursive file discovery with ignore-rule pruning

use super::fs::FileSystem;
use super::patterns::IgnorePatterns;
use crate::domain::EntryKind;
use crate::utils::relative_display;
use rayon::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A path discovery could not look at.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Failed to stat {}: {source}", .path.display())]
    Stat { path: PathBuf, source: io::Error },

    #[error("Failed to read directory {}: {source}", .path.display())]
    ReadDir { path: PathBuf, source: io::Error },

    #[error(
        "Link cycle at {}: resolves to enclosing directory {}",
        .path.display(),
        .target.display()
    )]
    Cycle { path: PathBuf, target: PathBuf },
}

impl DiscoveryError {
    pub fn path(&self) -> &Path {
        match self {
            DiscoveryError::Stat { path, .. }
            | DiscoveryError::ReadDir { path, .. }
            | DiscoveryError::Cycle { path, .. } => path,
        }
    }
}

/// Files found under one or more roots, plus the subtrees that were skipped.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Pre-order, in listing order.
    pub files: Vec<PathBuf>,
    pub skipped: Vec<DiscoveryError>,
}

impl Discovery {
    fn file(path: &Path) -> Self {
        Self { files: vec![path.to_path_buf()], skipped: Vec::new() }
    }

    fn skipped(error: DiscoveryError) -> Self {
        Self { files: Vec::new(), skipped: vec![error] }
    }

    fn append(&mut self, other: Discovery) {
        self.files.extend(other.files);
        self.skipped.extend(other.skipped);
    }
}

/// Walks roots through a [`FileSystem`], consulting optional ignore rules.
///
/// Sibling entries are visited in parallel; results are merged back in
/// listing order, so output is identical to a sequential pre-order walk.
pub struct FileDiscovery<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    ignore: Option<(&'a IgnorePatterns, &'a Path)>,
}

impl<'a, F: FileSystem + ?Sized> FileDiscovery<'a, F> {
    /// Create a discovery with no ignore filtering.
    pub fn new(fs: &'a F) -> Self {
        Self { fs, ignore: None }
    }

    /// Filter with `patterns`, matching paths relative to `base_dir`.
    pub fn with_ignore(mut self, patterns: &'a IgnorePatterns, base_dir: &'a Path) -> Self {
        self.ignore = Some((patterns, base_dir));
        self
    }

    /// Same as [`FileDiscovery::with_ignore`], for callers holding an optional matcher.
    pub fn with_optional_ignore(
        self,
        patterns: Option<&'a IgnorePatterns>,
        base_dir: &'a Path,
    ) -> Self {
        match patterns {
            Some(patterns) => self.with_ignore(patterns, base_dir),
            None => self,
        }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        self.ignore.is_some_and(|(patterns, base_dir)| {
            let rel_path = relative_display(base_dir, path);
            match patterns.matching_pattern(&rel_path) {
                Some(pattern) => {
                    tracing::debug!("Ignoring {} (matched '{}')", rel_path, pattern);
                    true
                }
                None => false,
            }
        })
    }

    /// Collect every file under `root`.
    ///
    /// A root that is a file yields itself unless ignored. A root directory is
    /// never tested against the rules itself; its child directories are, and
    /// an ignored child is pruned without being listed. A root that cannot be
    /// stat'd or listed is an error; failures below the root are recorded in
    /// [`Discovery::skipped`] and the walk continues. A directory that
    /// resolves to one of its own ancestors is recorded as a
    /// [`DiscoveryError::Cycle`] and not entered.
    pub fn collect(&self, root: &Path) -> Result<Discovery, DiscoveryError> {
        self.visit(root, &[])
    }

    /// `ancestors` holds the canonical identities of the directories above `root`.
    fn visit(&self, root: &Path, ancestors: &[PathBuf]) -> Result<Discovery, DiscoveryError> {
        let kind = self
            .fs
            .stat(root)
            .map_err(|source| DiscoveryError::Stat { path: root.to_path_buf(), source })?;

        match kind {
            EntryKind::File => {
                if self.is_ignored(root) {
                    Ok(Discovery::default())
                } else {
                    Ok(Discovery::file(root))
                }
            }
            EntryKind::Directory => {
                let identity = self
                    .fs
                    .canonicalize(root)
                    .map_err(|source| DiscoveryError::Stat { path: root.to_path_buf(), source })?;
                if ancestors.contains(&identity) {
                    return Err(DiscoveryError::Cycle {
                        path: root.to_path_buf(),
                        target: identity,
                    });
                }
                let mut chain = ancestors.to_vec();
                chain.push(identity);

                let entries = self.fs.list_directory(root).map_err(|source| {
                    DiscoveryError::ReadDir { path: root.to_path_buf(), source }
                })?;

                // Indexed collect keeps listing order regardless of completion order.
                let children: Vec<Discovery> = entries
                    .par_iter()
                    .map(|entry| {
                        let child = root.join(&entry.name);
                        if entry.kind.is_dir() && self.is_ignored(&child) {
                            return Discovery::default();
                        }
                        self.visit(&child, &chain).unwrap_or_else(|e| {
                            tracing::warn!("Skipping {}", e);
                            Discovery::skipped(e)
                        })
                    })
                    .collect();

                let mut found = Discovery::default();
                for child in children {
                    found.append(child);
                }
                Ok(found)
            }
        }
    }

    /// Collect every root in order, skipping (and recording) roots that fail.
    pub fn collect_all<P: AsRef<Path>>(&self, roots: &[P]) -> Discovery {
        let mut found = Discovery::default();
        for root in roots {
            match self.collect(root.as_ref()) {
                Ok(discovered) => found.append(discovered),
                Err(e) => {
                    tracing::warn!("Skipping selection {}", e);
                    found.skipped.push(e);
                }
            }
        }
        found
    }
}
