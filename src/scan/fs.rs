//! Filesystem capability used by discovery, binary detection and ignore loading.
//!
//! Discovery never touches `std::fs` directly. [`LocalFs`] is the real disk,
//! [`MemoryFs`] is an in-memory tree for tests and failure injection.

use crate::domain::EntryKind;
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// A direct child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: OsString,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn new(name: impl Into<OsString>, kind: EntryKind) -> Self {
        Self { name: name.into(), kind }
    }
}

/// The host operations discovery depends on.
///
/// Implementations must be shareable across the threads that visit sibling
/// directories concurrently.
pub trait FileSystem: Sync {
    /// Kind of the entry at `path`, following symlinks.
    fn stat(&self, path: &Path) -> io::Result<EntryKind>;

    /// Direct children of `path`, in the order discovery should report them.
    fn list_directory(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Full contents of the file at `path`.
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Identity of the directory at `path` after resolving links.
    ///
    /// Discovery compares it against the directories above `path` to stop
    /// at link cycles. Backends without links return `path` unchanged.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        Ok(path.to_path_buf())
    }

    /// At most `max_bytes` leading bytes of the file at `path`.
    fn read_prefix(&self, path: &Path, max_bytes: usize) -> io::Result<Vec<u8>> {
        let mut bytes = self.read_file(path)?;
        bytes.truncate(max_bytes);
        Ok(bytes)
    }
}

/// The local disk.
///
/// Listings are sorted by name so repeated walks report the same order.
/// Symbolic links inside a listing are skipped unless `follow_symlinks` is
/// set; a root passed to [`FileSystem::stat`] is always resolved.
#[derive(Debug, Clone, Default)]
pub struct LocalFs {
    follow_symlinks: bool,
}

impl LocalFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to follow symbolic links found while listing
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}

fn kind_of(metadata: &fs::Metadata, path: &Path) -> io::Result<EntryKind> {
    if metadata.is_dir() {
        Ok(EntryKind::Directory)
    } else if metadata.is_file() {
        Ok(EntryKind::File)
    } else {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("not a regular file or directory: {}", path.display()),
        ))
    }
}

impl FileSystem for LocalFs {
    fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        let metadata = fs::metadata(path)?;
        kind_of(&metadata, path)
    }

    fn list_directory(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let file_type = entry.file_type()?;

            let kind = if file_type.is_symlink() {
                if !self.follow_symlinks {
                    tracing::debug!("Skipping symlink {}", entry.path().display());
                    continue;
                }
                match fs::metadata(entry.path()).and_then(|m| kind_of(&m, &entry.path())) {
                    Ok(kind) => kind,
                    Err(e) => {
                        tracing::debug!(
                            "Skipping dangling symlink {}: {}",
                            entry.path().display(),
                            e
                        );
                        continue;
                    }
                }
            } else if file_type.is_dir() {
                EntryKind::Directory
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                continue;
            };

            entries.push(DirEntry::new(entry.file_name(), kind));
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        // Without followed links a listing cannot lead back up the tree.
        if self.follow_symlinks {
            fs::canonicalize(path)
        } else {
            Ok(path.to_path_buf())
        }
    }

    fn read_prefix(&self, path: &Path, max_bytes: usize) -> io::Result<Vec<u8>> {
        let file = fs::File::open(path)?;
        // Grows with the bytes read; `max_bytes` may be far larger than the file.
        let mut sample = Vec::new();
        file.take(max_bytes as u64).read_to_end(&mut sample)?;
        Ok(sample)
    }
}

#[derive(Debug, Clone)]
enum MemoryNode {
    File(Vec<u8>),
    Directory(Vec<DirEntry>),
}

/// An in-memory filesystem.
///
/// Directory listings keep insertion order. Paths passed to [`MemoryFs::deny`]
/// fail every operation with `PermissionDenied`, and [`MemoryFs::detach`]
/// drops a node while leaving it listed in its parent, the way an entry
/// deleted between a listing and a stat looks on disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    nodes: BTreeMap<PathBuf, MemoryNode>,
    denied: BTreeSet<PathBuf>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating missing parent directories.
    ///
    /// An existing file is overwritten. A path that is already a directory is
    /// left untouched.
    pub fn add_file(&mut self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) {
        let path = path.as_ref();
        let contents = contents.into();
        match self.nodes.get_mut(path) {
            Some(MemoryNode::File(existing)) => {
                *existing = contents;
                return;
            }
            Some(MemoryNode::Directory(_)) => {
                tracing::warn!("Not replacing directory {} with a file", path.display());
                return;
            }
            None => {}
        }
        self.nodes.insert(path.to_path_buf(), MemoryNode::File(contents));
        self.link(path, EntryKind::File);
    }

    /// Add an (empty) directory, creating missing parents.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        self.ensure_dir(path.as_ref());
    }

    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> Self {
        self.add_file(path, contents);
        self
    }

    /// Make every operation on `path` fail with `PermissionDenied`.
    pub fn deny(&mut self, path: impl AsRef<Path>) {
        self.denied.insert(path.as_ref().to_path_buf());
    }

    /// Remove the node at `path` but keep its entry in the parent listing.
    pub fn detach(&mut self, path: impl AsRef<Path>) {
        self.nodes.remove(path.as_ref());
    }

    fn ensure_dir(&mut self, path: &Path) {
        if self.nodes.contains_key(path) {
            return;
        }
        self.nodes.insert(path.to_path_buf(), MemoryNode::Directory(Vec::new()));
        self.link(path, EntryKind::Directory);
    }

    fn link(&mut self, path: &Path, kind: EntryKind) {
        let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
        let (Some(parent), Some(name)) = (parent, path.file_name()) else {
            return;
        };
        self.ensure_dir(parent);
        if let Some(MemoryNode::Directory(children)) = self.nodes.get_mut(parent) {
            if !children.iter().any(|c| c.name.as_os_str() == name) {
                children.push(DirEntry::new(name, kind));
            }
        }
    }

    fn node(&self, path: &Path) -> io::Result<&MemoryNode> {
        if self.denied.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            ));
        }
        self.nodes.get(path).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("not found: {}", path.display()))
        })
    }
}

impl FileSystem for MemoryFs {
    fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        match self.node(path)? {
            MemoryNode::File(_) => Ok(EntryKind::File),
            MemoryNode::Directory(_) => Ok(EntryKind::Directory),
        }
    }

    fn list_directory(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        match self.node(path)? {
            MemoryNode::Directory(children) => Ok(children.clone()),
            MemoryNode::File(_) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("not a directory: {}", path.display()),
            )),
        }
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        match self.node(path)? {
            MemoryNode::File(contents) => Ok(contents.clone()),
            MemoryNode::Directory(_) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("is a directory: {}", path.display()),
            )),
        }
    }
}
