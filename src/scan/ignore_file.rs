//! Loading the project-local ignore file

use super::fs::FileSystem;
use super::patterns::IgnorePatterns;
use std::io;
use std::path::Path;

/// Read `<workspace_root>/<file_name>` into an [`IgnorePatterns`].
///
/// Returns `None` when the file does not exist, which disables filtering.
/// Any other read failure is logged and also disables filtering.
pub fn load_ignore_file<F: FileSystem + ?Sized>(
    fs: &F,
    workspace_root: &Path,
    file_name: &str,
) -> Option<IgnorePatterns> {
    let path = workspace_root.join(file_name);
    match fs.read_file(&path) {
        Ok(bytes) => {
            let patterns = IgnorePatterns::parse(&String::from_utf8_lossy(&bytes));
            tracing::debug!(
                "Found {} file, applying {} ignore patterns",
                path.display(),
                patterns.len()
            );
            Some(patterns)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => {
            tracing::warn!("Error loading {} file: {}", path.display(), e);
            None
        }
    }
}
