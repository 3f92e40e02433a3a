//! Path normalization

use std::path::{Component, Path, PathBuf};

pub fn normalize_path(path: &str) -> String {
    // Convert backslashes to forward slashes and normalize
    path.replace('\\', "/")
}

/// Express `path` relative to `base`, walking up with `..` where the two
/// diverge. Both are compared component-wise without touching the filesystem.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix(base) {
        return stripped.to_path_buf();
    }

    let base_parts: Vec<Component<'_>> = base.components().collect();
    let path_parts: Vec<Component<'_>> = path.components().collect();
    let shared = base_parts.iter().zip(&path_parts).take_while(|(a, b)| a == b).count();

    let mut relative = PathBuf::new();
    for _ in shared..base_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[shared..] {
        relative.push(part.as_os_str());
    }
    relative
}

/// Relative path from `base` to `path`, as the forward-slash string the
/// ignore matcher expects.
pub fn relative_display(base: &Path, path: &Path) -> String {
    normalize_path(&relative_path(base, path).to_string_lossy())
}
