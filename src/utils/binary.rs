//! Binary content detection.
//!
//! The classifier samples the leading bytes of a file and counts control
//! bytes that rarely appear in text. Bell (7), the range 9..=14 and escape (27)
//! are deliberately not counted, so terminal-colored logs still read as text.

use crate::scan::FileSystem;
use std::path::Path;

/// Returns `true` for bytes counted against a sample's "textness".
pub fn is_non_printable(byte: u8) -> bool {
    byte == 0 || (byte < 9 && byte != 7) || (byte > 14 && byte < 32 && byte != 27)
}

/// Detect if a byte sample is binary.
///
/// A sample is binary when strictly more than 10% of its bytes are
/// non-printable. An empty sample is text.
pub fn is_binary_sample(sample: &[u8]) -> bool {
    let non_printable = sample.iter().filter(|&&b| is_non_printable(b)).count();
    // non_printable > len * 0.1, kept in integers
    non_printable * 10 > sample.len()
}

/// Detect if a file is binary by sampling at most `sample_size` leading bytes.
///
/// A file that cannot be read is reported as text so it stays in the
/// selection; the caller finds out when it tries to open it.
pub fn is_binary_file<F: FileSystem + ?Sized>(fs: &F, path: &Path, sample_size: usize) -> bool {
    match fs.read_prefix(path, sample_size) {
        Ok(sample) => is_binary_sample(&sample),
        Err(e) => {
            tracing::warn!("Error checking if file is binary: {}: {}", path.display(), e);
            false
        }
    }
}
