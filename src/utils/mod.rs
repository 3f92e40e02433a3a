//! Small shared helpers

pub mod binary;
pub mod paths;

pub use binary::{is_binary_file, is_binary_sample};
pub use paths::{normalize_path, relative_display, relative_path};
