//! Path filtering and file discovery
//!
//! [`IgnorePatterns`] decides whether a workspace-relative path is ignored;
//! [`FileDiscovery`] walks selected roots through a [`FileSystem`] and prunes
//! what the patterns reject.

pub mod discovery;
pub mod fs;
pub mod ignore_file;
pub mod patterns;

pub use discovery::{Discovery, DiscoveryError, FileDiscovery};
pub use fs::{DirEntry, FileSystem, LocalFs, MemoryFs};
pub use ignore_file::load_ignore_file;
pub use patterns::IgnorePatterns;
