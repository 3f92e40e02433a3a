//! multisplit: plan a side-by-side split view of many files
//!
//! Expands the selected files and directories, drops ignored paths and binary
//! content, and lays the survivors out on a near-square grid of editor panes.

use anyhow::Result;

fn main() -> Result<()> {
    multisplit::cli::run()
}
