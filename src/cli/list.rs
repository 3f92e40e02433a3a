//! List command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::{Session, WorkspaceArgs};
use crate::scan::{load_ignore_file, FileDiscovery, LocalFs};
use crate::utils::relative_display;

#[derive(Args)]
pub struct ListArgs {
    /// Files and directories to expand (default: current directory)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    /// Print absolute paths instead of workspace-relative ones
    #[arg(long)]
    pub absolute: bool,
}

pub fn run(args: ListArgs) -> Result<()> {
    let session = Session::open(&args.workspace, None)?;
    let roots = session.roots(&args.paths);
    let fs = LocalFs::new().follow_symlinks(session.config.follow_symlinks);

    let patterns = load_ignore_file(&fs, &session.workspace_root, &session.config.ignore_file);
    let discovery = FileDiscovery::new(&fs)
        .with_optional_ignore(patterns.as_ref(), &session.workspace_root)
        .collect_all(&roots);

    for file in &discovery.files {
        if args.absolute {
            println!("{}", file.display());
        } else {
            println!("{}", relative_display(&session.workspace_root, file));
        }
    }

    if discovery.files.is_empty() && !discovery.skipped.is_empty() {
        anyhow::bail!("No files found ({} paths could not be read)", discovery.skipped.len());
    }
    Ok(())
}
