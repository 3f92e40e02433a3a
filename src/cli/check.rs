//! Check-ignore command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::{absolutize, Session, WorkspaceArgs};
use crate::scan::{load_ignore_file, LocalFs};
use crate::utils::relative_display;

#[derive(Args)]
pub struct CheckArgs {
    /// Paths to test against the ignore file
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    /// Also print the rule that matched each path
    #[arg(short = 'p', long)]
    pub show_pattern: bool,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let session = Session::open(&args.workspace, None)?;
    let fs = LocalFs::new();

    let Some(patterns) = load_ignore_file(&fs, &session.workspace_root, &session.config.ignore_file)
    else {
        anyhow::bail!(
            "No {} found in {}",
            session.config.ignore_file,
            session.workspace_root.display()
        );
    };

    let mut matched = 0usize;
    for path in &args.paths {
        let rel_path = relative_display(&session.workspace_root, &absolutize(&session.cwd, path));
        if let Some(pattern) = patterns.matching_pattern(&rel_path) {
            matched += 1;
            if args.show_pattern {
                println!("{}\t{}", pattern, rel_path);
            } else {
                println!("{}", rel_path);
            }
        }
    }

    if matched == 0 {
        anyhow::bail!("None of the given paths are ignored");
    }
    Ok(())
}
