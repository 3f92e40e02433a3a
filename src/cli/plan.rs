//! Plan command implementation

use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use super::utils::{Session, WorkspaceArgs};
use crate::plan::SplitPlanner;
use crate::render::{render_json, render_text};
use crate::scan::LocalFs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args)]
pub struct PlanArgs {
    /// Files and directories to open (default: current directory)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    /// Maximum number of panes to open
    #[arg(short = 'm', long, value_name = "N")]
    pub max_files: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn run(args: PlanArgs) -> Result<()> {
    let session = Session::open(&args.workspace, args.max_files)?;
    let roots = session.roots(&args.paths);
    let fs = LocalFs::new().follow_symlinks(session.config.follow_symlinks);

    let plan = SplitPlanner::new(&fs, &session.config, &session.workspace_root).plan(&roots)?;

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&plan)),
        OutputFormat::Json => println!("{}", render_json(&plan)?),
    }
    Ok(())
}
