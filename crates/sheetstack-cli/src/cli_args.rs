//! CLI argument definitions.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types live here,
//! keeping `main.rs` focused on dispatch.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// sheetstack - consolidate sprite animation sheets into one packed sheet
#[derive(Parser)]
#[command(name = "sheetstack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Concatenate every animation from every input and repack all frames
    /// into one image (timing untouched)
    Merge {
        #[command(flatten)]
        args: ComposeArgs,
    },

    /// Time-synchronize animations sharing a state name across inputs and
    /// composite them layer-on-layer into one merged timeline per state
    Overlay {
        #[command(flatten)]
        args: ComposeArgs,
    },
}

/// Arguments shared by both modes.
#[derive(Args)]
pub struct ComposeArgs {
    /// Input files: .png images and .animation/.anim sheets, paired by stem
    /// (hero.png + hero.animation form one source)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output image path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Output sheet path (default: the output image path with an
    /// .animation extension)
    #[arg(long)]
    pub sheet: Option<PathBuf>,

    /// Skip the duplicate-frame consolidation pass
    #[arg(long)]
    pub no_dedup: bool,

    /// Print a machine-readable JSON report to stdout (no colored output)
    #[arg(long)]
    pub json: bool,

    /// Suppress human-readable output
    #[arg(short, long)]
    pub quiet: bool,
}
