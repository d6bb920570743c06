use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "chunkdiff",
    about = "Line and character diffs, unified patches, and position mapping",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with [diff] and [patch] settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum SideArg {
    Old,
    New,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print a unified patch from OLD to NEW
    Diff(DiffArgs),
    /// Apply a unified patch to a file
    Apply(ApplyArgs),
    /// Translate a position from one version to the other
    Map(MapArgs),
    /// Recover both versions from a full-context patch
    Split(SplitArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    /// File name written in the patch header (defaults to NEW)
    #[arg(long)]
    pub name: Option<String>,
    /// Lines of context around each change
    #[arg(short = 'U', long)]
    pub context: Option<usize>,
    /// Ignore leading and trailing whitespace when matching lines
    #[arg(long)]
    pub ignore_whitespace: bool,
    /// Give up refining after this many milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
    /// Colorize patch output
    #[arg(long)]
    pub color: bool,
}

#[derive(Args)]
pub struct ApplyArgs {
    pub original: PathBuf,
    pub patch: PathBuf,
    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct MapArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    #[arg(long)]
    pub row: usize,
    #[arg(long, default_value = "0")]
    pub column: usize,
    /// Version the position refers to
    #[arg(long, default_value = "old")]
    pub from: SideArg,
}

#[derive(Args)]
pub struct SplitArgs {
    pub patch: PathBuf,
    #[arg(long)]
    pub old_out: PathBuf,
    #[arg(long)]
    pub new_out: PathBuf,
}
