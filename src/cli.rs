use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// purgo - find large files and delete them interactively
#[derive(Parser, Debug)]
#[command(name = "purgo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Write logs to this file (the explorer logs nowhere else)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub explore: ExploreArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the entries of one directory that pass the size threshold
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Print a man page
    Man,
}

#[derive(Args, Debug)]
pub struct ExploreArgs {
    /// Directory to explore
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Minimum file size to display, in bytes or with a unit (e.g. 500K, 1MB)
    #[arg(short = 's', long, value_name = "SIZE")]
    pub min_size: Option<String>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Directory to list
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Minimum file size to display, in bytes or with a unit (e.g. 500K, 1MB)
    #[arg(short = 's', long, value_name = "SIZE")]
    pub min_size: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
