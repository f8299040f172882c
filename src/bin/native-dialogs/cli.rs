//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use native_dialogs::FileFilter;

/// native-dialogs - native file and folder pickers
#[derive(Parser)]
#[command(name = "native-dialogs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Read settings from this file instead of the global and project configs
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pick an existing file
    Open(FileArgs),

    /// Pick a file name to save to
    Save(FileArgs),

    /// Pick a directory
    Folder(FolderArgs),

    /// Show a folder, open and save dialog in turn
    Demo(DemoArgs),

    /// Show which backend would be used
    Info(InfoArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct FileArgs {
    /// Dialog title
    #[arg(short, long)]
    pub title: Option<String>,

    /// File type filter as `Label:ext1,ext2` (repeatable)
    #[arg(short, long = "filter", value_name = "FILTER")]
    pub filters: Vec<FileFilter>,

    /// Directory the dialog opens in
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct FolderArgs {
    /// Dialog title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Directory the dialog opens in
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct DemoArgs {
    /// Directory the first dialog opens in
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct InfoArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
