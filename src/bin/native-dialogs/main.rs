//! native-dialogs CLI - show the platform's file dialogs from a terminal

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("native_dialogs=debug")
    } else {
        EnvFilter::new("native_dialogs=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Open(args) => commands::open::execute(args, false, config),
        Commands::Save(args) => commands::open::execute(args, true, config),
        Commands::Folder(args) => commands::folder::execute(args, config),
        Commands::Demo(args) => commands::demo::execute(args, config),
        Commands::Info(args) => commands::info::execute(args, config),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
