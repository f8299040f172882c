//! `native-dialogs info` command

use std::path::{Path, PathBuf};

use anyhow::Result;
use native_dialogs::FileDialogs;
use serde::Serialize;

use crate::cli::InfoArgs;
use crate::commands::open_backend;

#[derive(Debug, Serialize)]
struct BackendInfo {
    backend: &'static str,
    os: &'static str,
    program: Option<String>,
    available: bool,
    initial_directory: Option<PathBuf>,
}

pub fn execute(args: InfoArgs, config: Option<&Path>) -> Result<()> {
    let backend = open_backend(config, None)?;

    let info = BackendInfo {
        backend: backend.name(),
        os: std::env::consts::OS,
        program: backend.program().map(str::to_string),
        available: backend.is_available(),
        initial_directory: backend.current_directory().map(Path::to_path_buf),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Backend:    {}", info.backend);
    println!("Host OS:    {}", info.os);
    if let Some(ref program) = info.program {
        println!("Program:    {}", program);
    }
    println!(
        "Status:     {}",
        if info.available { "available" } else { "not installed" }
    );
    if let Some(ref dir) = info.initial_directory {
        println!("Opens in:   {}", dir.display());
    }

    Ok(())
}
