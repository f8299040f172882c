//! `native-dialogs demo` command
//!
//! Walks through all three dialogs on one backend, so each one starts
//! where the previous selection left off.

use std::path::Path;

use anyhow::Result;
use native_dialogs::{FileDialogs, FileFilter};

use crate::cli::DemoArgs;
use crate::commands::open_backend;

pub fn execute(args: DemoArgs, config: Option<&Path>) -> Result<()> {
    let mut dialogs = open_backend(config, args.dir)?;
    let filters = [
        FileFilter::new("Text", ["txt", "md"]),
        FileFilter::new("Audio", ["wav", "flac", "mp3"]),
    ];

    let folder = dialogs.select_folder(Some("Select a folder"))?;
    println!("folder: {}", describe(folder.as_deref()));

    let file = dialogs.select_file(Some("Open a file"), &filters)?;
    println!("open:   {}", describe(file.as_deref()));

    let target = dialogs.select_new_file(Some("Save as"), &filters)?;
    println!("save:   {}", describe(target.as_deref()));

    if let Some(dir) = dialogs.current_directory() {
        println!("next dialog opens in {}", dir.display());
    }

    Ok(())
}

fn describe(path: Option<&Path>) -> String {
    path.map_or_else(|| "(cancelled)".to_string(), |p| p.display().to_string())
}
