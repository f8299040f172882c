//! `native-dialogs folder` command

use std::path::Path;

use anyhow::{Context, Result};
use native_dialogs::FileDialogs;

use crate::cli::FolderArgs;
use crate::commands::{open_backend, report};

pub fn execute(args: FolderArgs, config: Option<&Path>) -> Result<()> {
    let mut dialogs = open_backend(config, args.dir)?;

    let result = dialogs
        .select_folder(args.title.as_deref())
        .context("folder dialog failed")?;

    report(result);
    Ok(())
}
