//! `native-dialogs open` and `native-dialogs save` commands

use std::path::Path;

use anyhow::{Context, Result};
use native_dialogs::FileDialogs;

use crate::cli::FileArgs;
use crate::commands::{open_backend, report};

pub fn execute(args: FileArgs, save: bool, config: Option<&Path>) -> Result<()> {
    let mut dialogs = open_backend(config, args.dir)?;
    let title = args.title.as_deref();

    let result = if save {
        dialogs
            .select_new_file(title, &args.filters)
            .context("save dialog failed")?
    } else {
        dialogs
            .select_file(title, &args.filters)
            .context("open dialog failed")?
    };

    report(result);
    Ok(())
}
