//! Command implementations

pub mod completions;
pub mod demo;
pub mod folder;
pub mod info;
pub mod open;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use native_dialogs::util::config::{global_config_path, load_config, project_config_path};
use native_dialogs::{Backend, Config, DialogOptions};

/// Settings from `--config`, or merged from the global and project files.
pub fn load_settings(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path);
    }

    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let global = global_config_path();
    Ok(load_config(global.as_deref(), &project_config_path(&cwd)))
}

/// The host backend, with `dir` taking precedence over the configured start.
pub fn open_backend(config_path: Option<&Path>, dir: Option<PathBuf>) -> Result<Backend> {
    let config = load_settings(config_path)?;
    let mut options = DialogOptions::from_config(&config);
    if dir.is_some() {
        options.initial_directory = dir;
    }

    Backend::detect(&options).context("no file dialogs on this host")
}

/// Print a dialog result: the path on stdout, or a note on stderr.
pub fn report(result: Option<PathBuf>) {
    match result {
        Some(path) => println!("{}", path.display()),
        None => eprintln!("cancelled"),
    }
}
