//! zenity backend for Linux and the BSDs.
//!
//! Arguments are passed as discrete argv entries, never through a shell, so
//! titles and filter labels need no quoting.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::backend::probe::AvailabilityProbe;
use crate::backend::FileDialogs;
use crate::core::{DialogMode, DialogRequest, DirectoryState, FileFilter};
use crate::error::{suggestions, DialogError, Result};
use crate::util::process::{CommandRunner, SystemRunner};

/// Program used when nothing else is configured.
pub const DEFAULT_PROGRAM: &str = "zenity";

/// Dialogs shown by running the `zenity` chooser.
pub struct ZenityDialogs {
    runner: Arc<dyn CommandRunner>,
    probe: AvailabilityProbe,
    state: DirectoryState,
}

impl ZenityDialogs {
    pub fn new(program: impl Into<String>, current_directory: Option<&Path>) -> Self {
        Self::with_runner(program, current_directory, Arc::new(SystemRunner))
    }

    pub fn with_runner(
        program: impl Into<String>,
        current_directory: Option<&Path>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        ZenityDialogs {
            runner,
            probe: AvailabilityProbe::new(program),
            state: DirectoryState::new(current_directory),
        }
    }

    pub fn program(&self) -> &str {
        self.probe.program()
    }

    /// Whether the chooser is installed. Probed once per instance.
    pub fn is_available(&self) -> bool {
        self.probe.is_available(self.runner.as_ref())
    }

    /// Full argv for `request`, program first.
    pub fn build_args(&self, request: &DialogRequest) -> Vec<String> {
        let mut args = vec![self.program().to_string(), "--file-selection".to_string()];

        if request.mode.is_directory() {
            args.push("--directory".to_string());
        }
        if request.mode.is_save() {
            args.push("--save".to_string());
            args.push("--confirm-overwrite".to_string());
        }
        if let Some(title) = request.title() {
            args.push(format!("--title={}", title));
        }
        if let Some(ref dir) = request.initial_directory {
            args.push(format!("--filename={}", directory_argument(dir)));
        }
        args.extend(request.filters.iter().map(file_filter_argument));

        args
    }

    fn show(
        &mut self,
        mode: DialogMode,
        title: Option<&str>,
        filters: &[FileFilter],
    ) -> Result<Option<PathBuf>> {
        if !self.is_available() {
            let suggestion = if self.program() == DEFAULT_PROGRAM {
                suggestions::INSTALL_ZENITY
            } else {
                suggestions::CHECK_CHOOSER_PATH
            };
            return Err(DialogError::unavailable(self.program(), suggestion));
        }

        let start = self.state.start_location().map(|s| s.directory);
        let request = DialogRequest::new(mode, title, filters, start.as_deref());
        let argv = self.build_args(&request);

        let outcome = self.runner.run(&argv)?;
        if outcome.is_failure() {
            return Err(DialogError::Subprocess {
                program: self.program().to_string(),
                message: outcome.stderr,
            });
        }
        if outcome.stdout.is_empty() {
            tracing::debug!("{:?} dialog cancelled", mode);
            return Ok(None);
        }

        let path = PathBuf::from(outcome.stdout);
        self.state.advance(&path, mode);
        Ok(Some(path))
    }
}

/// `--filename` needs a trailing separator to open inside a directory.
fn directory_argument(dir: &Path) -> String {
    let mut text = dir.display().to_string();
    if !text.ends_with(std::path::MAIN_SEPARATOR) {
        text.push(std::path::MAIN_SEPARATOR);
    }
    text
}

/// `--file-filter=Label | *.a *.b`
fn file_filter_argument(filter: &FileFilter) -> String {
    let patterns = filter.patterns().collect::<Vec<_>>().join(" ");
    format!("--file-filter={} | {}", filter.label(), patterns)
}

impl FileDialogs for ZenityDialogs {
    fn select_file(&mut self, title: Option<&str>, filters: &[FileFilter]) -> Result<Option<PathBuf>> {
        self.show(DialogMode::OpenFile, title, filters)
    }

    fn select_new_file(
        &mut self,
        title: Option<&str>,
        filters: &[FileFilter],
    ) -> Result<Option<PathBuf>> {
        self.show(DialogMode::SaveFile, title, filters)
    }

    fn select_folder(&mut self, title: Option<&str>) -> Result<Option<PathBuf>> {
        self.show(DialogMode::ChooseFolder, title, &[])
    }

    fn set_current_directory(&mut self, path: &Path) {
        self.state.set(path);
    }

    fn current_directory(&self) -> Option<&Path> {
        self.state.get()
    }
}
