//! AppleScript backend for macOS.
//!
//! Each dialog is a short script run with `osascript -e`. The script catches
//! error -128 (user cancelled) itself, so a cancel prints nothing.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::backend::FileDialogs;
use crate::core::{DialogMode, DialogRequest, DirectoryState, FileFilter, StartLocation};
use crate::error::{DialogError, Result};
use crate::util::process::{CommandRunner, SystemRunner};

/// Interpreter used when nothing else is configured.
pub const DEFAULT_INTERPRETER: &str = "osascript";

const HEADER: &str = "tell application \"Finder\"\nactivate\ntry\nPOSIX path of ( ";
const FOOTER: &str = ")\non error number -128\nend try\nend tell";

/// Quote `text` as an AppleScript string literal.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Assemble the script for `request`.
///
/// Only the open dialog takes a type filter, and only the first one; the
/// save and folder commands have no `of type` parameter.
pub fn build_script(request: &DialogRequest, start: Option<&StartLocation>) -> String {
    let mut script = String::from(HEADER);

    script.push_str(match request.mode {
        DialogMode::OpenFile => "choose file ",
        DialogMode::SaveFile => "choose file name ",
        DialogMode::ChooseFolder => "choose folder ",
    });

    if let Some(title) = request.title() {
        script.push_str(&format!("with prompt {} ", quote(title)));
    }

    if let Some(start) = start {
        let dir = start.directory.display().to_string();
        script.push_str(&format!("default location {} ", quote(&dir)));

        if request.mode.is_save() {
            if let Some(ref name) = start.file_name {
                script.push_str(&format!("default name {} ", quote(&name.to_string_lossy())));
            }
        }
    }

    if request.mode == DialogMode::OpenFile {
        if let Some(filter) = request.filters.first() {
            let mut items = vec![quote(filter.label())];
            items.extend(filter.extensions().iter().map(|e| quote(e)));
            script.push_str(&format!("of type {{{}}} ", items.join(",")));
        }
    }

    script.push_str(FOOTER);
    script
}

/// Dialogs shown by running AppleScript through `osascript`.
pub struct AppleScriptDialogs {
    interpreter: String,
    runner: Arc<dyn CommandRunner>,
    state: DirectoryState,
}

impl AppleScriptDialogs {
    pub fn new(interpreter: impl Into<String>, current_directory: Option<&Path>) -> Self {
        Self::with_runner(interpreter, current_directory, Arc::new(SystemRunner))
    }

    pub fn with_runner(
        interpreter: impl Into<String>,
        current_directory: Option<&Path>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        AppleScriptDialogs {
            interpreter: interpreter.into(),
            runner,
            state: DirectoryState::new(current_directory),
        }
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    fn show(
        &mut self,
        mode: DialogMode,
        title: Option<&str>,
        filters: &[FileFilter],
    ) -> Result<Option<PathBuf>> {
        let start = self.state.start_location();
        let request = DialogRequest::new(
            mode,
            title,
            filters,
            start.as_ref().map(|s| s.directory.as_path()),
        );
        let script = build_script(&request, start.as_ref());
        tracing::trace!("applescript:\n{}", script);

        let argv = [self.interpreter.clone(), "-e".to_string(), script];
        let outcome = self.runner.run(&argv)?;
        if outcome.is_failure() {
            return Err(DialogError::Subprocess {
                program: self.interpreter.clone(),
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

impl FileDialogs for AppleScriptDialogs {
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
