//! Directory memory shared by successive dialogs of one provider.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::core::request::DialogMode;
use crate::util::fs::{absolute_path, containing_directory};

/// Where the next dialog should open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartLocation {
    /// An existing directory.
    pub directory: PathBuf,
    /// Set when the stored path turned out to be a file.
    pub file_name: Option<OsString>,
}

/// The directory the next dialog opens in.
///
/// Invariant: when set, `current` names a directory, never a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryState {
    current: Option<PathBuf>,
}

impl DirectoryState {
    /// Seed the state; a file path is replaced by its parent.
    pub fn new(initial: Option<&Path>) -> Self {
        let mut state = DirectoryState::default();
        if let Some(path) = initial {
            state.set(path);
        }
        state
    }

    /// Store `path`, or its parent if it is not a directory.
    pub fn set(&mut self, path: &Path) {
        self.current = containing_directory(path);
        tracing::debug!("current directory: {:?}", self.current);
    }

    pub fn get(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    /// Record a successful selection so the next dialog opens next to it.
    pub fn advance(&mut self, selected: &Path, mode: DialogMode) {
        if mode.is_directory() {
            self.current = Some(absolute_path(selected));
            tracing::debug!("current directory: {:?}", self.current);
        } else if let Some(parent) = selected.parent() {
            self.set(parent);
        }
    }

    /// Re-check the stored path against the filesystem.
    ///
    /// The directory may have been replaced by a file or removed since it was
    /// stored; a file yields its parent and its name, a missing path yields `None`.
    pub fn start_location(&self) -> Option<StartLocation> {
        let current = self.current.as_ref()?;
        if current.is_dir() {
            return Some(StartLocation {
                directory: current.clone(),
                file_name: None,
            });
        }
        if current.is_file() {
            let directory = current.parent().filter(|p| p.is_dir())?.to_path_buf();
            return Some(StartLocation {
                directory,
                file_name: current.file_name().map(|n| n.to_os_string()),
            });
        }
        None
    }
}
