//! Per-call dialog parameters.

use std::path::{Path, PathBuf};

use crate::core::filter::FileFilter;

/// Which kind of dialog to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogMode {
    /// Pick an existing file.
    OpenFile,
    /// Pick a file name to save to.
    SaveFile,
    /// Pick a directory.
    ChooseFolder,
}

impl DialogMode {
    pub fn is_directory(self) -> bool {
        self == DialogMode::ChooseFolder
    }

    pub fn is_save(self) -> bool {
        self == DialogMode::SaveFile
    }
}

/// Everything a backend needs to show one dialog.
///
/// Built fresh for every call and dropped when the call returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest {
    pub mode: DialogMode,
    pub title: Option<String>,
    pub filters: Vec<FileFilter>,
    pub initial_directory: Option<PathBuf>,
}

impl DialogRequest {
    /// Create a request; an empty title counts as no title and filters
    /// without extensions are left out.
    pub fn new(
        mode: DialogMode,
        title: Option<&str>,
        filters: &[FileFilter],
        initial_directory: Option<&Path>,
    ) -> Self {
        DialogRequest {
            mode,
            title: title.filter(|t| !t.is_empty()).map(str::to_string),
            filters: filters.iter().filter(|f| !f.is_empty()).cloned().collect(),
            initial_directory: initial_directory.map(Path::to_path_buf),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}
