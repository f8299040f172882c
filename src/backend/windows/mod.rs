//! Win32 backend.
//!
//! Open and save go through `GetOpenFileNameW` / `GetSaveFileNameW`, folders
//! through `SHBrowseForFolderW`. Each call walks
//! `Idle -> ParamsBuilt -> DialogShown -> {Cancelled | Selected | Failed}`
//! exactly once; nothing is retried.
//!
//! The entry points sit behind [`NativeDialogApi`] so the state handling
//! can be exercised without a desktop.

pub mod callback;
pub mod params;
#[cfg(windows)]
pub mod win32;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::backend::FileDialogs;
use crate::core::{DialogMode, DialogRequest, DirectoryState, FileFilter};
use crate::error::{DialogError, Result};

pub use callback::{BrowseEvent, FolderPreselect, PostedMessage};
pub use params::{BrowseParams, NativeErrorCode, OpenFileParams, WindowHandle, MAX_PATH};

/// Opaque shell item identifier (`PIDLIST_ABSOLUTE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemId(pub usize);

/// The native entry points the backend depends on.
pub trait NativeDialogApi: Send + Sync {
    /// `FindWindowW` by class name.
    fn find_window(&self, class_name: &str) -> Option<WindowHandle>;

    /// `GetOpenFileNameW`; true when the user accepted.
    fn open_file_dialog(&self, params: &mut OpenFileParams) -> bool;

    /// `GetSaveFileNameW`; true when the user accepted.
    fn save_file_dialog(&self, params: &mut OpenFileParams) -> bool;

    /// `CommDlgExtendedError` after a failed open/save call.
    fn extended_error(&self) -> NativeErrorCode;

    /// `SHBrowseForFolderW`; `None` when the user cancelled.
    fn browse_for_folder(&self, params: &BrowseParams) -> Option<ItemId>;

    /// `SHGetPathFromIDListW` into a buffer of at least `MAX_PATH` units.
    fn path_from_item(&self, item: ItemId, buffer: &mut [u16]) -> bool;

    /// `CoTaskMemFree` for an item returned by `browse_for_folder`.
    fn free_item(&self, item: ItemId);

    /// `GetLastError` after a failed shell call.
    fn last_error(&self) -> NativeErrorCode;
}

/// Releases a shell item when dropped.
struct ItemGuard<'a> {
    api: &'a dyn NativeDialogApi,
    item: ItemId,
}

impl Drop for ItemGuard<'_> {
    fn drop(&mut self) {
        self.api.free_item(self.item);
    }
}

/// Dialogs backed by the Win32 common dialog library.
pub struct WindowsDialogs {
    api: Arc<dyn NativeDialogApi>,
    owner_window_class: Option<String>,
    state: DirectoryState,
}

impl WindowsDialogs {
    /// Use the real Win32 entry points.
    #[cfg(windows)]
    pub fn new(owner_window_class: Option<String>, current_directory: Option<&Path>) -> Self {
        Self::with_api(Arc::new(win32::Win32Api), owner_window_class, current_directory)
    }

    pub fn with_api(
        api: Arc<dyn NativeDialogApi>,
        owner_window_class: Option<String>,
        current_directory: Option<&Path>,
    ) -> Self {
        WindowsDialogs {
            api,
            owner_window_class,
            state: DirectoryState::new(current_directory),
        }
    }

    fn owner_window(&self) -> Option<WindowHandle> {
        let class = self.owner_window_class.as_deref()?;
        let handle = self.api.find_window(class);
        if handle.is_none() {
            tracing::debug!("no window of class `{}`; dialog will be unowned", class);
        }
        handle
    }

    fn show_file_dialog(
        &mut self,
        mode: DialogMode,
        title: Option<&str>,
        filters: &[FileFilter],
    ) -> Result<Option<PathBuf>> {
        let start = self.state.start_location().map(|s| s.directory);
        let request = DialogRequest::new(mode, title, filters, start.as_deref());
        let mut params = OpenFileParams::build(&request, self.owner_window());

        let (operation, accepted) = if mode.is_save() {
            ("GetSaveFileNameW", self.api.save_file_dialog(&mut params))
        } else {
            ("GetOpenFileNameW", self.api.open_file_dialog(&mut params))
        };

        if accepted {
            let Some(path) = params.selected_path() else {
                tracing::warn!("{} succeeded but returned an empty path", operation);
                return Ok(None);
            };
            self.state.advance(&path, mode);
            return Ok(Some(path));
        }

        let code = self.api.extended_error();
        if code.is_cancel() {
            tracing::debug!("{} cancelled", operation);
            return Ok(None);
        }

        tracing::debug!("{} failed: {}", operation, code);
        Err(DialogError::Native { operation, code })
    }
}

impl FileDialogs for WindowsDialogs {
    fn select_file(&mut self, title: Option<&str>, filters: &[FileFilter]) -> Result<Option<PathBuf>> {
        self.show_file_dialog(DialogMode::OpenFile, title, filters)
    }

    fn select_new_file(
        &mut self,
        title: Option<&str>,
        filters: &[FileFilter],
    ) -> Result<Option<PathBuf>> {
        self.show_file_dialog(DialogMode::SaveFile, title, filters)
    }

    fn select_folder(&mut self, title: Option<&str>) -> Result<Option<PathBuf>> {
        let start = self.state.start_location().map(|s| s.directory);
        let request = DialogRequest::new(DialogMode::ChooseFolder, title, &[], start.as_deref());
        let params = BrowseParams::build(&request, self.owner_window());
        tracing::debug!("browsing for folder from {:?}", params.preselect_path());

        let Some(item) = self.api.browse_for_folder(&params) else {
            tracing::debug!("SHBrowseForFolderW cancelled");
            return Ok(None);
        };
        let guard = ItemGuard {
            api: self.api.as_ref(),
            item,
        };

        let mut buffer = vec![0u16; MAX_PATH];
        if !guard.api.path_from_item(guard.item, &mut buffer) {
            let code = guard.api.last_error();
            return Err(DialogError::Native {
                operation: "SHGetPathFromIDListW",
                code,
            });
        }
        drop(guard);

        let path = params::from_wide(&buffer);
        self.state.advance(&path, DialogMode::ChooseFolder);
        Ok(Some(path))
    }

    fn set_current_directory(&mut self, path: &Path) {
        self.state.set(path);
    }

    fn current_directory(&self) -> Option<&Path> {
        self.state.get()
    }
}
