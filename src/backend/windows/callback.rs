//! Folder browser callback.
//!
//! `SHBrowseForFolderW` calls back into us while the dialog runs. The only
//! thing we do there is preselect the starting folder once the dialog has
//! finished initializing; any other lifecycle point is ignored.

use std::path::{Path, PathBuf};

use crate::backend::windows::params::to_wide;

/// `WM_USER` from `winuser.h`.
pub const WM_USER: u32 = 0x0400;

/// Callback messages from `shlobj_core.h`.
pub mod bffm {
    use super::WM_USER;

    pub const INITIALIZED: u32 = 1;
    pub const SELCHANGED: u32 = 2;
    pub const VALIDATEFAILEDW: u32 = 4;
    pub const IUNKNOWN: u32 = 5;

    /// Sent to the dialog; `wParam` TRUE means `lParam` is a path string.
    pub const SETSELECTIONW: u32 = WM_USER + 103;
}

/// Lifecycle point reported to the browse callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseEvent {
    Initialized,
    SelectionChanged,
    ValidateFailed,
    Other(u32),
}

impl BrowseEvent {
    pub fn from_message(msg: u32) -> Self {
        match msg {
            bffm::INITIALIZED => BrowseEvent::Initialized,
            bffm::SELCHANGED => BrowseEvent::SelectionChanged,
            bffm::VALIDATEFAILEDW => BrowseEvent::ValidateFailed,
            other => BrowseEvent::Other(other),
        }
    }
}

/// A message the callback wants posted to the dialog window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostedMessage {
    pub message: u32,
    pub wparam: usize,
    pub lparam: isize,
}

/// Starting folder handed to the browse callback through `lpData`.
///
/// Owned by the call that shows the dialog, so the pointer stays valid for
/// as long as the dialog can read it.
#[derive(Debug, Clone)]
pub struct FolderPreselect {
    path: PathBuf,
    wide: Vec<u16>,
}

impl FolderPreselect {
    pub fn new(path: &Path) -> Self {
        FolderPreselect {
            path: path.to_path_buf(),
            wide: to_wide(path.as_os_str()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value for `BROWSEINFOW::lParam`.
    pub fn as_lparam(&self) -> isize {
        self.wide.as_ptr() as isize
    }

    /// What to post in reaction to `event`, given the callback's `lpData`.
    pub fn on_event(event: BrowseEvent, data: isize) -> Option<PostedMessage> {
        match event {
            BrowseEvent::Initialized if data != 0 => Some(PostedMessage {
                message: bffm::SETSELECTIONW,
                wparam: 1,
                lparam: data,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_ids() {
        assert_eq!(BrowseEvent::from_message(1), BrowseEvent::Initialized);
        assert_eq!(BrowseEvent::from_message(2), BrowseEvent::SelectionChanged);
        assert_eq!(BrowseEvent::from_message(4), BrowseEvent::ValidateFailed);
        assert_eq!(
            BrowseEvent::from_message(bffm::IUNKNOWN),
            BrowseEvent::Other(5)
        );
        assert_eq!(bffm::SETSELECTIONW, 0x0467);
    }

    #[test]
    fn test_posts_selection_only_when_initialized() {
        let preselect = FolderPreselect::new(Path::new("C:\\Music"));
        let data = preselect.as_lparam();

        let posted = FolderPreselect::on_event(BrowseEvent::Initialized, data).unwrap();
        assert_eq!(posted.message, bffm::SETSELECTIONW);
        assert_eq!(posted.wparam, 1);
        assert_eq!(posted.lparam, data);

        assert_eq!(
            FolderPreselect::on_event(BrowseEvent::SelectionChanged, data),
            None
        );
        assert_eq!(
            FolderPreselect::on_event(BrowseEvent::ValidateFailed, data),
            None
        );
        assert_eq!(FolderPreselect::on_event(BrowseEvent::Other(5), data), None);
    }

    #[test]
    fn test_nothing_posted_without_start_folder() {
        assert_eq!(FolderPreselect::on_event(BrowseEvent::Initialized, 0), None);
    }

    #[test]
    fn test_wide_path_is_nul_terminated() {
        let preselect = FolderPreselect::new(Path::new("D:\\Samples"));
        let ptr = preselect.as_lparam() as *const u16;
        // SAFETY: the pointer refers to `preselect.wide`, alive for this scope.
        let last = unsafe { *ptr.add("D:\\Samples".len()) };
        assert_eq!(last, 0);
    }
}
