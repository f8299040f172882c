//! The real Win32 entry points.
//!
//! Structures come from `windows-sys`; their layout is the SDK's and is not
//! redeclared here. Every structure lives on the stack of the call that
//! fills it, and every pointer stored in one refers to data owned by the
//! `OpenFileParams` / `BrowseParams` borrowed for that call.

use std::ffi::{c_void, OsStr};
use std::mem;
use std::ptr;

use windows_sys::Win32::Foundation::{GetLastError, HWND, LPARAM};
use windows_sys::Win32::System::Com::CoTaskMemFree;
use windows_sys::Win32::System::Ole::{OleInitialize, OleUninitialize};
use windows_sys::Win32::UI::Controls::Dialogs::{
    CommDlgExtendedError, GetOpenFileNameW, GetSaveFileNameW, OPENFILENAMEW,
};
use windows_sys::Win32::UI::Shell::{SHBrowseForFolderW, SHGetPathFromIDListW, BROWSEINFOW};
use windows_sys::Win32::UI::WindowsAndMessaging::{FindWindowW, PostMessageW};

use super::callback::{BrowseEvent, FolderPreselect};
use super::params::{to_wide, BrowseParams, NativeErrorCode, OpenFileParams, WindowHandle, MAX_PATH};
use super::{ItemId, NativeDialogApi};

/// Calls straight into comdlg32, shell32, ole32 and user32.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Api;

fn optional_ptr(text: &Option<Vec<u16>>) -> *const u16 {
    text.as_ref().map_or(ptr::null(), |t| t.as_ptr())
}

fn hwnd(owner: Option<WindowHandle>) -> HWND {
    owner.map_or(0, |h| h.0)
}

/// Fill `OPENFILENAMEW` from `params`. The result borrows `params`' buffers.
fn open_file_name(params: &mut OpenFileParams) -> OPENFILENAMEW {
    // SAFETY: OPENFILENAMEW is plain data; all-zero is its documented unset state.
    let mut ofn: OPENFILENAMEW = unsafe { mem::zeroed() };
    ofn.lStructSize = mem::size_of::<OPENFILENAMEW>() as u32;
    ofn.hwndOwner = hwnd(params.owner);
    ofn.lpstrFilter = optional_ptr(&params.filter);
    ofn.nFilterIndex = params.filter_index;
    ofn.lpstrFile = params.file.as_mut_ptr();
    ofn.nMaxFile = params.file.max_chars();
    ofn.lpstrInitialDir = optional_ptr(&params.initial_dir);
    ofn.lpstrTitle = optional_ptr(&params.title);
    ofn.Flags = params.flags;
    ofn
}

unsafe extern "system" fn browse_callback(
    hwnd: HWND,
    msg: u32,
    _lparam: LPARAM,
    data: LPARAM,
) -> i32 {
    if let Some(post) = FolderPreselect::on_event(BrowseEvent::from_message(msg), data) {
        PostMessageW(hwnd, post.message, post.wparam, post.lparam);
    }
    0
}

/// Balances `OleInitialize` for the duration of one browse.
struct OleScope {
    initialized: bool,
}

impl OleScope {
    fn enter() -> Self {
        // SAFETY: reserved parameter must be null.
        let hr = unsafe { OleInitialize(ptr::null_mut()) };
        if hr < 0 {
            tracing::warn!("OleInitialize failed: {:#010x}", hr as u32);
        }
        OleScope {
            initialized: hr >= 0,
        }
    }
}

impl Drop for OleScope {
    fn drop(&mut self) {
        if self.initialized {
            // SAFETY: paired with a successful OleInitialize on this thread.
            unsafe { OleUninitialize() };
        }
    }
}

impl NativeDialogApi for Win32Api {
    fn find_window(&self, class_name: &str) -> Option<WindowHandle> {
        let class = to_wide(OsStr::new(class_name));
        // SAFETY: `class` is NUL-terminated and outlives the call.
        let handle = unsafe { FindWindowW(class.as_ptr(), ptr::null()) };
        (handle != 0).then_some(WindowHandle(handle))
    }

    fn open_file_dialog(&self, params: &mut OpenFileParams) -> bool {
        let mut ofn = open_file_name(params);
        // SAFETY: every pointer in `ofn` refers to `params`, borrowed for this call.
        unsafe { GetOpenFileNameW(&mut ofn) != 0 }
    }

    fn save_file_dialog(&self, params: &mut OpenFileParams) -> bool {
        let mut ofn = open_file_name(params);
        // SAFETY: every pointer in `ofn` refers to `params`, borrowed for this call.
        unsafe { GetSaveFileNameW(&mut ofn) != 0 }
    }

    fn extended_error(&self) -> NativeErrorCode {
        // SAFETY: no arguments; reads thread-local dialog state.
        NativeErrorCode::from_raw(unsafe { CommDlgExtendedError() } as u32)
    }

    fn browse_for_folder(&self, params: &BrowseParams) -> Option<ItemId> {
        // SAFETY: BROWSEINFOW is plain data; all-zero is its documented unset state.
        let mut info: BROWSEINFOW = unsafe { mem::zeroed() };
        info.hwndOwner = hwnd(params.owner);
        info.lpszTitle = optional_ptr(&params.title);
        info.ulFlags = params.flags;
        info.lpfn = Some(browse_callback);
        info.lParam = params.preselect.as_ref().map_or(0, FolderPreselect::as_lparam);

        let _ole = OleScope::enter();
        // SAFETY: `info` and the strings it points to live until this returns;
        // the callback only runs inside this call.
        let pidl = unsafe { SHBrowseForFolderW(&info) };
        (!pidl.is_null()).then_some(ItemId(pidl as usize))
    }

    fn path_from_item(&self, item: ItemId, buffer: &mut [u16]) -> bool {
        if buffer.len() < MAX_PATH {
            return false;
        }
        // SAFETY: `item` came from SHBrowseForFolderW and is not freed yet;
        // `buffer` holds at least MAX_PATH units.
        unsafe { SHGetPathFromIDListW(item.0 as *const _, buffer.as_mut_ptr()) != 0 }
    }

    fn free_item(&self, item: ItemId) {
        // SAFETY: `item` was allocated by the shell with the COM task allocator.
        unsafe { CoTaskMemFree(item.0 as *const c_void) };
    }

    fn last_error(&self) -> NativeErrorCode {
        // SAFETY: no arguments; reads thread-local error state.
        NativeErrorCode::from_raw(unsafe { GetLastError() })
    }
}
