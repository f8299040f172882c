//! Parameter blocks for the Win32 common dialogs.
//!
//! These are the values that end up in `OPENFILENAMEW` and `BROWSEINFOW`.
//! They are plain Rust data so the sizing and encoding rules hold on every
//! host; only `win32.rs` turns them into the real structures.
//!
//! Flag and message values are from the Windows SDK headers `commdlg.h`
//! and `shlobj_core.h`.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::backend::windows::callback::FolderPreselect;
use crate::core::{DialogRequest, FileFilter};

/// `MAX_PATH` from `minwindef.h`.
pub const MAX_PATH: usize = 260;

/// Worst-case bytes per character reserved in the result buffer.
pub const BYTES_PER_CHAR: usize = 4;

/// `OPENFILENAMEW::Flags` values.
pub mod ofn {
    pub const HIDEREADONLY: u32 = 0x0000_0004;
    pub const NOCHANGEDIR: u32 = 0x0000_0008;
    pub const EXPLORER: u32 = 0x0008_0000;
    pub const ENABLESIZING: u32 = 0x0080_0000;

    /// Explorer style, leave the process directory alone, no read-only box, resizable.
    pub const DEFAULT: u32 = EXPLORER | NOCHANGEDIR | HIDEREADONLY | ENABLESIZING;
}

/// `BROWSEINFOW::ulFlags` values.
pub mod bif {
    pub const RETURNONLYFSDIRS: u32 = 0x0000_0001;
    pub const EDITBOX: u32 = 0x0000_0010;
    pub const NEWDIALOGSTYLE: u32 = 0x0000_0040;
    pub const USENEWUI: u32 = EDITBOX | NEWDIALOGSTYLE;

    pub const DEFAULT: u32 = RETURNONLYFSDIRS | USENEWUI;
}

/// Native window handle (`HWND`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHandle(pub isize);

/// Value of `CommDlgExtendedError` (a `DWORD`).
///
/// Always held unsigned so codes with the high bit set are never mistaken
/// for a negative "no error".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeErrorCode(u32);

impl NativeErrorCode {
    pub const fn from_raw(raw: u32) -> Self {
        NativeErrorCode(raw)
    }

    /// Reinterpret a value that crossed an `i32` boundary.
    pub const fn from_signed(raw: i32) -> Self {
        NativeErrorCode(raw as u32)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Zero means the user dismissed the dialog.
    pub const fn is_cancel(self) -> bool {
        self.0 == 0
    }

    /// Symbolic name from `cderr.h`, if the code is a known one.
    pub fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            0x0001 => "CDERR_STRUCTSIZE",
            0x0002 => "CDERR_INITIALIZATION",
            0x0003 => "CDERR_NOTEMPLATE",
            0x0004 => "CDERR_NOHINSTANCE",
            0x0005 => "CDERR_LOADSTRFAILURE",
            0x0006 => "CDERR_FINDRESFAILURE",
            0x0007 => "CDERR_LOADRESFAILURE",
            0x0008 => "CDERR_LOCKRESFAILURE",
            0x0009 => "CDERR_MEMALLOCFAILURE",
            0x000A => "CDERR_MEMLOCKFAILURE",
            0x000B => "CDERR_NOHOOK",
            0x000C => "CDERR_REGISTERMSGFAIL",
            0xFFFF => "CDERR_DIALOGFAILURE",
            0x3001 => "FNERR_SUBCLASSFAILURE",
            0x3002 => "FNERR_INVALIDFILENAME",
            0x3003 => "FNERR_BUFFERTOOSMALL",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for NativeErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        if let Some(name) = self.name() {
            write!(f, " ({})", name)?;
        }
        Ok(())
    }
}

/// Encode text as a NUL-terminated UTF-16 string.
pub fn to_wide(text: &OsStr) -> Vec<u16> {
    #[cfg(windows)]
    let mut wide: Vec<u16> = {
        use std::os::windows::ffi::OsStrExt;
        text.encode_wide().collect()
    };
    #[cfg(not(windows))]
    let mut wide: Vec<u16> = text.to_string_lossy().encode_utf16().collect();

    wide.push(0);
    wide
}

/// Decode a UTF-16 buffer up to its first NUL.
pub fn from_wide(buffer: &[u16]) -> PathBuf {
    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());

    #[cfg(windows)]
    {
        use std::os::windows::ffi::OsStringExt;
        PathBuf::from(std::ffi::OsString::from_wide(&buffer[..len]))
    }
    #[cfg(not(windows))]
    {
        PathBuf::from(String::from_utf16_lossy(&buffer[..len]))
    }
}

/// Zeroed buffer the dialog writes the selected path into.
///
/// Sized at [`BYTES_PER_CHAR`] bytes per character plus one terminator byte.
/// `max_chars` is what goes into `nMaxFile`: the character capacity, never
/// the byte size.
#[derive(Debug, Clone)]
pub struct ResultBuffer {
    chars: usize,
    data: Vec<u16>,
}

impl ResultBuffer {
    /// A buffer for one `MAX_PATH` path.
    pub fn for_path() -> Self {
        Self::with_char_capacity(MAX_PATH)
    }

    pub fn with_char_capacity(chars: usize) -> Self {
        let bytes = chars * BYTES_PER_CHAR + 1;
        ResultBuffer {
            chars,
            data: vec![0; bytes.div_ceil(2)],
        }
    }

    /// Value for `nMaxFile`.
    pub fn max_chars(&self) -> u32 {
        self.chars as u32
    }

    /// Size of the allocation in bytes.
    pub fn byte_len(&self) -> usize {
        self.data.len() * 2
    }

    pub fn as_mut_ptr(&mut self) -> *mut u16 {
        self.data.as_mut_ptr()
    }

    pub fn as_mut_slice(&mut self) -> &mut [u16] {
        &mut self.data
    }

    /// The path written by the dialog, if any.
    pub fn to_path(&self) -> Option<PathBuf> {
        let path = from_wide(&self.data);
        (!path.as_os_str().is_empty()).then_some(path)
    }
}

/// Build the `lpstrFilter` string: `label (*.a;*.b)\0*.a;*.b\0` per filter,
/// closed by one more `\0`.
///
/// Filters without extensions are skipped; an empty pattern would end the
/// list early.
pub fn filter_string(filters: &[FileFilter]) -> Option<String> {
    let mut out = String::new();
    for filter in filters.iter().filter(|f| !f.is_empty()) {
        let patterns = filter.patterns().collect::<Vec<_>>().join(";");
        out.push_str(&format!("{} ({})\0{}\0", filter.label(), patterns, patterns));
    }
    if out.is_empty() {
        return None;
    }
    out.push('\0');
    Some(out)
}

/// Contents of `OPENFILENAMEW` for one open or save call.
#[derive(Debug, Clone)]
pub struct OpenFileParams {
    pub flags: u32,
    pub owner: Option<WindowHandle>,
    pub title: Option<Vec<u16>>,
    pub file: ResultBuffer,
    pub initial_dir: Option<Vec<u16>>,
    /// Already double-NUL terminated.
    pub filter: Option<Vec<u16>>,
    /// One-based; zero when there is no filter.
    pub filter_index: u32,
}

impl OpenFileParams {
    pub fn build(request: &DialogRequest, owner: Option<WindowHandle>) -> Self {
        let filter = filter_string(&request.filters).map(|f| f.encode_utf16().collect::<Vec<_>>());
        let filter_index = if filter.is_some() { 1 } else { 0 };

        OpenFileParams {
            flags: ofn::DEFAULT,
            owner,
            title: request.title().map(|t| to_wide(OsStr::new(t))),
            file: ResultBuffer::for_path(),
            initial_dir: request
                .initial_directory
                .as_deref()
                .map(|d| to_wide(d.as_os_str())),
            filter,
            filter_index,
        }
    }

    /// The selected path after the dialog returned success.
    pub fn selected_path(&self) -> Option<PathBuf> {
        self.file.to_path()
    }
}

/// Contents of `BROWSEINFOW` for one folder browse.
#[derive(Debug, Clone)]
pub struct BrowseParams {
    pub flags: u32,
    pub owner: Option<WindowHandle>,
    pub title: Option<Vec<u16>>,
    /// Passed to the callback as `lpData`; must outlive the browse call.
    pub preselect: Option<FolderPreselect>,
}

impl BrowseParams {
    pub fn build(request: &DialogRequest, owner: Option<WindowHandle>) -> Self {
        BrowseParams {
            flags: bif::DEFAULT,
            owner,
            title: request.title().map(|t| to_wide(OsStr::new(t))),
            preselect: request
                .initial_directory
                .as_deref()
                .map(FolderPreselect::new),
        }
    }

    /// Starting folder as text, for logging.
    pub fn preselect_path(&self) -> Option<&Path> {
        self.preselect.as_ref().map(FolderPreselect::path)
    }
}
