//! Dialog backends and the platform dispatch between them.
//!
//! | Backend       | Hosts                 | Mechanism                        |
//! |---------------|-----------------------|----------------------------------|
//! | `zenity`      | Linux, BSDs           | `zenity --file-selection` child  |
//! | `applescript` | macOS                 | `osascript -e <script>` child    |
//! | `win32`       | Windows               | comdlg32 / shell32 calls         |
//!
//! One [`Backend`] is chosen at start-up and kept for the life of the
//! program. Selection methods take `&mut self`, so a single provider only
//! ever has one dialog in flight.

pub mod applescript;
pub mod probe;
pub mod windows;
pub mod zenity;

use std::path::{Path, PathBuf};

use crate::core::FileFilter;
use crate::error::{DialogError, Result};
use crate::util::config::Config;

pub use applescript::AppleScriptDialogs;
pub use windows::WindowsDialogs;
pub use zenity::ZenityDialogs;

/// The selection contract every backend fulfils.
///
/// `Ok(None)` always means the user cancelled.
pub trait FileDialogs {
    /// Pick an existing file.
    fn select_file(&mut self, title: Option<&str>, filters: &[FileFilter]) -> Result<Option<PathBuf>>;

    /// Pick a file name to save to.
    fn select_new_file(
        &mut self,
        title: Option<&str>,
        filters: &[FileFilter],
    ) -> Result<Option<PathBuf>>;

    /// Pick a directory.
    fn select_folder(&mut self, title: Option<&str>) -> Result<Option<PathBuf>>;

    /// Where the next dialog opens. A file path stores its parent.
    fn set_current_directory(&mut self, path: &Path);

    fn current_directory(&self) -> Option<&Path>;
}

/// Settings that shape backend construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogOptions {
    pub initial_directory: Option<PathBuf>,
    pub zenity_program: String,
    pub applescript_interpreter: String,
    /// Class name of the window that should own Win32 dialogs.
    pub owner_window_class: Option<String>,
}

impl Default for DialogOptions {
    fn default() -> Self {
        DialogOptions {
            initial_directory: None,
            zenity_program: zenity::DEFAULT_PROGRAM.to_string(),
            applescript_interpreter: applescript::DEFAULT_INTERPRETER.to_string(),
            owner_window_class: None,
        }
    }
}

impl DialogOptions {
    pub fn from_config(config: &Config) -> Self {
        let defaults = DialogOptions::default();
        DialogOptions {
            initial_directory: config.dialogs.initial_directory.clone(),
            zenity_program: config
                .zenity
                .program
                .clone()
                .unwrap_or(defaults.zenity_program),
            applescript_interpreter: config
                .applescript
                .interpreter
                .clone()
                .unwrap_or(defaults.applescript_interpreter),
            owner_window_class: config.windows.owner_window_class.clone(),
        }
    }
}

/// The backend for the running host.
pub enum Backend {
    Zenity(ZenityDialogs),
    AppleScript(AppleScriptDialogs),
    Windows(WindowsDialogs),
}

impl Backend {
    /// Pick the backend for the host operating system.
    pub fn detect(options: &DialogOptions) -> Result<Self> {
        Self::for_os(std::env::consts::OS, options)
    }

    /// Pick the backend for `os` (a `std::env::consts::OS` value).
    pub fn for_os(os: &str, options: &DialogOptions) -> Result<Self> {
        let initial = options.initial_directory.as_deref();
        let backend = match os {
            "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => Backend::Zenity(
                ZenityDialogs::new(options.zenity_program.clone(), initial),
            ),
            "macos" => Backend::AppleScript(AppleScriptDialogs::new(
                options.applescript_interpreter.clone(),
                initial,
            )),
            #[cfg(windows)]
            "windows" => Backend::Windows(WindowsDialogs::new(
                options.owner_window_class.clone(),
                initial,
            )),
            other => {
                return Err(DialogError::UnsupportedPlatform {
                    os: other.to_string(),
                })
            }
        };
        tracing::debug!("using {} backend for {}", backend.name(), os);
        Ok(backend)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Backend::Zenity(_) => "zenity",
            Backend::AppleScript(_) => "applescript",
            Backend::Windows(_) => "win32",
        }
    }

    /// Whether the backend can show dialogs right now.
    ///
    /// Only zenity depends on an optional install; the others ship with the OS.
    pub fn is_available(&self) -> bool {
        match self {
            Backend::Zenity(z) => z.is_available(),
            Backend::AppleScript(_) | Backend::Windows(_) => true,
        }
    }

    /// The external program the backend runs, if any.
    pub fn program(&self) -> Option<&str> {
        match self {
            Backend::Zenity(z) => Some(z.program()),
            Backend::AppleScript(a) => Some(a.interpreter()),
            Backend::Windows(_) => None,
        }
    }

    fn inner(&self) -> &dyn FileDialogs {
        match self {
            Backend::Zenity(b) => b,
            Backend::AppleScript(b) => b,
            Backend::Windows(b) => b,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn FileDialogs {
        match self {
            Backend::Zenity(b) => b,
            Backend::AppleScript(b) => b,
            Backend::Windows(b) => b,
        }
    }
}

impl FileDialogs for Backend {
    fn select_file(&mut self, title: Option<&str>, filters: &[FileFilter]) -> Result<Option<PathBuf>> {
        self.inner_mut().select_file(title, filters)
    }

    fn select_new_file(
        &mut self,
        title: Option<&str>,
        filters: &[FileFilter],
    ) -> Result<Option<PathBuf>> {
        self.inner_mut().select_new_file(title, filters)
    }

    fn select_folder(&mut self, title: Option<&str>) -> Result<Option<PathBuf>> {
        self.inner_mut().select_folder(title)
    }

    fn set_current_directory(&mut self, path: &Path) {
        self.inner_mut().set_current_directory(path)
    }

    fn current_directory(&self) -> Option<&Path> {
        self.inner().current_directory()
    }
}
