//! native-dialogs - native file and folder selection dialogs
//!
//! One contract, "let the user pick a file to open, a file to save, or a
//! folder", served by whichever backend suits the host:
//! zenity on Linux and the BSDs, AppleScript on macOS and the Win32 common
//! dialogs on Windows.
//!
//! ```rust,no_run
//! use native_dialogs::{Backend, DialogOptions, FileDialogs, FileFilter};
//!
//! let mut dialogs = Backend::detect(&DialogOptions::default())?;
//! let filters = [FileFilter::new("Text", ["txt", "md"])];
//! match dialogs.select_file(Some("Open"), &filters)? {
//!     Some(path) => println!("{}", path.display()),
//!     None => println!("cancelled"),
//! }
//! # Ok::<(), native_dialogs::DialogError>(())
//! ```

pub mod backend;
pub mod core;
pub mod error;
pub mod util;

/// Test utilities and mocks for unit tests.
///
/// Provides mock implementations of the process runner and the Win32
/// dialog entry points.
#[cfg(test)]
pub mod test_support;

pub use backend::{Backend, DialogOptions, FileDialogs};
pub use core::{DialogMode, DialogRequest, FileFilter};
pub use error::{DialogError, Result};
pub use util::config::Config;
