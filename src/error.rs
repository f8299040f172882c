//! Error types shared by all dialog backends.
//!
//! Cancelling a dialog is not an error; it is reported as `Ok(None)`.

use thiserror::Error;

use crate::backend::windows::NativeErrorCode;
use crate::util::process::ProcessError;

/// Remediation hints attached to availability errors.
pub mod suggestions {
    /// The zenity chooser is missing.
    pub const INSTALL_ZENITY: &str =
        "help: install zenity with your package manager (e.g. `sudo apt install zenity`)";

    /// A configured chooser program is missing.
    pub const CHECK_CHOOSER_PATH: &str =
        "help: check the `program` setting in the [zenity] section of config.toml";
}

/// Result alias for dialog operations.
pub type Result<T> = std::result::Result<T, DialogError>;

/// Failure of a dialog operation.
#[derive(Debug, Error)]
pub enum DialogError {
    /// No backend exists for the host operating system.
    #[error("native file dialogs are not supported on `{os}`")]
    UnsupportedPlatform { os: String },

    /// The external program the backend relies on is not installed.
    #[error("`{program}` is not installed\n{suggestion}")]
    BackendUnavailable { program: String, suggestion: String },

    /// The chooser wrote to stderr; the text is carried verbatim.
    #[error("{message}")]
    Subprocess { program: String, message: String },

    /// The chooser could not be run at all.
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// A native dialog primitive reported a non-zero error code.
    #[error("{operation} failed with error {code}")]
    Native {
        operation: &'static str,
        code: NativeErrorCode,
    },
}

impl DialogError {
    /// Build an availability error for `program`.
    pub fn unavailable(program: impl Into<String>, suggestion: impl Into<String>) -> Self {
        DialogError::BackendUnavailable {
            program: program.into(),
            suggestion: suggestion.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subprocess_message_is_verbatim() {
        let err = DialogError::Subprocess {
            program: "zenity".into(),
            message: "Gtk-WARNING **: cannot open display".into(),
        };
        assert_eq!(err.to_string(), "Gtk-WARNING **: cannot open display");
    }

    #[test]
    fn test_unavailable_carries_suggestion() {
        let err = DialogError::unavailable("zenity", suggestions::INSTALL_ZENITY);
        let msg = err.to_string();
        assert!(msg.contains("`zenity` is not installed"));
        assert!(msg.contains("sudo apt install zenity"));
    }

    #[test]
    fn test_native_error_carries_code() {
        let err = DialogError::Native {
            operation: "GetOpenFileNameW",
            code: NativeErrorCode::from_raw(123),
        };
        assert_eq!(err.to_string(), "GetOpenFileNameW failed with error 123");
    }
}
