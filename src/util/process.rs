//! Subprocess execution utilities.
//!
//! Every chooser program is run through [`CommandRunner`], which hands back a
//! [`ProcessOutcome`] with stdout and stderr captured separately. The real
//! runner strips the dynamic loader search path from the child environment.

use std::ffi::OsStr;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;

use thiserror::Error;

/// Loader search-path variables removed from every child environment.
#[cfg(target_os = "macos")]
pub const LOADER_PATH_VARS: &[&str] = &["DYLD_LIBRARY_PATH", "LD_LIBRARY_PATH"];

/// Loader search-path variables removed from every child environment.
#[cfg(all(unix, not(target_os = "macos")))]
pub const LOADER_PATH_VARS: &[&str] = &["LD_LIBRARY_PATH"];

/// Loader search-path variables removed from every child environment.
#[cfg(not(unix))]
pub const LOADER_PATH_VARS: &[&str] = &[];

/// Error while running a child process.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("cannot run an empty command line")]
    EmptyCommand,

    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to collect output of `{program}`: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl ProcessError {
    /// Whether the program could not be started at all.
    pub fn is_spawn(&self) -> bool {
        matches!(self, ProcessError::Spawn { .. })
    }
}

/// Captured output of a finished child process.
///
/// Both streams are trimmed on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the child was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl ProcessOutcome {
    pub fn new(stdout: impl AsRef<str>, stderr: impl AsRef<str>, exit_code: Option<i32>) -> Self {
        ProcessOutcome {
            stdout: stdout.as_ref().trim().to_string(),
            stderr: stderr.as_ref().trim().to_string(),
            exit_code,
        }
    }

    /// Anything on stderr counts as failure, whatever the exit code says.
    pub fn is_failure(&self) -> bool {
        !self.stderr.is_empty()
    }
}

/// Seam between the dialog backends and the operating system's process table.
pub trait CommandRunner: Send + Sync {
    /// Run `argv` (program first) to completion.
    fn run(&self, argv: &[String]) -> Result<ProcessOutcome, ProcessError>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, argv: &[String]) -> Result<ProcessOutcome, ProcessError> {
        ProcessBuilder::from_argv(argv)?.exec()
    }
}

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    env_remove: Vec<String>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    ///
    /// The loader search-path variables are already scheduled for removal.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            env_remove: LOADER_PATH_VARS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Create a builder from an argument vector whose first element is the program.
    pub fn from_argv(argv: &[String]) -> Result<Self, ProcessError> {
        let (program, args) = argv.split_first().ok_or(ProcessError::EmptyCommand)?;
        Ok(ProcessBuilder::new(program).args(args))
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Get the variables removed from the child environment.
    pub fn get_env_remove(&self) -> &[String] {
        &self.env_remove
    }

    /// Build the Command.
    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        for key in &self.env_remove {
            cmd.env_remove(key);
        }

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd
    }

    /// Execute the command, read both streams until they close and reap the child.
    pub fn exec(&self) -> Result<ProcessOutcome, ProcessError> {
        let program = self.program.display().to_string();
        tracing::debug!("running `{}`", self.display_command());

        let mut child = self
            .build_command()
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                program: program.clone(),
                source,
            })?;

        let (stdout, stderr) = match collect_streams(&mut child) {
            Ok(streams) => streams,
            Err(source) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ProcessError::Wait { program, source });
            }
        };

        let status = child
            .wait()
            .map_err(|source| ProcessError::Wait { program, source })?;

        let outcome = ProcessOutcome::new(
            String::from_utf8_lossy(&stdout),
            String::from_utf8_lossy(&stderr),
            status.code(),
        );
        tracing::trace!(
            "exit {:?}, {} bytes stdout, {} bytes stderr",
            outcome.exit_code,
            outcome.stdout.len(),
            outcome.stderr.len()
        );
        Ok(outcome)
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Drain stdout on this thread and stderr on a helper so neither pipe can fill up.
fn collect_streams(child: &mut Child) -> io::Result<(Vec<u8>, Vec<u8>)> {
    let stderr_reader = child.stderr.take().map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf).map(|_| buf)
        })
    });

    let mut stdout = Vec::new();
    let stdout_result = match child.stdout.take() {
        Some(mut pipe) => pipe.read_to_end(&mut stdout).map(|_| ()),
        None => Ok(()),
    };

    if let Err(e) = stdout_result {
        // Unblock the stderr reader before joining it.
        let _ = child.kill();
        if let Some(handle) = stderr_reader {
            let _ = handle.join();
        }
        return Err(e);
    }

    let stderr = match stderr_reader {
        Some(handle) => handle
            .join()
            .map_err(|_| io::Error::other("stderr reader panicked"))??,
        None => Vec::new(),
    };

    Ok((stdout, stderr))
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}
