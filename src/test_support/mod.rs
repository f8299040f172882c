//! Test utilities and mocks for unit tests.
//!
//! [`MockExecutor`] stands in for the process runner and [`MockNativeApi`]
//! for the Win32 entry points, so every backend can be driven without a
//! desktop session.
//!
//! # Example
//!
//! ```rust,ignore
//! use native_dialogs::test_support::{MockExecutor, MockProcessOutput};
//!
//! #[test]
//! fn test_example() {
//!     let exec = Arc::new(MockExecutor::new());
//!     exec.expect("which zenity", MockProcessOutput::success("/usr/bin/zenity"));
//!     exec.expect_prefix("zenity", MockProcessOutput::success("/home/me/a.txt"));
//!
//!     let mut dialogs = ZenityDialogs::with_runner("zenity", None, exec.clone());
//!     // ...
//! }
//! ```

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{bail, Result};

use crate::backend::windows::params::{from_wide, to_wide};
use crate::backend::windows::{
    BrowseEvent, BrowseParams, FolderPreselect, ItemId, NativeDialogApi, NativeErrorCode,
    OpenFileParams, PostedMessage, WindowHandle,
};
use crate::util::process::{CommandRunner, ProcessError, ProcessOutcome};

/// Mock process output for testing command execution.
#[derive(Debug, Clone)]
pub struct MockProcessOutput {
    /// Exit status code (0 = success).
    pub status: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl MockProcessOutput {
    /// Create a successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        MockProcessOutput {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failure output with the given stderr and status code.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Create an output with both stdout and stderr.
    pub fn with_output(status: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    fn to_outcome(&self) -> ProcessOutcome {
        ProcessOutcome::new(&self.stdout, &self.stderr, Some(self.status))
    }
}

impl Default for MockProcessOutput {
    fn default() -> Self {
        MockProcessOutput::success("")
    }
}

/// Pattern for matching commands in MockExecutor.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match if command contains substring.
    Contains(String),
    /// Match using a regex pattern.
    Regex(String),
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Contains(s) => cmd.contains(s),
            CommandPattern::Regex(pattern) => regex::Regex::new(pattern)
                .map(|re| re.is_match(cmd))
                .unwrap_or(false),
        }
    }
}

/// What a matched command produces.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Output(MockProcessOutput),
    /// The program cannot be started.
    SpawnFailure,
}

/// Expectation for a command execution.
#[derive(Debug, Clone)]
pub struct CommandExpectation {
    /// Pattern to match against commands.
    pub pattern: CommandPattern,
    /// Response when matched.
    pub response: MockResponse,
    /// Number of times this expectation can be used (None = unlimited).
    pub times: Option<usize>,
    /// Number of times this expectation has been used.
    pub used: usize,
}

impl CommandExpectation {
    /// Create a new expectation.
    pub fn new(pattern: CommandPattern, output: MockProcessOutput) -> Self {
        CommandExpectation {
            pattern,
            response: MockResponse::Output(output),
            times: None,
            used: 0,
        }
    }

    /// Set the number of times this expectation can be used.
    pub fn times(mut self, n: usize) -> Self {
        self.times = Some(n);
        self
    }

    /// Check if this expectation can still be used.
    pub fn available(&self) -> bool {
        match self.times {
            Some(n) => self.used < n,
            None => true,
        }
    }
}

/// Mock process executor for testing command execution.
///
/// Records every argv it is asked to run and answers from the first
/// matching expectation. Unmatched commands fail to spawn.
#[derive(Debug, Default)]
pub struct MockExecutor {
    expectations: Mutex<Vec<CommandExpectation>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl MockExecutor {
    /// Create a new mock executor.
    pub fn new() -> Self {
        MockExecutor::default()
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&self, cmd: &str, output: MockProcessOutput) -> &Self {
        self.expect_pattern(CommandExpectation::new(
            CommandPattern::Exact(cmd.to_string()),
            output,
        ))
    }

    /// Add an expectation for a command starting with a prefix.
    pub fn expect_prefix(&self, prefix: &str, output: MockProcessOutput) -> &Self {
        self.expect_pattern(CommandExpectation::new(
            CommandPattern::StartsWith(prefix.to_string()),
            output,
        ))
    }

    /// Add an expectation for a command containing a substring.
    pub fn expect_contains(&self, substring: &str, output: MockProcessOutput) -> &Self {
        self.expect_pattern(CommandExpectation::new(
            CommandPattern::Contains(substring.to_string()),
            output,
        ))
    }

    /// Make `program` fail to spawn.
    pub fn expect_spawn_failure(&self, program: &str) -> &Self {
        self.expect_pattern(CommandExpectation {
            pattern: CommandPattern::Regex(format!("^{}( |$)", regex::escape(program))),
            response: MockResponse::SpawnFailure,
            times: None,
            used: 0,
        })
    }

    /// Add a custom expectation.
    pub fn expect_pattern(&self, expectation: CommandExpectation) -> &Self {
        self.expectations.lock().unwrap().push(expectation);
        self
    }

    /// Get all commands that were called.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Verify that all expectations with a specific count were satisfied.
    pub fn verify(&self) -> Result<()> {
        for (i, exp) in self.expectations.lock().unwrap().iter().enumerate() {
            if let Some(expected) = exp.times {
                if exp.used != expected {
                    bail!(
                        "expectation {} was used {} times, expected {}",
                        i,
                        exp.used,
                        expected
                    );
                }
            }
        }
        Ok(())
    }
}

impl CommandRunner for MockExecutor {
    fn run(&self, argv: &[String]) -> std::result::Result<ProcessOutcome, ProcessError> {
        let program = argv.first().cloned().ok_or(ProcessError::EmptyCommand)?;
        let full_cmd = argv.join(" ");
        self.calls.lock().unwrap().push(argv.to_vec());

        let response = self
            .expectations
            .lock()
            .unwrap()
            .iter_mut()
            .find(|exp| exp.available() && exp.pattern.matches(&full_cmd))
            .map(|exp| {
                exp.used += 1;
                exp.response.clone()
            })
            .unwrap_or(MockResponse::SpawnFailure);

        match response {
            MockResponse::Output(output) => Ok(output.to_outcome()),
            MockResponse::SpawnFailure => Err(ProcessError::Spawn {
                program,
                source: io::Error::new(io::ErrorKind::NotFound, "mock: no such program"),
            }),
        }
    }
}

/// One recorded `GetOpenFileNameW` / `GetSaveFileNameW` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFileCall {
    pub save: bool,
    pub flags: u32,
    pub owner: Option<WindowHandle>,
    pub title: Option<String>,
    pub initial_dir: Option<String>,
    pub filter: Option<Vec<u16>>,
    pub filter_index: u32,
    pub max_file: u32,
    pub buffer_bytes: usize,
}

/// One recorded `SHBrowseForFolderW` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedBrowseCall {
    pub flags: u32,
    pub owner: Option<WindowHandle>,
    pub title: Option<String>,
    /// Path read back through the callback's `lpData` pointer.
    pub preselected: Option<String>,
    /// What the callback posted on `BFFM_INITIALIZED`.
    pub posted: Option<PostedMessage>,
}

#[derive(Debug, Default)]
struct MockNativeState {
    windows: HashMap<String, WindowHandle>,
    file_result: Option<String>,
    extended_error: u32,
    browse_result: Option<String>,
    browse_resolvable: bool,
    last_error: u32,
    next_item: usize,
    file_calls: Vec<RecordedFileCall>,
    browse_calls: Vec<RecordedBrowseCall>,
    freed: Vec<ItemId>,
}

/// Scripted stand-in for the Win32 dialog entry points.
///
/// By default every dialog is cancelled.
#[derive(Debug, Default)]
pub struct MockNativeApi {
    state: Mutex<MockNativeState>,
}

fn wide_text(text: &Option<Vec<u16>>) -> Option<String> {
    text.as_ref().map(|t| from_wide(t).display().to_string())
}

impl MockNativeApi {
    pub fn new() -> Self {
        MockNativeApi::default()
    }

    /// Register a window for `find_window`.
    pub fn add_window(&self, class_name: &str, handle: WindowHandle) {
        self.state
            .lock()
            .unwrap()
            .windows
            .insert(class_name.to_string(), handle);
    }

    /// Make open/save dialogs succeed with `path`.
    pub fn accept_file_dialog(&self, path: &Path) {
        let mut state = self.state.lock().unwrap();
        state.file_result = Some(path.display().to_string());
        state.extended_error = 0;
    }

    /// Make open/save dialogs return FALSE with `code` as the extended error.
    pub fn reject_file_dialog(&self, code: u32) {
        let mut state = self.state.lock().unwrap();
        state.file_result = None;
        state.extended_error = code;
    }

    /// Make the folder browser return an item resolving to `path`.
    pub fn accept_browse(&self, path: &Path) {
        let mut state = self.state.lock().unwrap();
        state.browse_result = Some(path.display().to_string());
        state.browse_resolvable = true;
    }

    /// Make the folder browser return an item that cannot be resolved.
    pub fn accept_unresolvable_browse(&self, last_error: u32) {
        let mut state = self.state.lock().unwrap();
        state.browse_result = Some(String::new());
        state.browse_resolvable = false;
        state.last_error = last_error;
    }

    pub fn file_calls(&self) -> Vec<RecordedFileCall> {
        self.state.lock().unwrap().file_calls.clone()
    }

    pub fn browse_calls(&self) -> Vec<RecordedBrowseCall> {
        self.state.lock().unwrap().browse_calls.clone()
    }

    pub fn freed_items(&self) -> Vec<ItemId> {
        self.state.lock().unwrap().freed.clone()
    }

    fn file_dialog(&self, save: bool, params: &mut OpenFileParams) -> bool {
        let mut state = self.state.lock().unwrap();
        state.file_calls.push(RecordedFileCall {
            save,
            flags: params.flags,
            owner: params.owner,
            title: wide_text(&params.title),
            initial_dir: wide_text(&params.initial_dir),
            filter: params.filter.clone(),
            filter_index: params.filter_index,
            max_file: params.file.max_chars(),
            buffer_bytes: params.file.byte_len(),
        });

        let Some(result) = state.file_result.clone() else {
            return false;
        };
        let wide = to_wide(result.as_ref());
        if wide.len() > params.file.max_chars() as usize {
            state.extended_error = 0x3003;
            return false;
        }
        params.file.as_mut_slice()[..wide.len()].copy_from_slice(&wide);
        true
    }
}

impl NativeDialogApi for MockNativeApi {
    fn find_window(&self, class_name: &str) -> Option<WindowHandle> {
        self.state.lock().unwrap().windows.get(class_name).copied()
    }

    fn open_file_dialog(&self, params: &mut OpenFileParams) -> bool {
        self.file_dialog(false, params)
    }

    fn save_file_dialog(&self, params: &mut OpenFileParams) -> bool {
        self.file_dialog(true, params)
    }

    fn extended_error(&self) -> NativeErrorCode {
        NativeErrorCode::from_raw(self.state.lock().unwrap().extended_error)
    }

    fn browse_for_folder(&self, params: &BrowseParams) -> Option<ItemId> {
        let data = params.preselect.as_ref().map_or(0, FolderPreselect::as_lparam);
        // The real dialog calls back once it has initialized.
        let posted = FolderPreselect::on_event(BrowseEvent::Initialized, data);

        let mut state = self.state.lock().unwrap();
        state.browse_calls.push(RecordedBrowseCall {
            flags: params.flags,
            owner: params.owner,
            title: wide_text(&params.title),
            preselected: params
                .preselect_path()
                .map(|p| p.display().to_string()),
            posted,
        });

        state.browse_result.as_ref()?;
        state.next_item += 1;
        Some(ItemId(state.next_item))
    }

    fn path_from_item(&self, _item: ItemId, buffer: &mut [u16]) -> bool {
        let state = self.state.lock().unwrap();
        if !state.browse_resolvable {
            return false;
        }
        let Some(path) = state.browse_result.as_deref() else {
            return false;
        };
        let wide = to_wide(path.as_ref());
        buffer[..wide.len()].copy_from_slice(&wide);
        true
    }

    fn free_item(&self, item: ItemId) {
        self.state.lock().unwrap().freed.push(item);
    }

    fn last_error(&self) -> NativeErrorCode {
        NativeErrorCode::from_raw(self.state.lock().unwrap().last_error)
    }
}
