//! Availability checks for external chooser programs.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::util::process::{find_executable, CommandRunner};

/// Locates a program once and remembers the answer.
#[derive(Debug)]
pub struct AvailabilityProbe {
    program: String,
    location: OnceLock<Option<PathBuf>>,
}

impl AvailabilityProbe {
    pub fn new(program: impl Into<String>) -> Self {
        AvailabilityProbe {
            program: program.into(),
            location: OnceLock::new(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Where the program lives, probing on the first call only.
    pub fn locate(&self, runner: &dyn CommandRunner) -> Option<&Path> {
        self.location
            .get_or_init(|| {
                let found = probe(runner, &self.program);
                tracing::debug!("probe `{}`: {:?}", self.program, found);
                found
            })
            .as_deref()
    }

    pub fn is_available(&self, runner: &dyn CommandRunner) -> bool {
        self.locate(runner).is_some()
    }
}

/// Ask `which` for the program; search `PATH` ourselves if `which` is missing.
fn probe(runner: &dyn CommandRunner, program: &str) -> Option<PathBuf> {
    let argv = ["which".to_string(), program.to_string()];
    match runner.run(&argv) {
        Ok(outcome) => {
            let line = outcome.stdout.lines().next()?.trim();
            let path = PathBuf::from(line);
            path.is_file().then_some(path)
        }
        Err(e) if e.is_spawn() => {
            tracing::debug!("`which` unavailable ({}), searching PATH directly", e);
            find_executable(program).filter(|p| p.is_file())
        }
        Err(e) => {
            tracing::warn!("failed to probe for `{}`: {}", program, e);
            None
        }
    }
}
