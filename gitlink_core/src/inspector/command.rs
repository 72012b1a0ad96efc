use std::ffi::OsString;
use std::process::Command;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use gitlink_effects::process::{self, OutputMode, ProcessError};

use super::{RepositoryInspector, ORIGIN};
use crate::{Error, Result};

/// Inspector that shells out to the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCommand {
    program: OsString,
    timeout: Option<Duration>,
}

impl GitCommand {
    /// Use `git` from `PATH` with no timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a specific git executable.
    #[must_use]
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    /// Kill a query that runs longer than `timeout`; `None` waits forever.
    #[must_use]
    pub const fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn git(&self, dir: &Utf8Path, args: &[&str]) -> std::result::Result<String, ProcessError> {
        let mut command = Command::new(&self.program);
        command.arg("-C").arg(dir.as_std_path()).args(args);
        let output = process::run(command, None, OutputMode::Capture, self.timeout)?;
        Ok(output.stdout.trim().to_string())
    }

    // Exit failures become the query-specific variant; anything else means
    // git itself could not be run.
    fn classify(&self, err: ProcessError, on_exit: impl FnOnce(String) -> Error) -> Error {
        match err {
            ProcessError::Exited { diagnostic, .. } => on_exit(diagnostic),
            other => Error::VcsUnavailable {
                program: self.program.to_string_lossy().into_owned(),
                reason: unavailable_reason(&other),
            },
        }
    }
}

impl Default for GitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryInspector for GitCommand {
    fn resolve_root(&self, dir: &Utf8Path) -> Result<Utf8PathBuf> {
        self.git(dir, &["rev-parse", "--show-toplevel"])
            .map(Utf8PathBuf::from)
            .map_err(|err| {
                self.classify(err, |diagnostic| Error::NotARepository {
                    path: dir.to_string(),
                    diagnostic,
                })
            })
    }

    fn resolve_commit(&self, root: &Utf8Path) -> Result<String> {
        self.git(root, &["rev-parse", "HEAD"]).map_err(|err| {
            self.classify(err, |diagnostic| Error::NoCommits {
                root: root.to_string(),
                diagnostic,
            })
        })
    }

    fn resolve_remote(&self, root: &Utf8Path) -> Result<String> {
        self.git(root, &["remote", "get-url", ORIGIN]).map_err(|err| {
            self.classify(err, |diagnostic| Error::NoRemote {
                root: root.to_string(),
                diagnostic,
            })
        })
    }
}

fn unavailable_reason(err: &ProcessError) -> String {
    match err {
        ProcessError::Spawn { source, .. } | ProcessError::Io { source, .. } => source.to_string(),
        ProcessError::TimedOut { after, .. } => format!("timed out after {}s", after.as_secs()),
        ProcessError::Exited { diagnostic, .. } => diagnostic.clone(),
    }
}
