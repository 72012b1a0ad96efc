use std::ffi::OsString;
use std::process::Command;
use std::time::Duration;

use crate::process::{self, OutputMode};
use crate::{EffectResult, LinkEffect, DEFAULT_TIMEOUT};

/// Copies the link to the system clipboard by piping it into a helper program.
#[derive(Debug, Clone)]
pub struct ClipboardEffect {
    program: OsString,
    args: Vec<OsString>,
    timeout: Duration,
}

impl ClipboardEffect {
    /// Use the platform's stock clipboard helper.
    #[must_use]
    pub fn system() -> Self {
        let (program, args): (&str, &[&str]) = if cfg!(target_os = "macos") {
            ("pbcopy", &[])
        } else if cfg!(windows) {
            ("clip", &[])
        } else {
            ("xclip", &["-selection", "clipboard"])
        };
        Self {
            program: program.into(),
            args: args.iter().map(OsString::from).collect(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Use `program` instead, invoked without arguments with the link on stdin.
    #[must_use]
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override how long the helper may run.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClipboardEffect {
    fn default() -> Self {
        Self::system()
    }
}

impl LinkEffect for ClipboardEffect {
    fn id(&self) -> &'static str {
        "clipboard"
    }

    fn label(&self) -> &'static str {
        "copy to clipboard"
    }

    fn apply(&self, url: &str) -> EffectResult<()> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        process::run(command, Some(url), OutputMode::Discard, Some(self.timeout))?;
        Ok(())
    }
}
