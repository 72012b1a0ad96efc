use std::ffi::OsString;
use std::process::Command;
use std::time::Duration;

use tracing::debug;

use crate::process::{self, OutputMode};
use crate::{EffectError, EffectResult, LinkEffect, DEFAULT_TIMEOUT};

/// Opens the link in the user's default browser.
#[derive(Debug, Clone)]
pub struct BrowserEffect {
    opener: Opener,
    timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Opener {
    /// Whatever the platform registers as the default browser.
    System,
    /// A helper program taking the link as its only argument.
    Program(OsString),
}

impl BrowserEffect {
    /// Use the platform's default browser.
    #[must_use]
    pub const fn system() -> Self {
        Self {
            opener: Opener::System,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Use `program` instead, invoked with the link as its only argument.
    #[must_use]
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            opener: Opener::Program(program.into()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override how long a helper program may run.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for BrowserEffect {
    fn default() -> Self {
        Self::system()
    }
}

impl LinkEffect for BrowserEffect {
    fn id(&self) -> &'static str {
        "browser"
    }

    fn label(&self) -> &'static str {
        "open in browser"
    }

    fn apply(&self, url: &str) -> EffectResult<()> {
        match &self.opener {
            Opener::System => {
                debug!(url, "opening default browser");
                webbrowser::open(url).map_err(|source| EffectError::Browser { source })
            }
            Opener::Program(program) => {
                let mut command = Command::new(program);
                command.arg(url);
                process::run(command, None, OutputMode::Discard, Some(self.timeout))?;
                Ok(())
            }
        }
    }
}
