use std::env;
use std::ffi::OsString;
use std::str::FromStr;
use std::time::Duration;

use gitlink_api::LinkKind;
use gitlink_effects::{EffectSettings, DEFAULT_TIMEOUT};

use crate::{Error, Result};

const BLAME_ENV: &str = "BLAME";
const OPEN_ENV: &str = "OPEN";
const BACKEND_ENV: &str = "GITLINK_BACKEND";
const GIT_BIN_ENV: &str = "GITLINK_GIT_BIN";
const GIT_TIMEOUT_ENV: &str = "GITLINK_GIT_TIMEOUT_SECS";
const CLIPBOARD_BIN_ENV: &str = "GITLINK_CLIPBOARD_BIN";
const BROWSER_BIN_ENV: &str = "GITLINK_BROWSER_BIN";
const EFFECT_TIMEOUT_ENV: &str = "GITLINK_EFFECT_TIMEOUT_SECS";

/// Which implementation answers repository queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Shell out to the git executable.
    #[default]
    Command,
    /// Use the bundled libgit2.
    Libgit2,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "command" => Ok(Self::Command),
            "libgit2" => Ok(Self::Libgit2),
            other => Err(format!("expected 'command' or 'libgit2', got '{other}'")),
        }
    }
}

/// Settings for one invocation, assembled at the CLI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Blob or blame view.
    pub link_kind: LinkKind,
    /// Open the link in a browser after copying it.
    pub open_browser: bool,
    /// Repository query backend.
    pub backend: Backend,
    /// Git executable used by [`Backend::Command`].
    pub git_program: OsString,
    /// Upper bound on each git query; `None` waits indefinitely.
    pub git_timeout: Option<Duration>,
    /// Replacement clipboard helper.
    pub clipboard_program: Option<OsString>,
    /// Replacement URL opener.
    pub browser_program: Option<OsString>,
    /// Upper bound on each clipboard/browser helper.
    pub effect_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            link_kind: LinkKind::Blob,
            open_browser: false,
            backend: Backend::Command,
            git_program: OsString::from("git"),
            git_timeout: None,
            clipboard_program: None,
            browser_program: None,
            effect_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Build from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when an override cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var_os(key))
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// `BLAME` and `OPEN` only take effect when set to exactly `true`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when an override cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let is_true = |key: &str| lookup(key).is_some_and(|value| value == "true");
        let defaults = Self::default();

        let backend = match text(&lookup, BACKEND_ENV)? {
            Some(value) => value.parse::<Backend>().map_err(|message| Error::Config {
                key: BACKEND_ENV,
                message,
            })?,
            None => defaults.backend,
        };

        Ok(Self {
            link_kind: LinkKind::from_blame(is_true(BLAME_ENV)),
            open_browser: is_true(OPEN_ENV),
            backend,
            git_program: lookup(GIT_BIN_ENV).unwrap_or(defaults.git_program),
            git_timeout: seconds(&lookup, GIT_TIMEOUT_ENV)?,
            clipboard_program: lookup(CLIPBOARD_BIN_ENV),
            browser_program: lookup(BROWSER_BIN_ENV),
            effect_timeout: seconds(&lookup, EFFECT_TIMEOUT_ENV)?
                .unwrap_or(defaults.effect_timeout),
        })
    }

    /// Merge command-line flags; a flag can only switch a setting on.
    #[must_use]
    pub fn with_flags(mut self, blame: bool, open: bool) -> Self {
        if blame {
            self.link_kind = LinkKind::Blame;
        }
        self.open_browser |= open;
        self
    }

    /// Settings for the clipboard/browser pipeline.
    #[must_use]
    pub fn effect_settings(&self) -> EffectSettings {
        EffectSettings {
            open_browser: self.open_browser,
            clipboard_program: self.clipboard_program.clone(),
            browser_program: self.browser_program.clone(),
            timeout: self.effect_timeout,
        }
    }
}

fn text<F>(lookup: &F, key: &'static str) -> Result<Option<String>>
where
    F: Fn(&str) -> Option<OsString>,
{
    lookup(key)
        .map(|value| {
            value.into_string().map_err(|_| Error::Config {
                key,
                message: "value is not valid UTF-8".into(),
            })
        })
        .transpose()
}

fn seconds<F>(lookup: &F, key: &'static str) -> Result<Option<Duration>>
where
    F: Fn(&str) -> Option<OsString>,
{
    text(lookup, key)?
        .map(|value| {
            value
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|err| Error::Config {
                    key,
                    message: format!("'{value}' is not a whole number of seconds: {err}"),
                })
        })
        .transpose()
}
