//! Core library for turning a file and line number into a shareable link on
//! the repository's hosting service.
//!
//! The crate is layered around three responsibilities:
//! - repository inspection (root, checked-out commit, `origin` remote)
//! - remote address normalization into a web origin
//! - link composition, followed by the clipboard/browser effect pipeline

#![warn(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::pedantic,
    missing_docs
)]
#![cfg_attr(
    not(test),
    deny(
        clippy::dbg_macro,
        clippy::expect_used,
        clippy::panic,
        clippy::print_stderr,
        clippy::print_stdout,
        clippy::todo,
        clippy::unwrap_used
    )
)]

/// Configuration assembled once at the CLI boundary.
pub mod config;
/// Repository inspection backends.
pub mod inspector;
/// Link composition.
pub mod link;
/// Path absolutization and repository-relative paths.
pub mod paths;
/// Remote address normalization.
pub mod remote;
/// End-to-end link resolution and sharing.
pub mod service;

pub use gitlink_api::{ComposedLink, LinkKind, LinkRequest, RepositoryRef};
pub use gitlink_effects::{EffectError, EffectPipeline, StepFailure};

/// Common result type for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the core library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Directory is not inside a git working tree.
    #[error("{diagnostic}")]
    NotARepository {
        /// Directory the repository lookup started from.
        path: String,
        /// Diagnostic reported by the backend.
        diagnostic: String,
    },
    /// Bare repositories have no files to link to.
    #[error("repository at {path} is bare and unsupported")]
    BareRepository {
        /// Path of the repository lacking a working tree.
        path: String,
    },
    /// The git executable could not be run to completion.
    #[error("failed to run {program}: {reason}")]
    VcsUnavailable {
        /// Program that was invoked.
        program: String,
        /// Why it could not be run.
        reason: String,
    },
    /// HEAD does not resolve to a commit.
    #[error("{diagnostic}")]
    NoCommits {
        /// Repository root that was queried.
        root: String,
        /// Diagnostic reported by the backend.
        diagnostic: String,
    },
    /// No `origin` remote is configured.
    #[error("{diagnostic}")]
    NoRemote {
        /// Repository root that was queried.
        root: String,
        /// Diagnostic reported by the backend.
        diagnostic: String,
    },
    /// Underlying libgit2 operation failed.
    #[error("git error: {source}")]
    Git {
        /// Original libgit2 error.
        #[from]
        source: git2::Error,
    },
    /// The file path cannot be expressed relative to the repository.
    #[error("invalid path {path}: {reason}")]
    InvalidPath {
        /// Offending path.
        path: String,
        /// Why it was rejected.
        reason: String,
    },
    /// Filesystem interaction failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// Filesystem path involved in the failed operation.
        path: String,
        /// Source I/O error returned by the standard library.
        #[source]
        source: std::io::Error,
    },
    /// An environment override could not be parsed.
    #[error("invalid value for {key}: {message}")]
    Config {
        /// Environment variable name.
        key: &'static str,
        /// What was wrong with the value.
        message: String,
    },
    /// A clipboard or browser step failed after the link was composed.
    #[error("failed to {label}: {source}")]
    Effect {
        /// Identifier of the failing effect.
        effect: &'static str,
        /// Human-friendly action label.
        label: &'static str,
        /// Error reported by the effect.
        #[source]
        source: EffectError,
    },
}

impl From<StepFailure> for Error {
    fn from(failure: StepFailure) -> Self {
        Self::Effect {
            effect: failure.effect,
            label: failure.label,
            source: failure.source,
        }
    }
}
