use crate::process::ProcessError;

/// Errors surfaced by side-effect handlers.
#[derive(Debug, thiserror::Error)]
pub enum EffectError {
    /// The helper program failed to run or exited unsuccessfully.
    #[error(transparent)]
    Process(#[from] ProcessError),
    /// The default browser could not be launched.
    #[error("could not launch the default browser: {source}")]
    Browser {
        /// Error reported while launching the browser.
        #[source]
        source: std::io::Error,
    },
    /// Generic failure surfaced by the handler.
    #[error("{message}")]
    Failure {
        /// Human-readable error message.
        message: String,
    },
}

impl EffectError {
    /// Helper to construct a failure from any displayable message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }
}

/// Convenience result alias for effect operations.
pub type EffectResult<T> = std::result::Result<T, EffectError>;

/// A pipeline step that failed, and the error it reported.
#[derive(Debug, thiserror::Error)]
#[error("{label} failed: {source}")]
pub struct StepFailure {
    /// Identifier of the failing effect.
    pub effect: &'static str,
    /// Human-friendly label of the failing effect.
    pub label: &'static str,
    /// Error reported by the effect.
    #[source]
    pub source: EffectError,
}
