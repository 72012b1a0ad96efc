//! Side effects applied to a composed link, and the process plumbing they share
//! with the core's git queries.

mod browser;
mod clipboard;
mod pipeline;
pub mod process;
mod types;

use std::ffi::OsString;
use std::time::Duration;

pub use browser::BrowserEffect;
pub use clipboard::ClipboardEffect;
pub use pipeline::EffectPipeline;
pub use types::{EffectError, EffectResult, StepFailure};

/// Default upper bound on how long a helper program may run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait implemented by downstream consumers of a composed link.
pub trait LinkEffect: Send + Sync {
    /// Stable identifier used for logging and error reporting.
    fn id(&self) -> &'static str;

    /// Human-friendly description of the action.
    fn label(&self) -> &'static str;

    /// Apply the effect to `url`.
    ///
    /// # Errors
    ///
    /// Implementors should surface helper-program or I/O failures.
    fn apply(&self, url: &str) -> EffectResult<()>;
}

/// Inputs for [`default_pipeline`].
#[derive(Debug, Clone)]
pub struct EffectSettings {
    /// Also open the link in a browser after copying it.
    pub open_browser: bool,
    /// Replacement clipboard helper; `None` uses the platform default.
    pub clipboard_program: Option<OsString>,
    /// Replacement URL opener; `None` uses the platform default.
    pub browser_program: Option<OsString>,
    /// Upper bound on each helper's run time.
    pub timeout: Duration,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            open_browser: false,
            clipboard_program: None,
            browser_program: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Build the standard pipeline: copy to the clipboard, then optionally open
/// the browser.
#[must_use]
pub fn default_pipeline(settings: &EffectSettings) -> EffectPipeline {
    let clipboard = settings
        .clipboard_program
        .as_ref()
        .map_or_else(ClipboardEffect::system, |program| {
            ClipboardEffect::with_program(program.clone())
        });

    let mut pipeline = EffectPipeline::new().with(clipboard.timeout(settings.timeout));

    if settings.open_browser {
        let browser = settings
            .browser_program
            .as_ref()
            .map_or_else(BrowserEffect::system, |program| {
                BrowserEffect::with_program(program.clone())
            });
        pipeline.register(browser.timeout(settings.timeout));
    }

    pipeline
}
