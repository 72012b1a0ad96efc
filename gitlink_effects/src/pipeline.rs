//! Ordered list of side effects applied to a composed link.

use tracing::debug;

use crate::{LinkEffect, StepFailure};

/// Effects applied in registration order, stopping at the first failure.
#[derive(Default)]
pub struct EffectPipeline {
    steps: Vec<Box<dyn LinkEffect>>,
}

impl EffectPipeline {
    /// Create an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an effect to the end of the pipeline.
    pub fn register<E>(&mut self, effect: E)
    where
        E: LinkEffect + 'static,
    {
        self.steps.push(Box::new(effect));
    }

    /// Builder-style variant of [`EffectPipeline::register`].
    #[must_use]
    pub fn with<E>(mut self, effect: E) -> Self
    where
        E: LinkEffect + 'static,
    {
        self.register(effect);
        self
    }

    /// Identifiers of the registered effects, in execution order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.steps.iter().map(|step| step.id())
    }

    /// Apply every effect to `url`.
    ///
    /// # Errors
    ///
    /// Returns the first [`StepFailure`]; effects after it are not run.
    pub fn run(&self, url: &str) -> Result<(), StepFailure> {
        for step in &self.steps {
            debug!(effect = step.id(), "applying effect");
            step.apply(url).map_err(|source| StepFailure {
                effect: step.id(),
                label: step.label(),
                source,
            })?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for EffectPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<&str> = self.ids().collect();
        f.debug_struct("EffectPipeline")
            .field("steps", &ids)
            .finish()
    }
}
