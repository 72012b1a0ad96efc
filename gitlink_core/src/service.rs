use camino::Utf8Path;
use gitlink_effects::default_pipeline;
use tracing::info;

use crate::config::{Backend, Config};
use crate::inspector::{GitCommand, LibGit, RepositoryInspector};
use crate::{link, paths, remote, ComposedLink, EffectPipeline, Error, LinkRequest, Result};

/// High-level façade: inspect the repository, compose the link, then hand it
/// to the effect pipeline.
pub struct LinkService {
    inspector: Box<dyn RepositoryInspector>,
    effects: EffectPipeline,
}

impl LinkService {
    /// Create a service from an inspector and the effects to run on success.
    #[must_use]
    pub fn new<I>(inspector: I, effects: EffectPipeline) -> Self
    where
        I: RepositoryInspector + 'static,
    {
        Self {
            inspector: Box::new(inspector),
            effects,
        }
    }

    /// Create the service described by `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let effects = default_pipeline(&config.effect_settings());
        match config.backend {
            Backend::Command => Self::new(
                GitCommand::with_program(config.git_program.clone()).timeout(config.git_timeout),
                effects,
            ),
            Backend::Libgit2 => Self::new(LibGit::new(), effects),
        }
    }

    /// Identifiers of the effects [`LinkService::share`] will run, in order.
    pub fn effect_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.effects.ids()
    }

    /// Compose the link for `request` without running any effects.
    ///
    /// # Errors
    ///
    /// Returns the first repository query or path error encountered.
    pub fn resolve(&self, request: &LinkRequest) -> Result<ComposedLink> {
        let file = Utf8Path::new(&request.path);
        if !file.is_absolute() {
            return Err(Error::InvalidPath {
                path: request.path.clone(),
                reason: "path must be absolute".into(),
            });
        }

        let repository = self.inspector.inspect(paths::lookup_dir(file))?;
        let relative = paths::relative_to_root(file, Utf8Path::new(&repository.root))?;
        let origin = remote::normalize(&repository.remote_address);
        let link = link::compose(
            &origin,
            request.kind,
            &repository.commit,
            &relative,
            &request.line,
        );

        info!(link = %link, "composed link");
        Ok(link)
    }

    /// Compose the link, then copy it and optionally open it.
    ///
    /// # Errors
    ///
    /// Returns resolution errors before any effect runs, or
    /// [`Error::Effect`] for the first failing effect.
    pub fn share(&self, request: &LinkRequest) -> Result<ComposedLink> {
        let link = self.resolve(request)?;
        self.effects.run(link.as_str())?;
        Ok(link)
    }
}

impl std::fmt::Debug for LinkService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkService")
            .field("effects", &self.effects)
            .finish_non_exhaustive()
    }
}
