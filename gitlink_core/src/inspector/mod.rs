//! Queries answering "which repository, which commit, which remote".

mod command;
mod libgit;

use camino::{Utf8Path, Utf8PathBuf};
use gitlink_api::RepositoryRef;
use tracing::debug;

use crate::Result;

pub use command::GitCommand;
pub use libgit::LibGit;

/// Name of the only remote links are built for.
pub const ORIGIN: &str = "origin";

/// Read-only version-control queries needed to build a link.
pub trait RepositoryInspector: Send + Sync {
    /// Top-level directory of the working tree containing `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotARepository`] when `dir` is outside any
    /// working tree, or [`crate::Error::VcsUnavailable`] when the backend
    /// cannot run.
    fn resolve_root(&self, dir: &Utf8Path) -> Result<Utf8PathBuf>;

    /// Full identifier of the revision checked out at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoCommits`] when HEAD does not resolve.
    fn resolve_commit(&self, root: &Utf8Path) -> Result<String>;

    /// Configured URL of the `origin` remote of `root`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoRemote`] when `origin` is not configured.
    fn resolve_remote(&self, root: &Utf8Path) -> Result<String>;

    /// Run the three queries in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Propagates the first query error unchanged.
    fn inspect(&self, dir: &Utf8Path) -> Result<RepositoryRef> {
        let root = self.resolve_root(dir)?;
        let commit = self.resolve_commit(&root)?;
        let remote_address = self.resolve_remote(&root)?;
        debug!(root = %root, commit = %commit, remote = %remote_address, "inspected repository");
        Ok(RepositoryRef::new(root.into_string(), commit, remote_address))
    }
}

impl<T> RepositoryInspector for Box<T>
where
    T: RepositoryInspector + ?Sized,
{
    fn resolve_root(&self, dir: &Utf8Path) -> Result<Utf8PathBuf> {
        (**self).resolve_root(dir)
    }

    fn resolve_commit(&self, root: &Utf8Path) -> Result<String> {
        (**self).resolve_commit(root)
    }

    fn resolve_remote(&self, root: &Utf8Path) -> Result<String> {
        (**self).resolve_remote(root)
    }

    fn inspect(&self, dir: &Utf8Path) -> Result<RepositoryRef> {
        (**self).inspect(dir)
    }
}
