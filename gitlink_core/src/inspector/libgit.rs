use std::path::Path;

use camino::{Utf8Path, Utf8PathBuf};
use git2::{ErrorClass, ErrorCode, Repository as GitRepository};
use tracing::debug;

use super::{RepositoryInspector, ORIGIN};
use crate::{Error, Result};

/// Inspector backed by libgit2, for hosts without a git executable.
#[derive(Debug, Clone, Copy, Default)]
pub struct LibGit;

impl LibGit {
    /// Construct the libgit2 inspector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl RepositoryInspector for LibGit {
    fn resolve_root(&self, dir: &Utf8Path) -> Result<Utf8PathBuf> {
        debug!(dir = %dir, "discovering repository with libgit2");
        // A missing lookup directory fails with an OS class; both mean no repository.
        let repo = match GitRepository::discover(dir) {
            Ok(repo) => repo,
            Err(err) if err.code() == ErrorCode::NotFound => {
                return Err(Error::NotARepository {
                    path: dir.to_string(),
                    diagnostic: err.message().to_string(),
                })
            }
            Err(err) => return Err(Error::from(err)),
        };

        let workdir = repo.workdir().ok_or_else(|| Error::BareRepository {
            path: display_path(repo.path()),
        })?;
        let root = Utf8Path::from_path(workdir).ok_or_else(|| Error::InvalidPath {
            path: display_path(workdir),
            reason: "repository root is not valid UTF-8".into(),
        })?;

        // libgit2 reports the working directory with a trailing separator.
        Ok(root.components().collect())
    }

    fn resolve_commit(&self, root: &Utf8Path) -> Result<String> {
        let repo = GitRepository::open(root)?;
        let head = match repo.head() {
            Ok(head) => head,
            Err(err)
                if matches!(
                    (err.class(), err.code()),
                    (
                        ErrorClass::Reference,
                        ErrorCode::NotFound | ErrorCode::UnbornBranch
                    )
                ) =>
            {
                return Err(Error::NoCommits {
                    root: root.to_string(),
                    diagnostic: err.message().to_string(),
                })
            }
            Err(err) => return Err(Error::from(err)),
        };

        let commit = head.resolve()?.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    fn resolve_remote(&self, root: &Utf8Path) -> Result<String> {
        let repo = GitRepository::open(root)?;
        let remote = match repo.find_remote(ORIGIN) {
            Ok(remote) => remote,
            Err(err) if err.code() == ErrorCode::NotFound => {
                return Err(Error::NoRemote {
                    root: root.to_string(),
                    diagnostic: err.message().to_string(),
                })
            }
            Err(err) => return Err(Error::from(err)),
        };

        remote
            .url()
            .map(str::to_owned)
            .ok_or_else(|| Error::NoRemote {
                root: root.to_string(),
                diagnostic: format!("remote '{ORIGIN}' has no valid UTF-8 URL"),
            })
    }
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
