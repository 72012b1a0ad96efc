use serde::{Deserialize, Serialize};

/// Repository facts resolved for a single invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRef {
    /// Absolute path to the repository working tree.
    pub root: String,
    /// Full identifier of the checked-out revision (e.g., git SHA).
    pub commit: String,
    /// Raw URL configured for the `origin` remote.
    pub remote_address: String,
}

impl RepositoryRef {
    /// Construct a new repository reference.
    #[must_use]
    pub fn new(
        root: impl Into<String>,
        commit: impl Into<String>,
        remote_address: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            commit: commit.into(),
            remote_address: remote_address.into(),
        }
    }
}
