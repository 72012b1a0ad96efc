use std::fmt;

use serde::{Deserialize, Serialize};

/// View of the hosting service a link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Plain file view.
    #[default]
    Blob,
    /// Line-by-line authorship view.
    Blame,
}

impl LinkKind {
    /// Select the blame view when `blame` is set, otherwise the blob view.
    #[must_use]
    pub const fn from_blame(blame: bool) -> Self {
        if blame {
            Self::Blame
        } else {
            Self::Blob
        }
    }

    /// URL path segment for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Blame => "blame",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A caller's request for a line-anchored link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRequest {
    /// Absolute path of the file to link to.
    pub path: String,
    /// Line number, embedded verbatim in the anchor.
    pub line: String,
    /// Which view the link should open.
    #[serde(default)]
    pub kind: LinkKind,
}

impl LinkRequest {
    /// Construct a new request.
    #[must_use]
    pub fn new(path: impl Into<String>, line: impl Into<String>, kind: LinkKind) -> Self {
        Self {
            path: path.into(),
            line: line.into(),
            kind,
        }
    }
}

/// Final shareable URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComposedLink(String);

impl ComposedLink {
    /// Wrap an already composed URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Borrow the URL text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComposedLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
