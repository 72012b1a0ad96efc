//! Assembly of the final line-anchored URL.

use gitlink_api::{ComposedLink, LinkKind};

/// Build `{origin}/{kind}/{commit}/{relative_path}#L{line}`.
///
/// `relative_path` must already use `/` separators; no translation happens
/// here. `line` is embedded verbatim, without numeric validation.
#[must_use]
pub fn compose(
    origin: &str,
    kind: LinkKind,
    commit: &str,
    relative_path: &str,
    line: &str,
) -> ComposedLink {
    ComposedLink::new(format!("{origin}/{kind}/{commit}/{relative_path}#L{line}"))
}
