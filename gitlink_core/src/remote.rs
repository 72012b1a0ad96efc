//! Conversion of `origin` remote addresses into web origins.

const SSH_PREFIX: &str = "git@";
const GIT_SUFFIX: &str = ".git";

/// Convert a remote address into the `https://host/owner/repo` origin used
/// for links.
///
/// SSH shorthand (`git@host:owner/repo.git`) becomes
/// `https://host/owner/repo`; only the first colon separates host from path.
/// Any other address is passed through. A trailing `.git` is dropped in both
/// cases. The function is total: malformed input yields a best-effort string.
#[must_use]
pub fn normalize(remote: &str) -> String {
    let origin = match remote.strip_prefix(SSH_PREFIX) {
        Some(rest) => match rest.split_once(':') {
            Some((host, path)) => format!("https://{host}/{path}"),
            None => format!("https://{rest}"),
        },
        None => remote.to_string(),
    };

    match origin.strip_suffix(GIT_SUFFIX) {
        Some(stripped) => stripped.to_string(),
        None => origin,
    }
}
