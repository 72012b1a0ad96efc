use std::path::Path;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

use crate::{Error, Result};

/// Resolve `path` against `base` and lexically drop `.` and `..` components.
///
/// Symlinks are not resolved. `base` is only consulted for relative paths.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] when `path` is not valid UTF-8.
pub fn absolutize(path: &Path, base: &Utf8Path) -> Result<Utf8PathBuf> {
    let utf8 = Utf8Path::from_path(path).ok_or_else(|| Error::InvalidPath {
        path: path.display().to_string(),
        reason: "path is not valid UTF-8".into(),
    })?;

    let joined = if utf8.is_absolute() {
        utf8.to_path_buf()
    } else {
        base.join(utf8)
    };
    Ok(clean(&joined))
}

/// Directory the repository lookup starts from for `file`.
#[must_use]
pub fn lookup_dir(file: &Utf8Path) -> &Utf8Path {
    file.parent().unwrap_or(file)
}

/// Express `file` relative to `root` using `/` separators on every platform.
///
/// When a plain prefix match fails, both sides are canonicalized and
/// compared again, since git reports the root with symlinks resolved.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] when `file` lies outside `root`, or
/// [`Error::Io`] when canonicalization fails.
pub fn relative_to_root(file: &Utf8Path, root: &Utf8Path) -> Result<String> {
    if let Some(relative) = strip_root(file, root) {
        return Ok(relative);
    }

    let canonical_root = canonicalize(root)?;
    let canonical_file = canonicalize_file(file)?;
    strip_root(&canonical_file, &canonical_root).ok_or_else(|| Error::InvalidPath {
        path: file.to_string(),
        reason: format!("not inside repository root {root}"),
    })
}

fn strip_root(file: &Utf8Path, root: &Utf8Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?;
    let segments: Vec<&str> = relative
        .components()
        .map(|component| component.as_str())
        .collect();
    Some(segments.join("/"))
}

fn clean(path: &Utf8Path) -> Utf8PathBuf {
    let mut cleaned = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other.as_str()),
        }
    }
    cleaned
}

fn canonicalize(path: &Utf8Path) -> Result<Utf8PathBuf> {
    path.canonicalize_utf8().map_err(|source| Error::Io {
        path: path.to_string(),
        source,
    })
}

// The file itself may not exist yet; its directory must.
fn canonicalize_file(file: &Utf8Path) -> Result<Utf8PathBuf> {
    if let Ok(canonical) = file.canonicalize_utf8() {
        return Ok(canonical);
    }
    match (file.parent(), file.file_name()) {
        (Some(parent), Some(name)) => Ok(canonicalize(parent)?.join(name)),
        _ => canonicalize(file),
    }
}
