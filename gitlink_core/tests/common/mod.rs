#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use camino::Utf8PathBuf;
use git2::{IndexAddOption, Repository as GitRepository};
use gitlink_core::{Error, Result};
use tempfile::TempDir;

pub const REMOTE: &str = "git@github.com:acme/widgets.git";

/// Temporary repository with one commit and an `origin` remote.
pub struct Fixture {
    pub temp: TempDir,
    pub repo: GitRepository,
}

impl Fixture {
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().expect("tempdir");
        let repo = GitRepository::init(temp.path())?;
        Ok(Self { temp, repo })
    }

    pub fn committed() -> Result<Self> {
        let fixture = Self::new()?;
        fixture.write("src/main.rs", "fn main() {}\n");
        fixture.commit("Initial commit")?;
        fixture.repo.remote("origin", REMOTE)?;
        Ok(fixture)
    }

    /// Canonical root, matching what git and libgit2 report.
    pub fn root(&self) -> Utf8PathBuf {
        utf8(&self.temp.path().canonicalize().expect("canonical root"))
    }

    pub fn path(&self, relative: &str) -> Utf8PathBuf {
        self.root().join(relative)
    }

    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.temp.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, contents).expect("write file");
    }

    pub fn head(&self) -> Result<String> {
        Ok(self.repo.head()?.peel_to_commit()?.id().to_string())
    }

    pub fn commit(&self, message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_all(["*"], IndexAddOption::DEFAULT, None)?;
        index.write()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = git2::Signature::now("Test User", "test@example.com")?;

        let parents = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit()?],
            Err(err)
                if matches!(
                    err.code(),
                    git2::ErrorCode::NotFound | git2::ErrorCode::UnbornBranch
                ) =>
            {
                Vec::new()
            }
            Err(err) => return Err(Error::from(err)),
        };

        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
        self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parent_refs,
        )?;
        Ok(())
    }
}

pub fn utf8(path: &Path) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(path.to_path_buf()).expect("utf8 path")
}

/// Whether a usable `git` executable is on `PATH`.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[cfg(unix)]
pub fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, format!("#!/bin/sh\n{body}\n")).expect("write script");
    let mut perms = fs::metadata(path).expect("metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("set perms");
}

pub fn outside_dir() -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("tempdir");
    let dir = temp.path().canonicalize().expect("canonical");
    (temp, dir)
}
