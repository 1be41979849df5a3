// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::{debug, warn};

use crate::domain::AuthorIdentity;
use crate::error::{Error, Result};

/// `git` with `GIT_DIR`/`GIT_WORK_TREE` stripped so an inherited environment
/// cannot redirect us away from the work tree we opened.
fn git_cmd(work_dir: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .current_dir(work_dir);
    cmd
}

fn check(output: Output) -> Result<Output> {
    if output.status.success() {
        Ok(output)
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(Error::Git(stderr.trim().to_string()))
    }
}

pub struct GitService {
    repo: gix::Repository,
    work_dir: PathBuf,
}

impl GitService {
    pub fn open(path: &Path) -> Result<Self> {
        let repo = gix::open(path).map_err(|e| Error::RepositoryUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let work_dir = repo
            .work_dir()
            .ok_or_else(|| Error::RepositoryUnavailable {
                path: path.to_path_buf(),
                reason: "bare repository has no work tree".into(),
            })?
            .to_path_buf();

        debug!(work_dir = %work_dir.display(), "repository opened");
        Ok(Self { repo, work_dir })
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn check_state(&self) -> Result<()> {
        if matches!(self.repo.state(), Some(gix::state::InProgress::Merge)) {
            return Err(Error::MergeInProgress);
        }
        Ok(())
    }

    /// Resolve `path` against the work tree, refusing anything that does not
    /// exist or escapes it.
    fn stageable(&self, path: &Path) -> Option<PathBuf> {
        let full = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.work_dir.join(path)
        };
        let canonical = full.canonicalize().ok()?;
        let root = self.work_dir.canonicalize().ok()?;
        let relative = canonical.strip_prefix(&root).ok()?;
        if relative.starts_with(".git") {
            return None;
        }
        Some(relative.to_path_buf())
    }

    /// Stage exactly the given paths. No glob expansion happens here.
    ///
    /// Returns the work-tree-relative paths that were staged.
    pub fn stage(&self, files: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut valid = Vec::new();
        for file in files {
            match self.stageable(file) {
                Some(rel) => valid.push(rel),
                None => warn!(path = %file.display(), "skipping path outside work tree or missing"),
            }
        }

        if valid.is_empty() {
            return Err(Error::NothingToCommit);
        }

        check(
            git_cmd(&self.work_dir)
                .args(["--literal-pathspecs", "add", "--"])
                .args(&valid)
                .output()?,
        )?;

        if !self.has_staged_changes()? {
            return Err(Error::NothingToCommit);
        }

        debug!(count = valid.len(), "files staged");
        Ok(valid)
    }

    fn has_staged_changes(&self) -> Result<bool> {
        let output = git_cmd(&self.work_dir)
            .args(["diff", "--cached", "--quiet", "--no-ext-diff"])
            .output()?;

        // --quiet: exit 0 means no differences, 1 means differences
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(Error::Git(stderr.trim().to_string()))
            }
        }
    }

    /// Commit the index with author and committer date both set to `date`
    /// (`YYYY-MM-DD HH:MM:SS`). Returns the new commit id.
    pub fn commit_dated(
        &self,
        message: &str,
        author: &AuthorIdentity,
        date: &str,
    ) -> Result<String> {
        check(
            git_cmd(&self.work_dir)
                .args(["commit", "--quiet", "--no-gpg-sign", "-m", message])
                .env("GIT_AUTHOR_NAME", &author.name)
                .env("GIT_AUTHOR_EMAIL", &author.email)
                .env("GIT_AUTHOR_DATE", date)
                .env("GIT_COMMITTER_NAME", &author.name)
                .env("GIT_COMMITTER_EMAIL", &author.email)
                .env("GIT_COMMITTER_DATE", date)
                .output()?,
        )?;

        self.head_commit()
    }

    pub fn head_commit(&self) -> Result<String> {
        let output = check(
            git_cmd(&self.work_dir)
                .args(["rev-parse", "HEAD"])
                .output()?,
        )?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
