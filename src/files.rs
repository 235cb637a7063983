//! Acquire the file set a plan is built over.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use ignore::WalkBuilder;
use thiserror::Error;
use tracing::debug;

/// How the files to plan over are chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum FileSelection {
    /// Paths given explicitly on the command line.
    Explicit(Vec<PathBuf>),
    /// Files currently staged in git.
    Staged,
    /// Every file in the working tree, honouring ignore files.
    WorkingTree,
}

#[derive(Debug, Error)]
pub enum FileSetError {
    #[error("failed to run git while listing staged files: {source}")]
    Git {
        #[source]
        source: io::Error,
    },
    #[error("git exited with {status} while listing staged files")]
    GitFailed { status: ExitStatus },
    #[error("failed to walk the working tree: {0}")]
    Walk(#[from] ignore::Error),
}

/// Collect the selected files as paths relative to `root`.
pub fn collect(selection: &FileSelection, root: &Path) -> Result<Vec<PathBuf>, FileSetError> {
    let files = match selection {
        FileSelection::Explicit(paths) => normalize(paths, root),
        FileSelection::Staged => staged_files(root)?,
        FileSelection::WorkingTree => walk_tree(root)?,
    };
    debug!(count = files.len(), "collected file set");
    Ok(files)
}

/// Make explicit paths root-relative where possible, preserving order.
fn normalize(paths: &[PathBuf], root: &Path) -> Vec<PathBuf> {
    paths
        .iter()
        .map(|path| match path.strip_prefix(root) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => path.clone(),
        })
        .collect()
}

/// List staged files via `git diff --cached`, the same set a pre-commit
/// hook would see. Deleted files are excluded since there is nothing left
/// to run a tool over.
fn staged_files(root: &Path) -> Result<Vec<PathBuf>, FileSetError> {
    let output = Command::new("git")
        .arg("-C")
        .arg(root)
        .args(["diff", "--cached", "--name-only", "--diff-filter=ACMR", "-z"])
        .output()
        .map_err(|source| FileSetError::Git { source })?;

    if !output.status.success() {
        return Err(FileSetError::GitFailed {
            status: output.status,
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout
        .split('\0')
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .collect())
}

/// Walk the working tree with gitignore semantics, skipping hidden files.
/// Results are sorted for stable plan output.
fn walk_tree(root: &Path) -> Result<Vec<PathBuf>, FileSetError> {
    let mut files = Vec::new();
    for entry in WalkBuilder::new(root).build() {
        let entry = entry?;
        if entry.file_type().is_some_and(|kind| kind.is_file()) {
            let path = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .to_path_buf();
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
