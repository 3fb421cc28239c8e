// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Patch extraction for a single commit
//!
//! The direct route is `git format-patch -1 <hash> --stdout`. When git
//! reports a bad revision (the parent of a root commit cannot be resolved),
//! or produces no output at all (empty and merge commits), the whole commit
//! is taken from `git show <hash>` instead. Nothing is remembered between
//! calls.

use std::path::Path;

use tracing::{debug, info};

use crate::commit::{Patch, PatchSource};
use crate::error::GitError;
use crate::runner::GitCommand;

/// Whether git's diagnostic text says a revision could not be resolved
///
/// This is the only place that inspects git's wording.
#[must_use]
pub fn is_bad_revision(stderr: &str) -> bool {
    stderr.contains("bad revision")
}

/// Produce the patch text for `full_hash`
///
/// # Errors
///
/// Returns the `format-patch` error for any failure other than a bad
/// revision, or the `show` error if the fallback fails too.
pub fn resolve_patch<R: GitCommand + ?Sized>(
    runner: &R,
    repo: &Path,
    full_hash: &str,
) -> Result<Patch, GitError> {
    match runner.output(repo, &["format-patch", "-1", full_hash, "--stdout"]) {
        Ok(text) if !text.trim().is_empty() => {
            debug!(full_hash, bytes = text.len(), "format-patch succeeded");
            Ok(Patch {
                text,
                source: PatchSource::FormatPatch,
            })
        }
        Ok(_) => {
            info!(
                commit = short(full_hash),
                "format-patch produced no output, using git show instead"
            );
            show_commit(runner, repo, full_hash)
        }
        Err(err) if err.stderr().is_some_and(is_bad_revision) => {
            info!(
                commit = short(full_hash),
                "No parent to diff against (first commit?), using git show instead"
            );
            show_commit(runner, repo, full_hash)
        }
        Err(err) => Err(err),
    }
}

fn show_commit<R: GitCommand + ?Sized>(
    runner: &R,
    repo: &Path,
    full_hash: &str,
) -> Result<Patch, GitError> {
    let text = runner.output(repo, &["show", "--no-color", full_hash])?;
    Ok(Patch {
        text,
        source: PatchSource::Show,
    })
}

fn short(hash: &str) -> &str {
    hash.get(..7).unwrap_or(hash)
}
