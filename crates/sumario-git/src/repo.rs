// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Repository queries backed by the git executable
//!
//! [`Git`] turns typed questions into git invocations. Expected failures
//! (missing executable, not a repository, empty history, non-zero exit) are
//! logged and collapsed into `None`/`false`; nothing here panics or returns
//! an error for ordinary input.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, error, warn};

use crate::commit::{
    CommitEntry, CommitRef, DATE_FORMAT, LOG_FORMAT, Patch, parse_log_output,
};
use crate::error::GitError;
use crate::patch::resolve_patch;
use crate::runner::{GitCli, GitCommand};

/// Number of commits offered for selection by default
pub const DEFAULT_COMMIT_LIMIT: usize = 30;

/// Returned by [`Git::short_hash_of`] when git cannot answer
pub const SHORT_HASH_PLACEHOLDER: &str = "errorhash";

/// A path that passed the work-tree probe
///
/// Only [`Git::open`] constructs one, so holding a `Repository` means the
/// probe ran. It is still a snapshot: callers that keep a path across runs
/// must reopen it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    /// Path the operator selected
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consume the reference and return its path
    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Git query adapter
#[derive(Debug, Clone, Default)]
pub struct Git<R = GitCli> {
    runner: R,
}

impl Git<GitCli> {
    /// Adapter using the `git` found on `PATH`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: GitCommand> Git<R> {
    /// Adapter over a specific runner
    #[must_use]
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    /// The underlying runner
    #[must_use]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Whether `path` is a directory inside a git work tree
    ///
    /// Never fails: a missing path, a file, a missing executable or a
    /// non-repository directory all yield `false`.
    #[must_use]
    pub fn is_valid_repository(&self, path: &Path) -> bool {
        match self.probe(path) {
            Ok(inside) => inside,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "Repository probe failed");
                if err.is_not_installed() {
                    error!("{err}. Make sure git is installed and on PATH");
                }
                false
            }
        }
    }

    /// Probe `path` and wrap it as a [`Repository`] if it is one
    #[must_use]
    pub fn open(&self, path: impl AsRef<Path>) -> Option<Repository> {
        let path = path.as_ref();
        self.is_valid_repository(path).then(|| Repository {
            path: path.to_path_buf(),
        })
    }

    fn probe(&self, path: &Path) -> Result<bool, GitError> {
        if !path.is_dir() {
            return Err(GitError::NotADirectory {
                path: path.display().to_string(),
            });
        }
        let out = self
            .runner
            .output(path, &["rev-parse", "--is-inside-work-tree"])?;
        Ok(out.trim() == "true")
    }

    /// Full hash and author date of HEAD
    ///
    /// `None` if the executable is missing, the repository has no commits,
    /// or either query fails.
    #[must_use]
    pub fn latest_commit_ref(&self, repo: &Repository) -> Option<CommitRef> {
        report(self.try_latest_commit_ref(repo), "read the latest commit")
    }

    fn try_latest_commit_ref(&self, repo: &Repository) -> Result<CommitRef, GitError> {
        let full_hash = self
            .runner
            .output(repo.path(), &["rev-parse", "HEAD"])?
            .trim()
            .to_string();

        let date_arg = format!("--date=format:{DATE_FORMAT}");
        let date = self.runner.output(
            repo.path(),
            &["log", "-1", "--pretty=format:%ad", &date_arg],
        )?;
        let author_date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|e| {
            GitError::InvalidOutput {
                message: format!("author date {:?}: {e}", date.trim()),
            }
        })?;

        debug!(%full_hash, %author_date, "Latest commit");
        Ok(CommitRef {
            full_hash,
            author_date,
        })
    }

    /// Up to `limit` commits reachable from HEAD, newest first
    ///
    /// Malformed lines are skipped. `None` only when git itself fails.
    #[must_use]
    pub fn recent_commits(&self, repo: &Repository, limit: usize) -> Option<Vec<CommitEntry>> {
        let pretty = format!("--pretty=format:{LOG_FORMAT}");
        let date_arg = format!("--date=format:{DATE_FORMAT}");
        let max_count = format!("--max-count={limit}");
        let output = self.runner.output(
            repo.path(),
            &["log", "--no-color", &pretty, &date_arg, &max_count],
        );

        report(output, "list commits").map(|text| {
            let entries = parse_log_output(&text);
            debug!(count = entries.len(), limit, "Listed commits");
            entries
        })
    }

    /// Patch text for one commit, falling back to `git show` for root commits
    #[must_use]
    pub fn patch_for_commit(&self, repo: &Repository, full_hash: &str) -> Option<Patch> {
        report(
            resolve_patch(&self.runner, repo.path(), full_hash),
            "generate the commit patch",
        )
    }

    /// Abbreviated hash of `reference`, or [`SHORT_HASH_PLACEHOLDER`]
    #[must_use]
    pub fn short_hash_of(&self, repo: &Repository, reference: &str) -> String {
        match self
            .runner
            .output(repo.path(), &["rev-parse", "--short", reference])
        {
            Ok(out) if !out.trim().is_empty() => out.trim().to_string(),
            Ok(_) => SHORT_HASH_PLACEHOLDER.to_string(),
            Err(err) => {
                debug!(reference, error = %err, "Short hash unavailable");
                SHORT_HASH_PLACEHOLDER.to_string()
            }
        }
    }

    /// Short hash of HEAD
    #[must_use]
    pub fn head_short_hash(&self, repo: &Repository) -> String {
        self.short_hash_of(repo, "HEAD")
    }
}

fn report<T>(result: Result<T, GitError>, action: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err @ GitError::NotInstalled { .. }) => {
            error!("Could not {action}: {err}. Make sure git is installed and on PATH");
            None
        }
        Err(err) => {
            warn!("Could not {action}: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Returns queued results in order
    #[derive(Default)]
    struct QueuedGit {
        replies: RefCell<VecDeque<Result<String, GitError>>>,
        seen: RefCell<Vec<Vec<String>>>,
    }

    impl QueuedGit {
        fn reply(self, out: &str) -> Self {
            self.replies.borrow_mut().push_back(Ok(out.to_string()));
            self
        }

        fn fail(self, stderr: &str) -> Self {
            self.replies
                .borrow_mut()
                .push_back(Err(GitError::CommandFailed {
                    command: "git".to_string(),
                    status: "exit status: 128".to_string(),
                    stderr: stderr.to_string(),
                }));
            self
        }
    }

    impl GitCommand for QueuedGit {
        fn output(&self, _repo: &Path, args: &[&str]) -> Result<String, GitError> {
            self.seen
                .borrow_mut()
                .push(args.iter().map(|a| a.to_string()).collect());
            self.replies
                .borrow_mut()
                .pop_front()
                .expect("unexpected git call")
        }
    }

    fn repo() -> Repository {
        Repository {
            path: PathBuf::from("/repo"),
        }
    }

    #[test]
    fn test_nonexistent_path_is_not_a_repository() {
        let git = Git::with_runner(QueuedGit::default());
        assert!(!git.is_valid_repository(Path::new("/nonexistent/path/12345")));
        assert!(git.runner().seen.borrow().is_empty(), "git must not run");
    }

    #[test]
    fn test_open_returns_none_for_nonexistent_path() {
        let git = Git::with_runner(QueuedGit::default());
        assert!(git.open("/nonexistent/path/12345").is_none());
    }

    #[test]
    fn test_probe_reads_true() {
        let git = Git::with_runner(QueuedGit::default().reply("true\n"));
        let dir = std::env::temp_dir();
        let repo = git.open(&dir).expect("probe said true");
        assert_eq!(repo.path(), dir.as_path());
    }

    #[test]
    fn test_probe_false_or_failure() {
        let dir = std::env::temp_dir();
        let git = Git::with_runner(QueuedGit::default().reply("false\n"));
        assert!(!git.is_valid_repository(&dir));

        let git = Git::with_runner(QueuedGit::default().fail("fatal: not a git repository"));
        assert!(!git.is_valid_repository(&dir));
    }

    #[test]
    fn test_latest_commit_ref() {
        let git = Git::with_runner(
            QueuedGit::default()
                .reply("1945ab9c752534e733c38ba0109dc3b741f0a6eb\n")
                .reply("2026-01-17"),
        );
        let head = git.latest_commit_ref(&repo()).expect("head");
        assert_eq!(head.full_hash, "1945ab9c752534e733c38ba0109dc3b741f0a6eb");
        assert_eq!(head.author_date, NaiveDate::from_ymd_opt(2026, 1, 17).unwrap());

        let seen = git.runner().seen.borrow();
        assert_eq!(seen[1][0], "log");
        assert!(seen[1].contains(&"--date=format:%Y-%m-%d".to_string()));
    }

    #[test]
    fn test_latest_commit_ref_empty_repository() {
        let git = Git::with_runner(
            QueuedGit::default().fail("fatal: ambiguous argument 'HEAD': unknown revision"),
        );
        assert!(git.latest_commit_ref(&repo()).is_none());
    }

    #[test]
    fn test_latest_commit_ref_bad_date() {
        let git = Git::with_runner(QueuedGit::default().reply("abc\n").reply("yesterday"));
        assert!(git.latest_commit_ref(&repo()).is_none());
    }

    #[test]
    fn test_recent_commits_passes_limit() {
        let git = Git::with_runner(QueuedGit::default().reply(""));
        let entries = git.recent_commits(&repo(), 5).expect("listing");
        assert!(entries.is_empty());

        let seen = git.runner().seen.borrow();
        assert!(seen[0].contains(&"--max-count=5".to_string()));
        assert!(seen[0].contains(&format!("--pretty=format:{LOG_FORMAT}")));
    }

    #[test]
    fn test_recent_commits_failure_is_none() {
        let git = Git::with_runner(QueuedGit::default().fail("fatal: bad default revision 'HEAD'"));
        assert!(git.recent_commits(&repo(), 30).is_none());
    }

    #[test]
    fn test_short_hash_placeholder_on_failure() {
        let git = Git::with_runner(QueuedGit::default().fail("fatal: Needed a single revision"));
        assert_eq!(git.short_hash_of(&repo(), "HEAD"), SHORT_HASH_PLACEHOLDER);
    }

    #[test]
    fn test_short_hash_trimmed() {
        let git = Git::with_runner(QueuedGit::default().reply("1945ab9\n"));
        assert_eq!(git.head_short_hash(&repo()), "1945ab9");
    }

    #[test]
    fn test_repository_display() {
        assert_eq!(repo().to_string(), "/repo");
    }
}
