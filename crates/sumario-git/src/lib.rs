// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! sumario-git: commit listing and patch extraction for sumario-commit
//!
//! This library crate wraps the `git` executable to validate repositories,
//! list recent commits and produce the patch text of a single commit,
//! falling back to `git show` when a commit has no parent to diff against.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use sumario_git::{DEFAULT_COMMIT_LIMIT, Git};
//!
//! let git = Git::new();
//! let repo = git.open(".").expect("not a git repository");
//! for entry in git.recent_commits(&repo, DEFAULT_COMMIT_LIMIT).unwrap_or_default() {
//!     println!("{} {} {}", entry.short_hash, entry.date_string(), entry.subject);
//! }
//! ```

pub mod commit;
pub mod error;
pub mod patch;
pub mod repo;
pub mod runner;

pub use commit::{
    CommitEntry, CommitRef, LOG_FORMAT, Patch, PatchSource, SUBJECT_DISPLAY_WIDTH, parse_log_output,
};
pub use error::GitError;
pub use patch::{is_bad_revision, resolve_patch};
pub use repo::{DEFAULT_COMMIT_LIMIT, Git, Repository, SHORT_HASH_PLACEHOLDER};
pub use runner::{GitCli, GitCommand};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::{CommitEntry, CommitRef, Patch, PatchSource};
    pub use crate::error::GitError;
    pub use crate::repo::{Git, Repository};
    pub use crate::runner::{GitCli, GitCommand};
}
