// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for sumario-git

use thiserror::Error;

/// Errors that can occur while querying the git executable
#[derive(Debug, Error)]
pub enum GitError {
    /// The git executable could not be found on the host
    #[error("git executable not found: {program}")]
    NotInstalled {
        /// The program name or path that was attempted
        program: String,
    },

    /// The git executable could not be started for another reason
    #[error("Failed to start git: {0}")]
    Spawn(#[from] std::io::Error),

    /// git ran but exited with a non-zero status
    #[error("`{command}` failed ({status}): {stderr}")]
    CommandFailed {
        /// The command line that was executed
        command: String,
        /// Exit status reported by the process, as displayed by the OS
        status: String,
        /// Trimmed standard error output
        stderr: String,
    },

    /// The target path is not a directory
    #[error("Not a directory: {path}")]
    NotADirectory {
        /// The path that was probed
        path: String,
    },

    /// git produced output the adapter could not interpret
    #[error("Unexpected git output: {message}")]
    InvalidOutput {
        /// What was wrong with the output
        message: String,
    },
}

impl GitError {
    /// Diagnostic text reported by git, if the command ran and failed
    #[must_use]
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }

    /// Whether this error means the executable itself is missing
    #[must_use]
    pub fn is_not_installed(&self) -> bool {
        matches!(self, Self::NotInstalled { .. })
    }
}
