// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Persisted session state
//!
//! The session file remembers one thing across runs: the repository the
//! operator last selected. It is loaded once at startup and rewritten in
//! full whenever the selection changes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use colored::Colorize;
use serde::{Deserialize, Serialize};
use sumario_git::{Git, GitCommand, Repository};
use tracing::{debug, info, warn};

use crate::input::{InputSource, Reply};

/// Errors reading or writing the session file
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// File system failure
    #[error("Failed to access session file {path}: {source}")]
    Io {
        /// Session file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The file exists but is not a valid session record
    #[error("Session file {path} is corrupt: {source}")]
    Corrupt {
        /// Session file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk session record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Repository selected most recently, if any
    #[serde(default)]
    pub last_repo_path: Option<PathBuf>,
}

/// Session state bound to its file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
    state: SessionState,
}

impl SessionStore {
    /// Load the session from `path`
    ///
    /// A missing file is created with default values. An unreadable or
    /// corrupt file is reported and replaced in memory by defaults; the
    /// broken file is left on disk until the next successful save.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::read_state(&path) {
            Ok(Some(state)) => {
                debug!(path = %path.display(), "Session loaded");
                Self { path, state }
            }
            Ok(None) => {
                debug!(path = %path.display(), "No session file, creating defaults");
                let store = Self {
                    path,
                    state: SessionState::default(),
                };
                if let Err(err) = store.save() {
                    warn!("{err}");
                }
                store
            }
            Err(err) => {
                warn!("{err}. Using defaults");
                Self {
                    path,
                    state: SessionState::default(),
                }
            }
        }
    }

    fn read_state(path: &Path) -> Result<Option<SessionState>, SessionError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SessionError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| SessionError::Corrupt {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Session file location
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current in-memory state
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Saved repository path, whether or not it is still valid
    #[must_use]
    pub fn repository_path(&self) -> Option<&Path> {
        self.state.last_repo_path.as_deref()
    }

    /// Write the whole state back to disk
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the directory or file cannot be written.
    pub fn save(&self) -> Result<(), SessionError> {
        let io_err = |source| SessionError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&self.state).map_err(|source| {
            SessionError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(io_err)
    }

    /// Replace the selected repository and flush immediately
    ///
    /// The in-memory selection changes even when the flush fails; the
    /// error only means it will not survive this run.
    ///
    /// # Errors
    ///
    /// Returns the save error, if any.
    pub fn set_repository(&mut self, path: PathBuf) -> Result<(), SessionError> {
        self.state.last_repo_path = Some(path);
        self.save()
    }

    /// The saved repository, re-probed now
    pub fn saved_repository<R: GitCommand>(&self, git: &Git<R>) -> Option<Repository> {
        let saved = self.repository_path()?;
        git.open(saved)
    }
}

/// Find the repository to work on
///
/// Uses the saved path if it still probes as a repository. Otherwise, when
/// `interactive` is set, asks the operator until a valid path is entered or
/// the prompt is cancelled.
///
/// # Errors
///
/// Only I/O errors from the input source are returned.
pub fn resolve_repository<R: GitCommand>(
    store: &mut SessionStore,
    git: &Git<R>,
    input: &mut dyn InputSource,
    interactive: bool,
) -> io::Result<Option<Repository>> {
    if let Some(repo) = store.saved_repository(git) {
        debug!(repo = %repo, "Using saved repository");
        return Ok(Some(repo));
    }
    if !interactive {
        return Ok(None);
    }

    match store.repository_path() {
        Some(saved) => println!(
            "The saved path '{}' is no longer a git repository.",
            saved.display()
        ),
        None => println!("No repository has been selected yet."),
    }
    prompt_for_repository(store, git, input)
}

/// Ask the operator for a repository path until a valid one is given
///
/// The accepted path is made absolute, stored and flushed before returning.
/// Blank lines are ignored. Cancelling returns `None` and leaves the stored
/// selection untouched.
///
/// # Errors
///
/// Only I/O errors from the input source are returned.
pub fn prompt_for_repository<R: GitCommand>(
    store: &mut SessionStore,
    git: &Git<R>,
    input: &mut dyn InputSource,
) -> io::Result<Option<Repository>> {
    println!("\nEnter the full path to your local git repository:");
    loop {
        let line = match input.prompt("> ")? {
            Reply::Line(line) => line,
            Reply::Cancelled => {
                println!("Operation cancelled.");
                return Ok(None);
            }
        };
        let entered = line.trim();
        if entered.is_empty() {
            continue;
        }

        let candidate = PathBuf::from(entered);
        if !candidate.is_dir() {
            println!("   {} the path is not a directory.", "Error:".red());
        } else if let Some(repo) = git.open(std::path::absolute(&candidate).unwrap_or(candidate))
        {
            if let Err(err) = store.set_repository(repo.path().to_path_buf()) {
                warn!("{err}. The selection will not be remembered");
            }
            info!(repo = %repo, "Repository selected");
            return Ok(Some(repo));
        } else {
            println!(
                "   {} the path is a directory but not a git repository.",
                "Error:".red()
            );
        }
        println!("   Try again or press Ctrl+C to cancel.");
    }
}
