// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Saved summary files
//!
//! Each summary is a Markdown file named after the commit's author date and
//! short hash. Files are written once and never modified or deleted here.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

/// File name prefix of every summary
pub const SUMMARY_PREFIX: &str = "summary_";

/// File name extension of every summary (without the dot)
pub const SUMMARY_EXTENSION: &str = "md";

/// Errors reading or writing summary files
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// Directory could not be created or listed
    #[error("Failed to access summaries directory {path}: {source}")]
    Directory {
        /// Directory path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// A summary could not be written
    #[error("Failed to write summary {path}: {source}")]
    Write {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// A summary could not be read
    #[error("Failed to read summary {path}: {source}")]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The name does not refer to a summary file
    #[error("Not a summary file name: {name}")]
    InvalidName {
        /// Offending name
        name: String,
    },
}

/// Directory of saved summaries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryStore {
    dir: PathBuf,
}

impl SummaryStore {
    /// Store rooted at `dir` (created on first save)
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the summaries
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `summary_<YYYY-MM-DD>_<short>.md`
    #[must_use]
    pub fn file_name(date: NaiveDate, short_hash: &str) -> String {
        format!(
            "{SUMMARY_PREFIX}{}_{short_hash}.{SUMMARY_EXTENSION}",
            date.format("%Y-%m-%d")
        )
    }

    /// First lines of every summary file
    #[must_use]
    pub fn header(date: NaiveDate, short_hash: &str) -> String {
        format!("# Commit Summary ({} - {short_hash})\n\n", date.format("%Y-%m-%d"))
    }

    /// Whether `name` looks like a summary file in this directory
    #[must_use]
    pub fn is_summary_name(name: &str) -> bool {
        name.starts_with(SUMMARY_PREFIX)
            && Path::new(name)
                .extension()
                .is_some_and(|ext| ext == SUMMARY_EXTENSION)
            && !name.contains(['/', '\\'])
    }

    /// Write a summary, replacing any file of the same name
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn save(
        &self,
        date: NaiveDate,
        short_hash: &str,
        body: &str,
    ) -> Result<PathBuf, ArtifactError> {
        fs::create_dir_all(&self.dir).map_err(|source| ArtifactError::Directory {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(Self::file_name(date, short_hash));
        let mut content = Self::header(date, short_hash);
        content.push_str(body);
        fs::write(&path, content).map_err(|source| ArtifactError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), "Summary saved");
        Ok(path)
    }

    /// Names of saved summaries, newest first
    ///
    /// A directory that does not exist yet has no summaries.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be read.
    pub fn list(&self) -> Result<Vec<String>, ArtifactError> {
        let dir_err = |source| ArtifactError::Directory {
            path: self.dir.clone(),
            source,
        };
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(dir_err(err)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(dir_err)?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if Self::is_summary_name(&name) && entry.path().is_file() {
                names.push(name);
            }
        }
        names.sort_unstable_by(|a, b| b.cmp(a));
        Ok(names)
    }

    /// Contents of one summary
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` for anything that is not a bare summary file
    /// name, or `Read` if the file cannot be read.
    pub fn read(&self, name: &str) -> Result<String, ArtifactError> {
        if !Self::is_summary_name(name) {
            return Err(ArtifactError::InvalidName {
                name: name.to_string(),
            });
        }
        let path = self.dir.join(name);
        fs::read_to_string(&path).map_err(|source| ArtifactError::Read { path, source })
    }
}
