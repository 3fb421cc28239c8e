// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Summarize one commit and save the result

use std::path::PathBuf;

use chrono::NaiveDate;
use colored::Colorize;
use sumario_git::{Git, GitCli, GitCommand, Repository};
use sumario_llm::{LlmError, Summarizer};
use tracing::{debug, error};

use crate::artifacts::SummaryStore;

/// Why a summary could not be produced
#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    /// HEAD could not be resolved (empty repository or git failure)
    #[error("Could not read the latest commit")]
    NoHead,

    /// Neither format-patch nor show produced text for the commit
    #[error("Could not generate the patch for commit {hash}")]
    PatchUnavailable {
        /// Commit that was asked for
        hash: String,
    },

    /// No LLM client is available
    #[error("LLM client not configured")]
    NotConfigured,

    /// The LLM call failed or returned nothing
    #[error("Could not generate summary: {0}")]
    Llm(#[from] LlmError),
}

/// A summary that was produced and shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Summary text as returned by the model
    pub summary: String,
    /// Where it was saved, if saving worked
    pub saved: Option<PathBuf>,
}

/// Collaborators needed to summarize a commit
pub struct Summarize<'a, R: GitCommand = GitCli> {
    /// Git adapter
    pub git: &'a Git<R>,
    /// LLM client, absent when no API key was configured
    pub summarizer: Option<&'a dyn Summarizer>,
    /// Where summaries are saved
    pub store: &'a SummaryStore,
}

impl<R: GitCommand> Summarize<'_, R> {
    /// Summarize `full_hash`, print the summary and save it
    ///
    /// The saved file is named after `date` and the commit's own short
    /// hash. A failed save is reported but still counts as success since
    /// the summary has already been shown.
    ///
    /// # Errors
    ///
    /// Returns an error if no patch could be produced, no client is
    /// configured or the model gave no summary. Nothing is saved then.
    pub fn commit(
        &self,
        repo: &Repository,
        full_hash: &str,
        date: NaiveDate,
    ) -> Result<Outcome, SummarizeError> {
        debug!(repo = %repo, commit = full_hash, %date, "Summarizing commit");

        let patch = self.git.patch_for_commit(repo, full_hash).ok_or_else(|| {
            SummarizeError::PatchUnavailable {
                hash: full_hash.to_string(),
            }
        })?;
        let summarizer = self.summarizer.ok_or(SummarizeError::NotConfigured)?;

        println!("Generating summary... (this can take a few seconds)");
        let summary = summarizer.summarize(&patch.text)?;

        println!("\n{}", "--- Generated Summary ---".bold());
        println!("{summary}");
        println!("{}\n", "-------------------------".bold());

        let short_hash = self.git.short_hash_of(repo, full_hash);
        let saved = match self.store.save(date, &short_hash, &summary) {
            Ok(path) => {
                println!("Summary saved to: {}", path.display().to_string().green());
                Some(path)
            }
            Err(err) => {
                error!("{err}");
                None
            }
        };

        Ok(Outcome { summary, saved })
    }

    /// Summarize the repository's HEAD commit
    ///
    /// # Errors
    ///
    /// As [`Summarize::commit`], plus `NoHead` when HEAD cannot be read.
    pub fn latest(&self, repo: &Repository) -> Result<Outcome, SummarizeError> {
        let head = self
            .git
            .latest_commit_ref(repo)
            .ok_or(SummarizeError::NoHead)?;
        debug!(commit = %head.full_hash, "Latest commit found");
        self.commit(repo, &head.full_hash, head.author_date)
    }
}
