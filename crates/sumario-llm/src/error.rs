// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for sumario-llm

use thiserror::Error;

/// Errors that can occur while asking the model for a summary
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key was provided
    #[error("No API key configured (set {env_var})")]
    MissingApiKey {
        /// Environment variable the key is read from
        env_var: &'static str,
    },

    /// The patch was empty, so there is nothing to summarize
    #[error("Patch is empty, nothing to summarize")]
    EmptyPatch,

    /// Transport-level failure talking to the API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body as returned by the service
        body: String,
    },

    /// The prompt was blocked by the service
    #[error("Request blocked by the model: {reason}")]
    Blocked {
        /// Block reason reported by the service
        reason: String,
    },

    /// The model returned no text
    #[error("Model returned an empty response")]
    EmptyResponse,
}
