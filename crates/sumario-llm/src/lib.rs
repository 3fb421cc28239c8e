// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! sumario-llm: turn a commit patch into a structured summary
//!
//! The crate builds the instruction prompt around a patch and sends it to
//! the Google Gemini `generateContent` API. Callers depend on the
//! [`Summarizer`] trait so a test double can stand in for the network.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use sumario_llm::{GeminiClient, GeminiConfig, Summarizer};
//!
//! let client = GeminiClient::new(GeminiConfig::new("my-api-key"))?;
//! let summary = client.summarize("diff --git a/x b/x\n+hello\n")?;
//! println!("{summary}");
//! # Ok::<(), sumario_llm::LlmError>(())
//! ```

pub mod error;
pub mod gemini;
pub mod prompt;

pub use error::LlmError;
pub use gemini::{API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient, GeminiConfig};
pub use prompt::{SECTIONS, build_prompt};

/// Something that can summarize a patch
///
/// Implementations must not be called with an empty patch; the Gemini
/// client rejects one with [`LlmError::EmptyPatch`].
pub trait Summarizer {
    /// Produce a Markdown summary of `patch`
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] when no summary could be produced.
    fn summarize(&self, patch: &str) -> Result<String, LlmError>;
}

impl<T: Summarizer + ?Sized> Summarizer for Box<T> {
    fn summarize(&self, patch: &str) -> Result<String, LlmError> {
        (**self).summarize(patch)
    }
}

/// Re-export commonly used types
pub mod prelude {
    pub use crate::Summarizer;
    pub use crate::error::LlmError;
    pub use crate::gemini::{GeminiClient, GeminiConfig};
}
