// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Google Gemini `generateContent` client
//!
//! Blocking on purpose: summaries are requested one at a time from a
//! single-threaded interactive loop.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::Summarizer;
use crate::error::LlmError;
use crate::prompt::build_prompt;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Public API endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Settings for [`GeminiClient`]
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key sent with every request
    pub api_key: String,
    /// Model name, e.g. `gemini-2.0-flash`
    pub model: String,
    /// Scheme and host of the API (no trailing slash needed)
    pub base_url: String,
    /// Connection timeout; requests themselves are not time-limited
    pub connect_timeout: Duration,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl GeminiConfig {
    /// Configuration for the public endpoint and default model
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(30),
        }
    }

    /// Use a different model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Use a different endpoint (tests, proxies)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Full URL of the `generateContent` method
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

/// Subset of the `generateContent` response we read
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    /// Generated candidates (usually one)
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Feedback on the prompt, present when it was blocked
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

/// One generated candidate
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Candidate content; absent when generation was stopped early
    #[serde(default)]
    pub content: Option<CandidateContent>,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Content of a candidate
#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    /// Text parts
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

/// One part of a candidate's content
#[derive(Debug, Default, Deserialize)]
pub struct ResponsePart {
    /// Text of this part (non-text parts have none)
    #[serde(default)]
    pub text: Option<String>,
}

/// Prompt feedback
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Reason the prompt was blocked, if it was
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, or why there is none
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Blocked` when the service reports a block reason
    /// and `LlmError::EmptyResponse` when there is simply no text.
    pub fn into_text(self) -> Result<String, LlmError> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect()
            })
            .unwrap_or_default();

        if !text.trim().is_empty() {
            return Ok(text);
        }

        match self.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => Err(LlmError::Blocked { reason }),
            None => Err(LlmError::EmptyResponse),
        }
    }
}

/// Blocking client for the Gemini API
pub struct GeminiClient {
    config: GeminiConfig,
    http: Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.config.model)
            .field("endpoint", &self.config.endpoint())
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Build a client; fails if the key is blank or not a valid header value
    ///
    /// # Errors
    ///
    /// Returns `LlmError::MissingApiKey` for a blank key and `LlmError::Http`
    /// if the HTTP client cannot be constructed.
    pub fn new(config: GeminiConfig) -> Result<Self, LlmError> {
        let key = config.api_key.trim();
        if key.is_empty() {
            return Err(LlmError::MissingApiKey {
                env_var: API_KEY_ENV,
            });
        }

        let mut headers = HeaderMap::new();
        let mut key_value =
            HeaderValue::from_str(key).map_err(|_| LlmError::MissingApiKey {
                env_var: API_KEY_ENV,
            })?;
        key_value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key_value);

        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(None)
            .default_headers(headers)
            .build()?;

        Ok(Self { config, http })
    }

    /// Model this client talks to
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn request_body(prompt: &str) -> GenerateRequest<'_> {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "text/plain",
            },
        }
    }
}

impl Summarizer for GeminiClient {
    fn summarize(&self, patch: &str) -> Result<String, LlmError> {
        if patch.trim().is_empty() {
            return Err(LlmError::EmptyPatch);
        }

        let prompt = build_prompt(patch);
        debug!(model = %self.config.model, prompt_bytes = prompt.len(), "Requesting summary");

        let response = self
            .http
            .post(self.config.endpoint())
            .json(&Self::request_body(&prompt))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "unknown".to_string());
            warn!(status = status.as_u16(), "Gemini API returned an error");
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json()?;
        if let Some(reason) = parsed
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
        {
            debug!(finish_reason = reason, "Summary received");
        }
        parsed.into_text()
    }
}
