// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for sumario-commit
//!
//! Command-line flags, their environment variable fallbacks and the
//! platform default locations for the session file and saved summaries.

use std::fmt;
use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser, Subcommand};
use sumario_git::DEFAULT_COMMIT_LIMIT;
use sumario_llm::DEFAULT_MODEL;

const APP_DIR: &str = "sumario-commit";

/// SumarioCommit - summarize git commits with an LLM
#[derive(Parser, Clone, Default)]
#[command(name = "sumario-commit")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run (defaults to the interactive menu)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the session file
    ///
    /// Holds the last selected repository. Created with defaults if missing.
    /// Defaults to a `sumario-commit/config.json` in the platform config
    /// directory.
    #[arg(short, long, env = "SUMARIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory where summaries are saved
    ///
    /// Defaults to `sumario-commit/summaries` in the platform local data
    /// directory.
    #[arg(short, long, env = "SUMARIO_SUMMARIES")]
    pub summaries: Option<PathBuf>,

    /// Google Gemini API key
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini model used for summaries
    #[arg(short, long, env = "SUMARIO_MODEL")]
    pub model: Option<String>,

    /// git executable to run
    #[arg(long, env = "SUMARIO_GIT")]
    pub git: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    ///
    /// Also enabled by SUMARIOCOMMIT_DEBUG=1. Logs go to stderr.
    #[arg(
        short,
        long,
        env = "SUMARIOCOMMIT_DEBUG",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new(),
        default_value = "false"
    )]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Summarize the latest commit of the selected repository
    Latest,

    /// List recent commits of the selected repository
    Log {
        /// Maximum number of commits to list
        #[arg(short = 'n', long, default_value_t = DEFAULT_COMMIT_LIMIT)]
        limit: usize,
    },

    /// List saved summaries, newest first
    Summaries,

    /// Print a saved summary
    Show {
        /// File name as printed by `summaries`
        name: String,
    },
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("command", &self.command)
            .field("config", &self.config)
            .field("summaries", &self.summaries)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("git", &self.git)
            .field("verbose", &self.verbose)
            .field("quiet", &self.quiet)
            .finish()
    }
}

impl Config {
    /// Get the session file path, using a default if not specified
    ///
    /// Default location is platform-specific:
    /// - macOS: ~/Library/Application Support/sumario-commit/config.json
    /// - Linux: ~/.config/sumario-commit/config.json
    /// - Windows: %APPDATA%\sumario-commit\config.json
    #[must_use]
    pub fn session_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
                .join("config.json")
        })
    }

    /// Get the summaries directory, using a default if not specified
    ///
    /// Default location is platform-specific:
    /// - macOS: ~/Library/Application Support/sumario-commit/summaries
    /// - Linux: ~/.local/share/sumario-commit/summaries
    /// - Windows: %LOCALAPPDATA%\sumario-commit\summaries
    #[must_use]
    pub fn summaries_dir(&self) -> PathBuf {
        self.summaries.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
                .join("summaries")
        })
    }

    /// Model name, falling back to the default model
    #[must_use]
    pub fn model_name(&self) -> &str {
        self.model
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(DEFAULT_MODEL)
    }

    /// API key if one was given and is not blank
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    /// git executable, `git` unless overridden
    #[must_use]
    pub fn git_program(&self) -> PathBuf {
        self.git.clone().unwrap_or_else(|| PathBuf::from("git"))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The session path is an existing directory
    /// - The summaries path exists but is not a directory
    /// - `log --limit` is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let session = self.session_path();
        if session.is_dir() {
            return Err(ConfigError::SessionPathIsDirectory(session));
        }

        let summaries = self.summaries_dir();
        if summaries.exists() && !summaries.is_dir() {
            return Err(ConfigError::SummariesNotDirectory(summaries));
        }

        if let Some(Command::Log { limit: 0 }) = self.command {
            return Err(ConfigError::InvalidLimit);
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Session path points at a directory
    #[error("Session path is a directory: {0}")]
    SessionPathIsDirectory(PathBuf),

    /// Summaries path exists but is not a directory
    #[error("Summaries path is not a directory: {0}")]
    SummariesNotDirectory(PathBuf),

    /// Commit limit of zero
    #[error("Commit limit must be at least 1")]
    InvalidLimit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.command.is_none());
        assert!(config.config.is_none());
        assert!(config.summaries.is_none());
        assert!(config.api_key.is_none());
        assert!(!config.verbose);
        assert!(!config.quiet);
    }

    #[test]
    fn test_session_path_default() {
        let config = Config::default();
        let path = config.session_path();
        assert!(path.ends_with("sumario-commit/config.json"));
    }

    #[test]
    fn test_session_path_custom() {
        let custom = PathBuf::from("/custom/path/session.json");
        let config = Config {
            config: Some(custom.clone()),
            ..Default::default()
        };
        assert_eq!(config.session_path(), custom);
    }

    #[test]
    fn test_summaries_dir_default() {
        let config = Config::default();
        assert!(config.summaries_dir().ends_with("sumario-commit/summaries"));
    }

    #[test]
    fn test_model_name_default_and_blank() {
        assert_eq!(Config::default().model_name(), DEFAULT_MODEL);
        let blank = Config {
            model: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(blank.model_name(), DEFAULT_MODEL);
        let custom = Config {
            model: Some("gemini-2.5-pro".into()),
            ..Default::default()
        };
        assert_eq!(custom.model_name(), "gemini-2.5-pro");
    }

    #[test]
    fn test_debug_output_hides_api_key() {
        let config = Config {
            api_key: Some("k-secret-123".into()),
            model: Some("gemini-test".into()),
            ..Default::default()
        };
        let shown = format!("{config:?}");
        assert!(!shown.contains("k-secret-123"));
        assert!(shown.contains("<redacted>"));
        assert!(shown.contains("gemini-test"));

        assert!(format!("{:?}", Config::default()).contains("api_key: None"));
    }

    #[test]
    fn test_blank_api_key_is_none() {
        let config = Config {
            api_key: Some(" \t".into()),
            ..Default::default()
        };
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_git_program_default() {
        assert_eq!(Config::default().git_program(), PathBuf::from("git"));
    }

    #[test]
    fn test_log_level_default() {
        let config = Config::default();
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_verbose() {
        let config = Config {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_log_level_quiet() {
        let config = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_validate_session_path_is_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            config: Some(dir.path().to_path_buf()),
            summaries: Some(dir.path().join("summaries")),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SessionPathIsDirectory(_))
        ));
    }

    #[test]
    fn test_validate_summaries_is_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("summaries");
        std::fs::write(&file, "x").unwrap();
        let config = Config {
            config: Some(dir.path().join("config.json")),
            summaries: Some(file),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SummariesNotDirectory(_))
        ));
    }

    #[test]
    fn test_validate_zero_limit() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            config: Some(dir.path().join("config.json")),
            summaries: Some(dir.path().join("summaries")),
            command: Some(Command::Log { limit: 0 }),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidLimit)));
    }

    #[test]
    fn test_validate_valid_paths() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            config: Some(dir.path().join("config.json")),
            summaries: Some(dir.path().join("summaries")),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
