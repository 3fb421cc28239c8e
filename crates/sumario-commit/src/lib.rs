// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! sumario-commit library
//!
//! The interactive menu, session persistence and summary files behind the
//! `sumario-commit` binary, exported for integration tests.

pub mod artifacts;
pub mod config;
pub mod input;
pub mod menu;
pub mod session;
pub mod summarize;

pub use artifacts::{ArtifactError, SummaryStore};
pub use config::{Command, Config, ConfigError};
pub use input::{ConsoleInput, InputSource, OnDemandConsole, Reply, ScriptedInput};
pub use menu::{Menu, MenuChoice, Selection, SessionEnd, select_commit};
pub use session::{SessionError, SessionState, SessionStore, resolve_repository};
pub use summarize::{Outcome, Summarize, SummarizeError};
