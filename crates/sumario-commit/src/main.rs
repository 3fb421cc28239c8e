// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! sumario-commit: summarize git commits with an LLM
//!
//! Without a subcommand this runs the interactive menu. The subcommands
//! offer the same operations for scripted use. Variables from a `.env` file
//! in the working directory are loaded first and never override the
//! process environment.

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use sumario_commit::input::INTERRUPT_EXIT_CODE;
use sumario_commit::menu::format_commit_line;
use sumario_commit::{
    Command, Config, ConsoleInput, Menu, OnDemandConsole, SessionStore, Summarize, SummaryStore,
    resolve_repository,
};
use sumario_git::{Git, GitCli, Repository};
use sumario_llm::{GeminiClient, GeminiConfig, Summarizer};
use tracing::{debug, error, info, warn};

fn main() -> ExitCode {
    // Before parsing, so clap's `env` fallbacks see the file's values
    let env_file = dotenvy::dotenv();
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match env_file {
        Ok(path) => debug!(path = %path.display(), "Loaded environment file"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!("Could not load .env file: {err}"),
    }

    match run(&config) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            error!("{err:#}");
            eprintln!("{} {err:#}", "Fatal error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<u8> {
    config.validate().context("Invalid configuration")?;
    debug!(?config.command, "Starting sumario-commit");

    let git = Git::with_runner(GitCli::new(config.git_program()));
    let mut session = SessionStore::load(config.session_path());
    let summaries = SummaryStore::new(config.summaries_dir());
    let summarizer = build_summarizer(config);

    let Some(command) = &config.command else {
        let mut input = ConsoleInput::with_interrupt_handler()
            .context("Failed to install Ctrl+C handler")?;
        let mut menu = Menu::new(git, session, summarizer, summaries)
            .with_model(config.model_name())
            .with_debug(config.verbose);
        let end = menu.run(&mut input).context("Failed to read operator input")?;
        return Ok(end.exit_code());
    };

    let mut input = OnDemandConsole::default();
    match command {
        Command::Latest => {
            let Some(repo) = repository(&mut session, &git, &mut input)? else {
                return Ok(INTERRUPT_EXIT_CODE);
            };
            Summarize {
                git: &git,
                summarizer: summarizer.as_deref(),
                store: &summaries,
            }
            .latest(&repo)?;
        }
        Command::Log { limit } => {
            let Some(repo) = repository(&mut session, &git, &mut input)? else {
                return Ok(INTERRUPT_EXIT_CODE);
            };
            let Some(entries) = git.recent_commits(&repo, *limit) else {
                bail!("Could not list commits in {repo}");
            };
            for (i, entry) in entries.iter().enumerate() {
                println!("{}", format_commit_line(i + 1, entry));
            }
        }
        Command::Summaries => {
            for name in summaries.list()? {
                println!("{name}");
            }
        }
        Command::Show { name } => {
            print!("{}", summaries.read(name)?);
        }
    }

    if input.was_interrupted() {
        debug!("Interrupted while the command was running");
        return Ok(INTERRUPT_EXIT_CODE);
    }
    Ok(0)
}

/// Saved repository, asking for one when stdin is a terminal
///
/// `None` means the operator cancelled the prompt.
fn repository(
    session: &mut SessionStore,
    git: &Git,
    input: &mut OnDemandConsole,
) -> Result<Option<Repository>> {
    let interactive = std::io::stdin().is_terminal();
    match resolve_repository(session, git, input, interactive)? {
        Some(repo) => {
            info!(repo = %repo, "Using repository");
            Ok(Some(repo))
        }
        None if interactive => Ok(None),
        None => bail!(
            "No valid repository selected. Run sumario-commit without arguments and use option 3"
        ),
    }
}

fn build_summarizer(config: &Config) -> Option<Box<dyn Summarizer>> {
    let Some(key) = config.api_key() else {
        debug!("No API key configured");
        return None;
    };
    let client_config = GeminiConfig::new(key).with_model(config.model_name());
    match GeminiClient::new(client_config) {
        Ok(client) => {
            debug!(?client, "LLM client ready");
            Some(Box::new(client))
        }
        Err(err) => {
            warn!("LLM client unavailable: {err}");
            None
        }
    }
}
