// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Interactive numbered menu
//!
//! The menu owns the session and collaborators for one run. All waiting
//! happens in [`InputSource::prompt`]; cancelling at the main prompt or a
//! pause ends the session, cancelling inside a sub-flow only abandons it.

use std::io;

use colored::Colorize;
use sumario_git::{
    CommitEntry, DEFAULT_COMMIT_LIMIT, Git, GitCli, GitCommand, Repository, SUBJECT_DISPLAY_WIDTH,
};
use sumario_llm::{API_KEY_ENV, Summarizer};
use tracing::debug;

use crate::artifacts::SummaryStore;
use crate::input::{INTERRUPT_EXIT_CODE, InputSource, Reply};
use crate::session::{SessionStore, prompt_for_repository};
use crate::summarize::{Outcome, Summarize, SummarizeError};

const RULE: &str = "-------------------------------------";

/// Main menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// 1. Summarize the HEAD commit
    SummarizeLatest,
    /// 2. Pick a recent commit and summarize it
    SummarizeSpecific,
    /// 3. Select a different repository
    SelectRepository,
    /// 4. Show current settings
    ViewConfig,
    /// 5. List saved summaries
    ListSummaries,
    /// 6. Show one saved summary
    ViewSummary,
    /// 7. Help
    Help,
    /// 0. Quit
    Quit,
}

impl MenuChoice {
    /// Entries in display order
    pub const ALL: [Self; 8] = [
        Self::SummarizeLatest,
        Self::SummarizeSpecific,
        Self::SelectRepository,
        Self::ViewConfig,
        Self::ListSummaries,
        Self::ViewSummary,
        Self::Help,
        Self::Quit,
    ];

    /// Parse the operator's answer at the main prompt
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let choice = match input.trim() {
            "1" => Self::SummarizeLatest,
            "2" => Self::SummarizeSpecific,
            "3" => Self::SelectRepository,
            "4" => Self::ViewConfig,
            "5" => Self::ListSummaries,
            "6" => Self::ViewSummary,
            "7" => Self::Help,
            "0" => Self::Quit,
            _ => return None,
        };
        Some(choice)
    }

    /// Number typed to pick this entry
    #[must_use]
    pub fn key(self) -> u8 {
        match self {
            Self::SummarizeLatest => 1,
            Self::SummarizeSpecific => 2,
            Self::SelectRepository => 3,
            Self::ViewConfig => 4,
            Self::ListSummaries => 5,
            Self::ViewSummary => 6,
            Self::Help => 7,
            Self::Quit => 0,
        }
    }

    /// Menu label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SummarizeLatest => "Summarize (Latest Commit)",
            Self::SummarizeSpecific => "Summarize (Specific Commit)",
            Self::SelectRepository => "Change/Set Git Repository",
            Self::ViewConfig => "View Current Configuration",
            Self::ListSummaries => "List Saved Summaries",
            Self::ViewSummary => "View a Saved Summary",
            Self::Help => "Help",
            Self::Quit => "Quit",
        }
    }

    fn help(self) -> &'static str {
        match self {
            Self::SummarizeLatest => "Analyse the most recent commit of the selected repository.",
            Self::SummarizeSpecific => "List recent commits and pick one to analyse.",
            Self::SelectRepository => "Choose the root folder of your git project.",
            Self::ViewConfig => "Show the repository in use and other settings.",
            Self::ListSummaries => "Show the file names of previously saved summaries.",
            Self::ViewSummary => "Pick a saved summary and print it.",
            Self::Help => "Show this help screen.",
            Self::Quit => "Close the application.",
        }
    }
}

/// Outcome of a numbered selection
#[derive(Debug, PartialEq, Eq)]
pub enum Selection<'a, T> {
    /// The operator picked this item
    Chosen(&'a T),
    /// The operator typed 0
    Back,
    /// The prompt was cancelled
    Cancelled,
}

/// Ask for a 1-based index into `items`, or 0 to go back
///
/// Blank lines are ignored; anything that is not a number in range is
/// reported and asked again.
///
/// # Errors
///
/// Only I/O errors from the input source are returned.
pub fn select_item<'a, T>(
    items: &'a [T],
    label: &str,
    input: &mut dyn InputSource,
) -> io::Result<Selection<'a, T>> {
    loop {
        let line = match input.prompt(label)? {
            Reply::Line(line) => line,
            Reply::Cancelled => return Ok(Selection::Cancelled),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.parse::<usize>() {
            Ok(0) => return Ok(Selection::Back),
            Ok(n) if n <= items.len() => return Ok(Selection::Chosen(&items[n - 1])),
            Ok(_) => println!("\nInvalid option. Enter a number from the list."),
            Err(_) => println!("\nInvalid input. Enter a number."),
        }
    }
}

/// One line of the commit list: ` NN. <subject> (<date>) [<short>]`
#[must_use]
pub fn format_commit_line(number: usize, entry: &CommitEntry) -> String {
    format!(
        " {number:>2}. {} ({}) [{}]",
        entry.display_subject(SUBJECT_DISPLAY_WIDTH),
        entry.date_string(),
        entry.short_hash
    )
}

/// Show the commit list and let the operator pick one
///
/// Only the chosen entry's hash and date matter downstream; the subject is
/// display text.
///
/// # Errors
///
/// Only I/O errors from the input source are returned.
pub fn select_commit<'a>(
    entries: &'a [CommitEntry],
    input: &mut dyn InputSource,
) -> io::Result<Selection<'a, CommitEntry>> {
    for (i, entry) in entries.iter().enumerate() {
        println!("{}", format_commit_line(i + 1, entry));
    }
    println!("{RULE}");
    println!("  0. Back to main menu");
    println!("{RULE}");
    select_item(entries, "Your choice: ", input)
}

/// How an interactive session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The operator chose Quit
    Quit,
    /// The operator interrupted the session
    Interrupted,
}

impl SessionEnd {
    /// Process exit status for this ending
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Quit => 0,
            Self::Interrupted => INTERRUPT_EXIT_CODE,
        }
    }
}

/// Interactive session state
pub struct Menu<R: GitCommand = GitCli> {
    git: Git<R>,
    session: SessionStore,
    summarizer: Option<Box<dyn Summarizer>>,
    summaries: SummaryStore,
    model: Option<String>,
    debug: bool,
}

impl<R: GitCommand> Menu<R> {
    /// Menu over the given collaborators
    pub fn new(
        git: Git<R>,
        session: SessionStore,
        summarizer: Option<Box<dyn Summarizer>>,
        summaries: SummaryStore,
    ) -> Self {
        Self {
            git,
            session,
            summarizer,
            summaries,
            model: None,
            debug: false,
        }
    }

    /// Model name shown in the configuration view
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Whether debug logging is on (shown in the configuration view)
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Session state as of now
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Run the menu until the operator quits or interrupts
    ///
    /// # Errors
    ///
    /// Only I/O errors from the input source are returned.
    pub fn run(&mut self, input: &mut dyn InputSource) -> io::Result<SessionEnd> {
        if self.summarizer.is_none() {
            println!(
                "\n{} {API_KEY_ENV} is not set. Summaries cannot be generated until it is.",
                "Warning:".yellow().bold()
            );
        }

        loop {
            self.print_menu();
            let line = match input.prompt("Your choice: ")? {
                Reply::Line(line) => line,
                Reply::Cancelled => return Ok(Self::interrupted()),
            };

            let pause = match MenuChoice::parse(&line) {
                Some(MenuChoice::Quit) => {
                    debug!("Operator chose to quit");
                    println!("\nGoodbye!");
                    return Ok(SessionEnd::Quit);
                }
                Some(choice) => self.handle(choice, input)?,
                None => {
                    println!("\nInvalid option. Try again.");
                    true
                }
            };

            if pause && input.prompt("\nPress Enter to continue...")? == Reply::Cancelled {
                return Ok(Self::interrupted());
            }
        }
    }

    fn interrupted() -> SessionEnd {
        println!("\n\nInterrupted by the operator. Exiting.");
        SessionEnd::Interrupted
    }

    /// Run one menu entry; returns whether to pause afterwards
    ///
    /// # Errors
    ///
    /// Only I/O errors from the input source are returned.
    pub fn handle(&mut self, choice: MenuChoice, input: &mut dyn InputSource) -> io::Result<bool> {
        debug!(?choice, "Menu choice");
        match choice {
            MenuChoice::SummarizeLatest => {
                self.summarize_latest();
                Ok(true)
            }
            MenuChoice::SummarizeSpecific => self.summarize_specific(input),
            MenuChoice::SelectRepository => {
                self.select_repository(input)?;
                Ok(true)
            }
            MenuChoice::ViewConfig => {
                self.show_config();
                Ok(true)
            }
            MenuChoice::ListSummaries => {
                self.list_summaries();
                Ok(true)
            }
            MenuChoice::ViewSummary => {
                self.view_summary(input)?;
                Ok(true)
            }
            MenuChoice::Help => {
                Self::show_help();
                Ok(true)
            }
            MenuChoice::Quit => Ok(false),
        }
    }

    fn print_menu(&self) {
        let current = self
            .session
            .repository_path()
            .filter(|p| p.exists())
            .map_or_else(|| "None selected".to_string(), |p| p.display().to_string());

        println!("\n{RULE}");
        println!("{}", "        SumarioCommit CLI".bold());
        println!("{RULE}");
        println!("Current repository: {current}");
        println!("{RULE}");
        println!("\nChoose an option:\n");
        for choice in MenuChoice::ALL {
            println!(" {}. {}", choice.key(), choice.label());
        }
        println!("{RULE}");
    }

    fn summarize(&self) -> Summarize<'_, R> {
        Summarize {
            git: &self.git,
            summarizer: self.summarizer.as_deref(),
            store: &self.summaries,
        }
    }

    /// The saved repository if it still validates; explains otherwise
    fn current_repository(&self) -> Option<Repository> {
        let repo = self.session.saved_repository(&self.git);
        if repo.is_none() {
            println!("{} no valid git repository is configured.", "Error:".red());
            println!(
                "Use option {} to set one.",
                MenuChoice::SelectRepository.key()
            );
        }
        repo
    }

    fn report(result: Result<Outcome, SummarizeError>) {
        match result {
            Ok(_) => {}
            Err(SummarizeError::NotConfigured) => {
                println!(
                    "{} LLM client not configured. Set {API_KEY_ENV} and restart.",
                    "Error:".red()
                );
            }
            Err(err) => println!("{} {err}", "Error:".red()),
        }
    }

    fn summarize_latest(&self) {
        println!("\n--- {} ---", MenuChoice::SummarizeLatest.label());
        let Some(repo) = self.current_repository() else {
            return;
        };
        Self::report(self.summarize().latest(&repo));
    }

    fn summarize_specific(&self, input: &mut dyn InputSource) -> io::Result<bool> {
        println!("\n--- {} ---", MenuChoice::SummarizeSpecific.label());
        let Some(repo) = self.current_repository() else {
            return Ok(true);
        };

        debug!(repo = %repo, "Listing commits");
        let entries = match self.git.recent_commits(&repo, DEFAULT_COMMIT_LIMIT) {
            Some(entries) if !entries.is_empty() => entries,
            _ => {
                println!("\nNo commits found in '{repo}' or git reported an error.");
                return Ok(true);
            }
        };

        println!("\n{RULE}");
        println!("   Select a Commit to Summarize");
        println!("{RULE}");
        println!("Repository: {repo}");
        println!("{RULE}");

        match select_commit(&entries, input)? {
            Selection::Chosen(entry) => {
                debug!(commit = %entry.full_hash, date = %entry.author_date, "Commit selected");
                println!(
                    "\nGenerating summary for commit: {}...",
                    entry.display_subject(50)
                );
                Self::report(self.summarize().commit(
                    &repo,
                    &entry.full_hash,
                    entry.author_date,
                ));
                Ok(true)
            }
            Selection::Back => Ok(false),
            Selection::Cancelled => {
                println!("\nOperation cancelled.");
                Ok(true)
            }
        }
    }

    fn select_repository(&mut self, input: &mut dyn InputSource) -> io::Result<()> {
        println!("\n--- {} ---", MenuChoice::SelectRepository.label());
        if let Some(current) = self.session.repository_path() {
            println!("Current: {}", current.display());
        }
        match prompt_for_repository(&mut self.session, &self.git, input)? {
            Some(repo) => println!("\nRepository set to: {}", repo.to_string().green()),
            None => println!("\nNo new repository was set."),
        }
        Ok(())
    }

    fn show_config(&self) {
        println!("\n--- {} ---", MenuChoice::ViewConfig.label());
        let repo = self
            .session
            .repository_path()
            .map_or_else(|| "None".to_string(), |p| p.display().to_string());
        let llm = match (&self.summarizer, &self.model) {
            (None, _) => format!("not configured (set {API_KEY_ENV})"),
            (Some(_), Some(model)) => model.clone(),
            (Some(_), None) => "configured".to_string(),
        };
        println!("Repository path:   {repo}");
        println!("Debug mode:        {}", if self.debug { "Yes" } else { "No" });
        println!("Summaries folder:  {}", self.summaries.dir().display());
        println!("Session file:      {}", self.session.path().display());
        println!("LLM model:         {llm}");
    }

    fn list_summaries(&self) {
        println!("\n--- Saved Summaries ---");
        match self.summaries.list() {
            Ok(names) if names.is_empty() => println!("No saved summaries found."),
            Ok(names) => {
                println!("Files found:");
                for name in names {
                    println!("- {name}");
                }
            }
            Err(err) => println!("{} {err}", "Error:".red()),
        }
    }

    fn view_summary(&self, input: &mut dyn InputSource) -> io::Result<()> {
        println!("\n--- {} ---", MenuChoice::ViewSummary.label());
        let names = match self.summaries.list() {
            Ok(names) if names.is_empty() => {
                println!("No saved summaries to show.");
                return Ok(());
            }
            Ok(names) => names,
            Err(err) => {
                println!("{} {err}", "Error:".red());
                return Ok(());
            }
        };

        println!("Available summaries:");
        for (i, name) in names.iter().enumerate() {
            println!(" {:>2}. {name}", i + 1);
        }
        println!("{RULE}");
        println!("  0. Back to main menu");
        println!("{RULE}");

        match select_item(
            &names,
            "Choose the number of the summary to view (0 to go back): ",
            input,
        )? {
            Selection::Chosen(name) => match self.summaries.read(name) {
                Ok(text) => {
                    println!("\n--- Showing: {name} ---");
                    println!("{text}");
                    println!("{}", "-".repeat(name.len() + 16));
                }
                Err(err) => println!("{} {err}", "Error:".red()),
            },
            Selection::Back => {}
            Selection::Cancelled => println!("\nOperation cancelled."),
        }
        Ok(())
    }

    fn show_help() {
        println!("\n--- SumarioCommit Help ---");
        println!("This application writes work summaries based on git commits.");
        println!("\nMenu options:");
        for choice in MenuChoice::ALL {
            println!(" {}. {}: {}", choice.key(), choice.label(), choice.help());
        }
        println!(
            "\nNote: git must be installed and a Gemini API key must be set in {API_KEY_ENV}."
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptedInput;
    use chrono::NaiveDate;
    use similar_asserts::assert_eq;

    fn entry(n: u32, subject: &str) -> CommitEntry {
        CommitEntry {
            short_hash: format!("abc{n:04}"),
            full_hash: format!("{n:040}"),
            author_date: NaiveDate::from_ymd_opt(2026, 1, n).unwrap(),
            subject: subject.to_string(),
        }
    }

    fn entries() -> Vec<CommitEntry> {
        vec![entry(3, "Third"), entry(2, "Second"), entry(1, "First")]
    }

    #[test]
    fn test_menu_choice_parse() {
        for choice in MenuChoice::ALL {
            assert_eq!(MenuChoice::parse(&choice.key().to_string()), Some(choice));
        }
        assert_eq!(MenuChoice::parse(" 4 \n"), Some(MenuChoice::ViewConfig));
        assert_eq!(MenuChoice::parse("8"), None);
        assert_eq!(MenuChoice::parse("quit"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn test_select_commit_by_index() {
        let entries = entries();
        let mut input = ScriptedInput::new(["3"]);
        assert_eq!(
            select_commit(&entries, &mut input).unwrap(),
            Selection::Chosen(&entries[2])
        );
    }

    #[test]
    fn test_select_commit_reprompts_on_bad_input() {
        let entries = entries();
        let mut input = ScriptedInput::new(["abc", "", "4", "-1", " 2 "]);
        assert_eq!(
            select_commit(&entries, &mut input).unwrap(),
            Selection::Chosen(&entries[1])
        );
        assert_eq!(input.prompts().len(), 5);
    }

    #[test]
    fn test_select_commit_zero_goes_back() {
        let entries = entries();
        let mut input = ScriptedInput::new(["0"]);
        assert_eq!(select_commit(&entries, &mut input).unwrap(), Selection::Back);
    }

    #[test]
    fn test_select_commit_cancel() {
        let entries = entries();
        let mut input = ScriptedInput::new(["x"]).then_cancel().then_line("1");
        assert_eq!(select_commit(&entries, &mut input).unwrap(), Selection::Cancelled);
        assert_eq!(input.remaining(), 1);
    }

    #[test]
    fn test_select_from_empty_list() {
        let empty: Vec<CommitEntry> = Vec::new();
        let mut input = ScriptedInput::new(["1", "0"]);
        assert_eq!(select_commit(&empty, &mut input).unwrap(), Selection::Back);
    }

    #[test]
    fn test_commit_line_format() {
        let line = format_commit_line(3, &entry(7, "Fix the parser"));
        assert_eq!(line, "  3. Fix the parser (2026-01-07) [abc0007]");
    }

    #[test]
    fn test_commit_line_truncates_subject() {
        let long = "x".repeat(100);
        let line = format_commit_line(12, &entry(1, &long));
        assert_eq!(line, format!(" 12. {} (2026-01-01) [abc0001]", "x".repeat(70)));
    }

    #[test]
    fn test_session_end_exit_codes() {
        assert_eq!(SessionEnd::Quit.exit_code(), 0);
        assert_eq!(SessionEnd::Interrupted.exit_code(), 130);
    }
}
