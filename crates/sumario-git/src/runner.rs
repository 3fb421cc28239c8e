// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Invocation of the external git executable
//!
//! Every query goes through [`GitCommand`], so the patch strategy and the
//! adapter can be driven by a scripted runner in tests. [`GitCli`] is the
//! real implementation: it always passes the repository with `-C` instead of
//! changing the working directory of the current process.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::GitError;

/// Something that can run a git subcommand against a repository path
pub trait GitCommand {
    /// Run `git -C <repo> <args...>` and return its standard output
    ///
    /// # Errors
    ///
    /// Returns `GitError::NotInstalled` if the executable is missing and
    /// `GitError::CommandFailed` if it exits with a non-zero status.
    fn output(&self, repo: &Path, args: &[&str]) -> Result<String, GitError>;
}

impl<T: GitCommand + ?Sized> GitCommand for &T {
    fn output(&self, repo: &Path, args: &[&str]) -> Result<String, GitError> {
        (**self).output(repo, args)
    }
}

/// Runs the git executable found on `PATH` (or an explicit program)
#[derive(Debug, Clone)]
pub struct GitCli {
    program: OsString,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitCli {
    /// Use the given program name or path as the git executable
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The configured program
    #[must_use]
    pub fn program(&self) -> &std::ffi::OsStr {
        &self.program
    }

    fn command(&self, repo: &Path, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-C").arg(repo).args(args);
        // is_bad_revision matches untranslated diagnostics
        cmd.env("LC_ALL", "C");
        hide_console_window(&mut cmd);
        cmd
    }

    fn describe(&self, args: &[&str]) -> String {
        format!("{} {}", self.program.to_string_lossy(), args.join(" "))
    }
}

impl GitCommand for GitCli {
    fn output(&self, repo: &Path, args: &[&str]) -> Result<String, GitError> {
        let command = self.describe(args);
        debug!(repo = %repo.display(), %command, "Running git");

        let output = self
            .command(repo, args)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => GitError::NotInstalled {
                    program: self.program.to_string_lossy().into_owned(),
                },
                _ => GitError::Spawn(e),
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(windows)]
fn hide_console_window(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    cmd.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_console_window(_cmd: &mut Command) {}
