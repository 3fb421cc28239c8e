// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit records produced by the git adapter

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Field separator used in the log format (ASCII unit separator)
pub const LOG_FIELD_SEPARATOR: char = '\u{1f}';

/// `--pretty` format for commit listings: short hash, full hash, author date, subject
pub const LOG_FORMAT: &str = "%h%x1f%H%x1f%ad%x1f%s";

/// `--date` format shared by every query that reports an author date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Default subject width used when rendering commit lists
pub const SUBJECT_DISPLAY_WIDTH: usize = 70;

/// One commit as shown in a selection list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitEntry {
    /// Abbreviated hash as assigned by git at listing time
    pub short_hash: String,
    /// Full 40-character commit hash
    pub full_hash: String,
    /// Author date (not commit date)
    pub author_date: NaiveDate,
    /// First line of the commit message
    pub subject: String,
}

impl CommitEntry {
    /// Validate that a hash is a full 40-character hex string
    #[must_use]
    pub fn is_valid_hash(hash: &str) -> bool {
        hash.len() == 40 && hash.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Subject truncated to at most `max_chars` characters
    #[must_use]
    pub fn display_subject(&self, max_chars: usize) -> &str {
        match self.subject.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.subject[..idx],
            None => &self.subject,
        }
    }

    /// Author date formatted as `YYYY-MM-DD`
    #[must_use]
    pub fn date_string(&self) -> String {
        self.author_date.format(DATE_FORMAT).to_string()
    }
}

/// The HEAD commit of a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef {
    /// Full commit hash
    pub full_hash: String,
    /// Author date
    pub author_date: NaiveDate,
}

impl From<&CommitEntry> for CommitRef {
    fn from(entry: &CommitEntry) -> Self {
        Self {
            full_hash: entry.full_hash.clone(),
            author_date: entry.author_date,
        }
    }
}

/// Which git command produced a patch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchSource {
    /// `git format-patch -1 <hash> --stdout`
    FormatPatch,
    /// `git show <hash>` (fallback)
    Show,
}

/// Textual diff for a single commit, forwarded verbatim to the summarizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Raw command output
    pub text: String,
    /// Command that produced the text
    pub source: PatchSource,
}

impl Patch {
    /// Whether the patch came from the `show` fallback
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.source == PatchSource::Show
    }
}

/// Parse the output of `git log --pretty=format:LOG_FORMAT`
///
/// Lines are split into at most four fields, so a subject containing the
/// separator is kept whole. Lines with fewer fields or an unreadable date
/// are skipped.
#[must_use]
pub fn parse_log_output(output: &str) -> Vec<CommitEntry> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let entry = parse_log_line(line);
            if entry.is_none() {
                debug!(line, "Skipping malformed log line");
            }
            entry
        })
        .collect()
}

fn parse_log_line(line: &str) -> Option<CommitEntry> {
    let mut fields = line.splitn(4, LOG_FIELD_SEPARATOR);
    let short_hash = fields.next()?.trim();
    let full_hash = fields.next()?.trim();
    let date = fields.next()?.trim();
    let subject = fields.next()?;

    if short_hash.is_empty() || full_hash.is_empty() {
        return None;
    }
    let author_date = NaiveDate::parse_from_str(date, DATE_FORMAT).ok()?;

    Some(CommitEntry {
        short_hash: short_hash.to_string(),
        full_hash: full_hash.to_string(),
        author_date,
        subject: subject.trim_end_matches('\r').to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    const HASH_A: &str = "1945ab9c752534e733c38ba0109dc3b741f0a6eb";
    const HASH_B: &str = "c460aeb7fb2d109c17e43de0ce681faec0b7374d";

    fn line(short: &str, full: &str, date: &str, subject: &str) -> String {
        [short, full, date, subject].join(&LOG_FIELD_SEPARATOR.to_string())
    }

    fn sample_entry() -> CommitEntry {
        CommitEntry {
            short_hash: "1945ab9".to_string(),
            full_hash: HASH_A.to_string(),
            author_date: NaiveDate::from_ymd_opt(2026, 1, 17).unwrap(),
            subject: "feat(skills): add milestone-creator".to_string(),
        }
    }

    #[test]
    fn test_parse_single_line() {
        let output = line("1945ab9", HASH_A, "2026-01-17", "Add parser");
        let entries = parse_log_output(&output);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].short_hash, "1945ab9");
        assert_eq!(entries[0].full_hash, HASH_A);
        assert_eq!(entries[0].date_string(), "2026-01-17");
        assert_eq!(entries[0].subject, "Add parser");
    }

    #[test]
    fn test_parse_preserves_order() {
        let output = format!(
            "{}\n{}",
            line("1945ab9", HASH_A, "2026-01-17", "newer"),
            line("c460aeb", HASH_B, "2026-01-16", "older")
        );
        let entries = parse_log_output(&output);
        let subjects: Vec<_> = entries.iter().map(|e| e.subject.as_str()).collect();
        assert_eq!(subjects, vec!["newer", "older"]);
    }

    #[test]
    fn test_malformed_line_is_dropped() {
        let output = format!(
            "{}\nnot a log line\n{}",
            line("1945ab9", HASH_A, "2026-01-17", "first"),
            line("c460aeb", HASH_B, "2026-01-16", "second")
        );
        let entries = parse_log_output(&output);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].full_hash, HASH_B);
    }

    #[test]
    fn test_three_field_line_is_dropped() {
        let short_line = ["1945ab9", HASH_A, "2026-01-17"].join("\u{1f}");
        assert!(parse_log_output(&short_line).is_empty());
    }

    #[test]
    fn test_bad_date_is_dropped() {
        let output = line("1945ab9", HASH_A, "17/01/2026", "subject");
        assert!(parse_log_output(&output).is_empty());
    }

    #[test]
    fn test_subject_containing_separator_is_kept_whole() {
        let subject = "fix: a\u{1f}b | c";
        let output = line("1945ab9", HASH_A, "2026-01-17", subject);
        let entries = parse_log_output(&output);
        assert_eq!(entries[0].subject, subject);
    }

    #[test]
    fn test_empty_subject_is_allowed() {
        let output = line("1945ab9", HASH_A, "2026-01-17", "");
        let entries = parse_log_output(&output);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].subject, "");
    }

    #[test]
    fn test_blank_and_crlf_lines() {
        let output = format!(
            "\n{}\r\n\n",
            line("1945ab9", HASH_A, "2026-01-17", "windows line")
        );
        let entries = parse_log_output(&output);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].subject, "windows line");
    }

    #[test]
    fn test_empty_output() {
        assert!(parse_log_output("").is_empty());
    }

    #[test]
    fn test_is_valid_hash() {
        assert!(CommitEntry::is_valid_hash(HASH_A));
        assert!(CommitEntry::is_valid_hash(
            "ABCDEF1234567890abcdef1234567890abcdef12"
        ));
        assert!(!CommitEntry::is_valid_hash("1945ab9"));
        assert!(!CommitEntry::is_valid_hash(
            "1945ab9c752534e733c38ba0109dc3b741f0a6eg"
        ));
        assert!(!CommitEntry::is_valid_hash(""));
    }

    #[test]
    fn test_display_subject_truncates() {
        let mut entry = sample_entry();
        entry.subject = "x".repeat(100);
        assert_eq!(entry.display_subject(SUBJECT_DISPLAY_WIDTH).len(), 70);
    }

    #[test]
    fn test_display_subject_short_untouched() {
        let entry = sample_entry();
        assert_eq!(entry.display_subject(70), entry.subject);
    }

    #[test]
    fn test_display_subject_multibyte_boundary() {
        let mut entry = sample_entry();
        entry.subject = "ñandú".repeat(20);
        let shown = entry.display_subject(7);
        assert_eq!(shown, "ñandúña");
    }

    #[test]
    fn test_commit_ref_from_entry() {
        let entry = sample_entry();
        let commit_ref = CommitRef::from(&entry);
        assert_eq!(commit_ref.full_hash, HASH_A);
        assert_eq!(commit_ref.author_date, entry.author_date);
    }

    #[test]
    fn test_entry_json_format() {
        let json = serde_json::to_string(&sample_entry()).expect("serialize");
        assert!(json.contains("\"author_date\":\"2026-01-17\""));
        assert!(json.contains("\"short_hash\":\"1945ab9\""));
    }

    #[test]
    fn test_patch_is_fallback() {
        let patch = Patch {
            text: "commit abc".to_string(),
            source: PatchSource::Show,
        };
        assert!(patch.is_fallback());
    }
}
