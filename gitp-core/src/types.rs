//! Owned domain records produced by the history walk.
//!
//! All types here are fully owned (no borrowed lifetimes from `git2`) so the
//! walk can drop the repository once it finishes and the browser can keep the
//! records for the whole session.

use std::fmt;

use chrono::{DateTime, FixedOffset};

/// How a single path changed between a commit and its first parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeStatus {
    /// The path has no snapshot in the parent.
    Added,
    /// The path has no snapshot in the commit.
    Deleted,
    /// The path exists on both sides.
    Modified,
}

impl ChangeStatus {
    /// One-letter code shown in the file rows: `A`, `D` or `M`.
    pub fn code(self) -> char {
        match self {
            ChangeStatus::Added => 'A',
            ChangeStatus::Deleted => 'D',
            ChangeStatus::Modified => 'M',
        }
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Per-file line statistics for one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// Repository-relative path.
    pub path: String,
    pub status: ChangeStatus,
    /// Added lines summed over every hunk of this file.
    pub insertions: usize,
    /// Removed lines summed over every hunk of this file.
    pub deletions: usize,
}

/// One visited commit, enriched with its file statistics.
///
/// Records are immutable once the walk returns. UI-only state such as
/// collapse flags lives in [`crate::browser::BrowserState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Full hex object id. Used for deduplication and as the ordering tie-break.
    pub id: String,
    /// First 8 hex characters of `id`.
    pub hash: String,
    /// Raw commit message, possibly multi-line.
    pub message: String,
    /// Author display name.
    pub author: String,
    /// Author time, carrying the author's timezone offset.
    pub timestamp: DateTime<FixedOffset>,
    /// Changes against the first parent, in diff order. Empty for root commits.
    pub files: Vec<FileChange>,
}

/// Length of [`CommitRecord::hash`].
pub const SHORT_HASH_LEN: usize = 8;

impl CommitRecord {
    /// First line of the commit message, without the trailing newline.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Number of screen rows this commit occupies when `collapsed` is as given.
    pub fn row_height(&self, collapsed: bool) -> usize {
        if collapsed {
            1
        } else {
            1 + self.files.len()
        }
    }
}

/// Shortens a full hex id to [`SHORT_HASH_LEN`] characters.
pub fn short_hash(id: &str) -> String {
    id.chars().take(SHORT_HASH_LEN).collect()
}

/// Sorts newest-first; equal timestamps fall back to ascending `id`.
pub fn sort_newest_first(commits: &mut [CommitRecord]) {
    commits.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: &str, secs: i64) -> CommitRecord {
        let tz = FixedOffset::east_opt(3600).unwrap();
        CommitRecord {
            id: id.to_owned(),
            hash: short_hash(id),
            message: "subject\n\nbody".to_owned(),
            author: "Ada".to_owned(),
            timestamp: tz.timestamp_opt(secs, 0).unwrap(),
            files: Vec::new(),
        }
    }

    #[test]
    fn summary_is_first_line() {
        assert_eq!(record("a", 0).summary(), "subject");
    }

    #[test]
    fn empty_message_has_empty_summary() {
        let mut r = record("a", 0);
        r.message.clear();
        assert_eq!(r.summary(), "");
    }

    #[test]
    fn sort_breaks_timestamp_ties_by_id() {
        let mut commits = vec![record("bbbb", 10), record("cccc", 20), record("aaaa", 10)];
        sort_newest_first(&mut commits);
        let ids: Vec<&str> = commits.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["cccc", "aaaa", "bbbb"]);
    }

    #[test]
    fn short_hash_takes_eight_chars() {
        assert_eq!(short_hash("0123456789abcdef"), "01234567");
        assert_eq!(short_hash("abc"), "abc");
    }

    #[test]
    fn row_height_counts_file_lines_unless_collapsed() {
        let mut r = record("a", 0);
        r.files.push(FileChange {
            path: "x".into(),
            status: ChangeStatus::Added,
            insertions: 1,
            deletions: 0,
        });
        assert_eq!(r.row_height(false), 2);
        assert_eq!(r.row_height(true), 1);
    }
}
