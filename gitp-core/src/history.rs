//! History walk and per-commit diff statistics.
//!
//! [`HistoryWalker`] owns the `git2::Repository` for the duration of the walk.
//! It resolves a local branch, visits every reachable ancestor exactly once, and
//! asks a [`DiffSummarizer`] for each commit's changes against its first parent.
//! Every `git2` type is converted into owned [`CommitRecord`]s before returning,
//! so nothing borrowed from the repository outlives the walk.
//!
//! The walk keeps a visited set keyed by object id. Merge graphs with several
//! paths to the same ancestor would otherwise yield that ancestor once per path.

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use git2::{BranchType, Commit, Delta, DiffOptions, ErrorCode, Oid, Repository};
use tracing::{debug, info};

use crate::error::{HistoryError, Result};
use crate::types::{short_hash, sort_newest_first, ChangeStatus, CommitRecord, FileChange};

/// Computes per-file line statistics between a commit and its first parent.
pub struct DiffSummarizer<'r> {
    repo: &'r Repository,
}

impl<'r> DiffSummarizer<'r> {
    pub fn new(repo: &'r Repository) -> Self {
        Self { repo }
    }

    /// Returns one [`FileChange`] per changed path, in diff order.
    ///
    /// A root commit (`parent == None`) has nothing to compare against and
    /// yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `git2::Error` only when a tree or blob cannot be read.
    pub fn summarize(
        &self,
        commit: &Commit<'_>,
        parent: Option<&Commit<'_>>,
    ) -> std::result::Result<Vec<FileChange>, git2::Error> {
        let Some(parent) = parent else {
            return Ok(Vec::new());
        };

        let old_tree = parent.tree()?;
        let new_tree = commit.tree()?;
        let mut opts = DiffOptions::new();
        let diff = self
            .repo
            .diff_tree_to_tree(Some(&old_tree), Some(&new_tree), Some(&mut opts))?;

        // The file callback fires once per delta, in order, before that delta's
        // lines, so `last_mut()` in the line callback is always the current file.
        let files: RefCell<Vec<FileChange>> = RefCell::new(Vec::new());

        diff.foreach(
            &mut |delta, _progress| {
                let path = delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .unwrap_or(Path::new("unknown"))
                    .to_string_lossy()
                    .into_owned();
                let status = match delta.status() {
                    Delta::Added => ChangeStatus::Added,
                    Delta::Deleted => ChangeStatus::Deleted,
                    _ => ChangeStatus::Modified,
                };
                files.borrow_mut().push(FileChange {
                    path,
                    status,
                    insertions: 0,
                    deletions: 0,
                });
                true
            },
            None,
            None,
            Some(&mut |_delta, _hunk, line| {
                let mut files = files.borrow_mut();
                if let Some(f) = files.last_mut() {
                    match line.origin() {
                        '+' => f.insertions += 1,
                        '-' => f.deletions += 1,
                        _ => {}
                    }
                }
                true
            }),
        )?;

        Ok(files.into_inner())
    }
}

/// Walks the full ancestor graph of one branch.
pub struct HistoryWalker {
    repo: Repository,
}

impl HistoryWalker {
    /// Opens the repository at `path` (working-tree root or git directory).
    ///
    /// # Errors
    ///
    /// [`HistoryError::RepositoryUnavailable`] when `path` is not a readable
    /// repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|source| HistoryError::RepositoryUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { repo })
    }

    /// Wraps an already-open repository.
    pub fn from_repository(repo: Repository) -> Self {
        Self { repo }
    }

    /// Returns one record per distinct commit reachable from `branch`, newest first.
    ///
    /// Merge commits are diffed against their first parent, but the walk
    /// continues into every parent.
    ///
    /// # Errors
    ///
    /// [`HistoryError::BranchNotFound`] when no local branch has that name;
    /// [`HistoryError::Traversal`] when any commit, tree or blob is unreadable.
    pub fn walk(&self, branch: &str) -> Result<Vec<CommitRecord>> {
        let tip = self.resolve_branch(branch)?;
        info!(branch, tip = %tip, "walking history");

        let summarizer = DiffSummarizer::new(&self.repo);
        let mut visited: HashSet<Oid> = HashSet::new();
        let mut pending: Vec<Oid> = vec![tip];
        let mut records: Vec<CommitRecord> = Vec::new();

        while let Some(oid) = pending.pop() {
            if !visited.insert(oid) {
                continue;
            }
            let commit = self.repo.find_commit(oid)?;
            let parent = if commit.parent_count() > 0 {
                Some(commit.parent(0)?)
            } else {
                None
            };
            let files = summarizer.summarize(&commit, parent.as_ref())?;
            debug!(commit = %oid, files = files.len(), parents = commit.parent_count(), "visited");
            records.push(to_record(&commit, files));

            // Reversed so the first parent is popped next.
            let parents: Vec<Oid> = commit.parent_ids().collect();
            for parent_id in parents.into_iter().rev() {
                if !visited.contains(&parent_id) {
                    pending.push(parent_id);
                }
            }
        }

        sort_newest_first(&mut records);
        info!(branch, commits = records.len(), "history walk finished");
        Ok(records)
    }

    /// Resolves a local branch name to the commit it points at.
    fn resolve_branch(&self, name: &str) -> Result<Oid> {
        let branch = match self.repo.find_branch(name, BranchType::Local) {
            Ok(b) => b,
            Err(e) if matches!(e.code(), ErrorCode::NotFound | ErrorCode::InvalidSpec) => {
                return Err(HistoryError::BranchNotFound(name.to_owned()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(branch.get().peel_to_commit()?.id())
    }
}

/// Copies the interesting parts of a `git2::Commit` into an owned record.
fn to_record(commit: &Commit<'_>, files: Vec<FileChange>) -> CommitRecord {
    let id = commit.id().to_string();
    let author = commit.author();
    CommitRecord {
        hash: short_hash(&id),
        id,
        message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
        author: String::from_utf8_lossy(author.name_bytes()).into_owned(),
        timestamp: signature_time(author.when()),
        files,
    }
}

/// Converts a signature time into a timestamp in the signer's own offset.
///
/// Out-of-range offsets fall back to UTC; out-of-range seconds to the epoch.
fn signature_time(time: git2::Time) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60).unwrap_or_else(|| Utc.fix());
    offset
        .timestamp_opt(time.seconds(), 0)
        .single()
        .unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH.with_timezone(&offset))
}
