//! Read-only commit graph walk over a session.

use serde::Serialize;

use crate::error::Result;
use crate::session::RepositorySession;

/// One commit as seen by the history walk. Immutable snapshot; the
/// authoritative object lives in the object store.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommitRecord {
    /// Full content hash.
    pub sha: String,
    /// First 7 hex characters of the hash.
    pub short_sha: String,
    /// Commit message, trailing whitespace trimmed.
    pub message: String,
    /// Author name.
    pub author_name: String,
    /// Author email.
    pub author_email: String,
    /// Author time as unix seconds.
    pub timestamp: i64,
    /// Parent hashes: empty for a root commit, two for a merge.
    pub parent_shas: Vec<String>,
}

impl CommitRecord {
    fn from_commit(commit: &git2::Commit<'_>) -> Self {
        let sha = commit.id().to_string();
        let short_sha = sha.chars().take(7).collect();
        let author = commit.author();

        Self {
            sha,
            short_sha,
            message: commit.message().unwrap_or_default().trim_end().to_string(),
            author_name: author.name().unwrap_or_default().to_string(),
            author_email: author.email().unwrap_or_default().to_string(),
            timestamp: commit.time().seconds(),
            parent_shas: commit.parent_ids().map(|id| id.to_string()).collect(),
        }
    }
}

/// Walks the commit graph starting at HEAD, newest first.
pub struct HistoryReader<'a> {
    session: &'a RepositorySession,
}

impl<'a> HistoryReader<'a> {
    /// Create a reader over an open session.
    #[must_use]
    pub const fn new(session: &'a RepositorySession) -> Self {
        Self { session }
    }

    /// At most `limit` commits reachable from HEAD, newest first.
    /// Recomputed fully on every call; an unborn HEAD yields an empty
    /// sequence, not an error.
    ///
    /// # Errors
    /// Returns error if the session is invalid or the walk fails.
    pub fn history(&self, limit: usize) -> Result<Vec<CommitRecord>> {
        let repo = self.session.repo()?;

        let Some(head) = self.session.head_oid()? else {
            return Ok(vec![]);
        };

        let mut revwalk = repo.revwalk()?;
        revwalk.push(head)?;

        let mut records = Vec::new();
        for oid in revwalk.take(limit) {
            let commit = repo.find_commit(oid?)?;
            records.push(CommitRecord::from_commit(&commit));
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::error::Error;
    use crate::session::testutil::{commit_file, init_empty_repo, init_repo_with_commit};
    use crate::{CommitBuilder, RepositorySession};

    #[test]
    fn unborn_head_yields_empty_history() {
        let (_temp, session) = init_empty_repo();
        assert!(HistoryReader::new(&session).history(50).unwrap().is_empty());
    }

    #[test]
    fn root_commit_appears_with_matching_sha_and_no_parents() {
        let (temp, session) = init_empty_repo();
        fs::write(temp.path().join("a.txt"), "a\n").unwrap();

        let builder = CommitBuilder::new(&session);
        builder.stage(&["a.txt"]).unwrap();
        let oid = builder.commit("root", "Test User", "test@example.com").unwrap();

        let history = HistoryReader::new(&session).history(50).unwrap();
        assert_eq!(history.len(), 1);

        let record = &history[0];
        assert_eq!(record.sha, oid.to_string());
        assert_eq!(record.short_sha, oid.to_string()[..7]);
        assert_eq!(record.message, "root");
        assert_eq!(record.author_name, "Test User");
        assert!(record.parent_shas.is_empty());
        assert!(record.timestamp > 0);
    }

    #[test]
    fn history_is_newest_first_and_honors_limit() {
        let (temp, session) = init_repo_with_commit();
        let repo = git2::Repository::open(temp.path()).unwrap();

        fs::write(temp.path().join("b.txt"), "b\n").unwrap();
        commit_file(&repo, "b.txt", "second");
        fs::write(temp.path().join("c.txt"), "c\n").unwrap();
        let third = commit_file(&repo, "c.txt", "third");

        let reader = HistoryReader::new(&session);
        let all = reader.history(50).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].sha, third.to_string());
        assert_eq!(all[0].message, "third");
        assert_eq!(all[2].message, "Initial commit");
        assert_eq!(all[1].parent_shas, vec![all[2].sha.clone()]);

        let limited = reader.history(2).unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].sha, third.to_string());
    }

    #[test]
    fn invalid_session_fails_cleanly() {
        let session = RepositorySession::open("/definitely/not/a/repo");
        assert!(matches!(
            HistoryReader::new(&session).history(10),
            Err(Error::RepositoryInvalid)
        ));
    }
}
