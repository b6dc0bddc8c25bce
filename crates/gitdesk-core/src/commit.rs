//! Staging and commit-object creation on top of a session.

use std::path::Path;

use git2::Oid;

use crate::error::Result;
use crate::session::RepositorySession;

/// Builds commits: stages paths into the index and materializes the
/// staged snapshot as tree + commit objects.
pub struct CommitBuilder<'a> {
    session: &'a RepositorySession,
}

impl<'a> CommitBuilder<'a> {
    /// Create a builder over an open session.
    #[must_use]
    pub const fn new(session: &'a RepositorySession) -> Self {
        Self { session }
    }

    /// Stage the given paths, persisting the index in one write.
    ///
    /// Paths missing from the working tree are staged as removals.
    /// A path that fails to resolve does not roll back paths staged
    /// earlier in the same call; the call itself fails only when the
    /// index write fails. Re-staging an unchanged path is a no-op.
    ///
    /// # Errors
    /// Returns error if the session is invalid or the index write fails.
    pub fn stage(&self, paths: &[impl AsRef<Path>]) -> Result<()> {
        let repo = self.session.repo()?;
        let workdir = repo.workdir();
        let mut index = repo.index()?;

        for path in paths {
            let path = path.as_ref();
            let exists = workdir.is_some_and(|w| w.join(path).exists());
            // Unresolvable paths are skipped, not fatal.
            if exists {
                index.add_path(path).ok();
            } else {
                index.remove_path(path).ok();
            }
        }

        index.write()?;
        Ok(())
    }

    /// Stage every modified, added, deleted, and untracked path in one
    /// index write.
    ///
    /// # Errors
    /// Returns error if the session is invalid or the index write fails.
    pub fn stage_all(&self) -> Result<()> {
        let repo = self.session.repo()?;
        let mut index = repo.index()?;

        index.add_all(["*"], git2::IndexAddOption::DEFAULT, None)?;
        // add_all does not drop entries for files deleted from the
        // working tree; update_all does.
        index.update_all(["*"], None)?;

        index.write()?;
        Ok(())
    }

    /// Whether the index differs from the HEAD tree.
    ///
    /// # Errors
    /// Returns error if the session is invalid or the diff fails.
    pub fn has_staged_changes(&self) -> Result<bool> {
        let repo = self.session.repo()?;
        let index = repo.index()?;

        let head_tree = match self.session.head_oid()? {
            Some(oid) => Some(repo.find_commit(oid)?.tree()?),
            None => None,
        };

        let diff = repo.diff_tree_to_index(head_tree.as_ref(), Some(&index), None)?;
        Ok(diff.deltas().len() > 0 || (head_tree.is_none() && !index.is_empty()))
    }

    /// Write the staged snapshot as a commit and advance HEAD to it.
    ///
    /// Parents are empty when HEAD is unborn, otherwise `[HEAD]`.
    /// A commit with no staged changes is permitted.
    ///
    /// # Errors
    /// Returns error if the session is invalid or the tree/commit write
    /// fails.
    pub fn commit(&self, message: &str, author_name: &str, author_email: &str) -> Result<Oid> {
        let repo = self.session.repo()?;
        let mut index = repo.index()?;

        let tree_id = index.write_tree()?;
        let tree = repo.find_tree(tree_id)?;
        let sig = git2::Signature::now(author_name, author_email)?;

        let parents = match self.session.head_oid()? {
            Some(oid) => vec![repo.find_commit(oid)?],
            None => vec![],
        };
        let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();

        let oid = repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)?;
        Ok(oid)
    }
}
