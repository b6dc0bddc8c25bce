//! Fetch + fast-forward-or-merge pull, and push, for a session.

use git2::Oid;

use crate::error::{Error, Result};
use crate::session::RepositorySession;

/// How a successful pull resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    /// Local HEAD already contained the remote target.
    AlreadyUpToDate,

    /// The branch reference was advanced to the remote target without
    /// creating a commit.
    FastForwarded {
        /// Commit the branch now points at.
        target: Oid,
    },

    /// Diverged histories were joined with a two-parent merge commit.
    Merged {
        /// The new merge commit.
        commit: Oid,
    },
}

/// Drives the pull state machine and pushes the current branch.
///
/// Pull sequence: resolve remote, fetch, locate the tracking reference
/// for the current branch, then fast-forward or three-way merge. On any
/// failure HEAD is either unchanged or was advanced by the completed
/// fast-forward/merge-commit step - never left at an inconsistent
/// target. A conflicted merge deliberately leaves the working tree
/// mid-merge for manual resolution.
pub struct PullController<'a> {
    session: &'a RepositorySession,
    remote_name: String,
}

impl<'a> PullController<'a> {
    /// Create a controller targeting the named remote.
    pub fn new(session: &'a RepositorySession, remote_name: impl Into<String>) -> Self {
        Self {
            session,
            remote_name: remote_name.into(),
        }
    }

    /// Fetch from the remote and integrate the tracking branch.
    ///
    /// # Errors
    /// - [`Error::RemoteNotFound`] if the remote is not configured.
    /// - [`Error::NoActiveBranch`] if HEAD is unborn.
    /// - [`Error::NoTrackingRef`] if `<remote>/<branch>` does not exist.
    /// - [`Error::MergeConflict`] if the merge stops on conflicts; HEAD
    ///   stays where it was and the index keeps its conflict entries.
    /// - [`Error::Network`] / [`Error::Auth`] for classified transfer
    ///   failures.
    pub fn pull(&self) -> Result<PullOutcome> {
        let repo = self.session.repo()?;

        let mut remote = repo
            .find_remote(&self.remote_name)
            .map_err(|_| Error::RemoteNotFound(self.remote_name.clone()))?;

        // Empty refspec list means the remote's configured base refspecs,
        // which also update the remote-tracking references.
        let mut fetch_opts = git2::FetchOptions::new();
        remote.fetch(&[] as &[&str], Some(&mut fetch_opts), None)?;

        let branch = self
            .session
            .current_branch()?
            .ok_or(Error::NoActiveBranch)?;

        let tracking_name = format!("{}/{branch}", self.remote_name);
        let tracking_ref = repo
            .find_reference(&format!("refs/remotes/{tracking_name}"))
            .map_err(|_| Error::NoTrackingRef(tracking_name.clone()))?;
        let remote_oid = tracking_ref
            .target()
            .ok_or_else(|| Error::NoTrackingRef(tracking_name.clone()))?;

        let annotated = repo.reference_to_annotated_commit(&tracking_ref)?;
        let (analysis, _preference) = repo.merge_analysis(&[&annotated])?;

        if analysis.is_up_to_date() {
            return Ok(PullOutcome::AlreadyUpToDate);
        }

        if analysis.is_fast_forward() {
            self.fast_forward(repo, &branch, remote_oid)?;
            return Ok(PullOutcome::FastForwarded { target: remote_oid });
        }

        self.merge(repo, &annotated, &tracking_name, remote_oid)
    }

    /// Advance the branch reference to the remote target; no commit is
    /// created.
    fn fast_forward(&self, repo: &git2::Repository, branch: &str, target: Oid) -> Result<()> {
        // Safe checkout of the target before touching any reference:
        // local modifications the update would overwrite make the
        // engine refuse, that error is surfaced, and HEAD still points
        // at the old tip.
        let commit = repo.find_commit(target)?;
        repo.checkout_tree(commit.as_object(), None)?;

        let refname = format!("refs/heads/{branch}");
        let mut reference = repo.find_reference(&refname)?;
        reference.set_target(
            target,
            &format!("pull: fast-forward {branch} to {target}"),
        )?;
        repo.set_head(&refname)?;
        Ok(())
    }

    /// Three-way merge of the remote target into the index, producing a
    /// two-parent merge commit unless conflicts stop it.
    fn merge(
        &self,
        repo: &git2::Repository,
        annotated: &git2::AnnotatedCommit<'_>,
        tracking_name: &str,
        remote_oid: Oid,
    ) -> Result<PullOutcome> {
        repo.merge(&[annotated], None, None)?;

        let mut index = repo.index()?;
        if index.has_conflicts() {
            let files = conflict_paths(&index)?;
            return Err(Error::MergeConflict { files });
        }

        let tree_id = index.write_tree()?;
        let tree = repo.find_tree(tree_id)?;

        let local_oid = self.session.head_oid()?.ok_or(Error::NoActiveBranch)?;
        let local_commit = repo.find_commit(local_oid)?;
        let remote_commit = repo.find_commit(remote_oid)?;

        let sig = self.session.user_info().to_signature()?;
        let message = format!("Merge branch '{tracking_name}'");
        let merge_oid = repo.commit(
            Some("HEAD"),
            &sig,
            &sig,
            &message,
            &tree,
            &[&local_commit, &remote_commit],
        )?;

        repo.cleanup_state()?;
        Ok(PullOutcome::Merged { commit: merge_oid })
    }

    /// Push the current branch to the remote.
    ///
    /// # Errors
    /// - [`Error::RemoteNotFound`] if the remote is not configured.
    /// - [`Error::NoActiveBranch`] if HEAD is unborn.
    /// - [`Error::Network`] / [`Error::Auth`] for classified transfer
    ///   failures.
    pub fn push(&self) -> Result<()> {
        let repo = self.session.repo()?;

        let mut remote = repo
            .find_remote(&self.remote_name)
            .map_err(|_| Error::RemoteNotFound(self.remote_name.clone()))?;

        let branch = self
            .session
            .current_branch()?
            .ok_or(Error::NoActiveBranch)?;

        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
        remote.push(&[refspec.as_str()], None)?;

        Ok(())
    }
}

/// Collect the paths carrying conflict entries in the index.
fn conflict_paths(index: &git2::Index) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for conflict in index.conflicts()? {
        let conflict = conflict?;
        let entry = conflict.our.or(conflict.their).or(conflict.ancestor);
        if let Some(entry) = entry {
            files.push(String::from_utf8_lossy(&entry.path).into_owned());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}
