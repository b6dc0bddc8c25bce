//! Repository sessions - the single point of truth for one on-disk repository.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use git2::{BranchType, Oid};

use crate::error::{Error, Result};

/// Default author name used when no user is configured.
pub const DEFAULT_USER_NAME: &str = "GitHub Desktop User";

/// Default author email used when no user is configured.
pub const DEFAULT_USER_EMAIL: &str = "user@localhost";

/// Which set of branches to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchScope {
    /// Branches under `refs/heads`.
    Local,
    /// Remote-tracking branches under `refs/remotes`.
    Remote,
}

/// Status flag for a single working-tree path.
///
/// `status()` omits unmodified paths, so a path absent from the map is
/// unmodified by definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// No changes relative to HEAD or the index.
    Unmodified,
    /// Content changed in the index or working tree.
    Modified,
    /// Newly added to the index.
    Added,
    /// Deleted from the index or working tree.
    Deleted,
    /// Renamed in the index or working tree.
    Renamed,
    /// Present in the working tree but not tracked.
    Untracked,
    /// Carries unresolved merge conflict entries.
    Conflicted,
}

/// Resolved commit authorship, always populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    /// Author name.
    pub name: String,
    /// Author email.
    pub email: String,
}

impl Default for UserInfo {
    fn default() -> Self {
        Self {
            name: DEFAULT_USER_NAME.to_string(),
            email: DEFAULT_USER_EMAIL.to_string(),
        }
    }
}

impl UserInfo {
    /// Build a git signature stamped with the current time.
    ///
    /// # Errors
    /// Returns error if the name or email contain bytes git rejects.
    pub fn to_signature(&self) -> Result<git2::Signature<'static>> {
        Ok(git2::Signature::now(&self.name, &self.email)?)
    }
}

/// A session over one opened repository.
///
/// A session is either fully valid (the underlying repository opened
/// successfully) or invalid; an invalid session never panics - every
/// operation on it returns [`Error::RepositoryInvalid`] instead.
///
/// Mutating operations (checkout, branch creation, and everything in
/// [`crate::CommitBuilder`] / [`crate::PullController`]) must be
/// serialized per repository path by the caller.
pub struct RepositorySession {
    path: PathBuf,
    repo: Option<git2::Repository>,
}

impl RepositorySession {
    /// Open the repository at `path`.
    ///
    /// Never fails: a path with no usable repository metadata yields an
    /// invalid session that reports [`Error::RepositoryInvalid`] from
    /// every operation.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let repo = git2::Repository::open(&path).ok();
        Self { path, repo }
    }

    /// Whether the underlying repository opened successfully.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.repo.is_some()
    }

    /// The path this session was opened at.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path to the repository's git directory, if the session is valid.
    #[must_use]
    pub fn git_dir(&self) -> Option<&Path> {
        self.repo.as_ref().map(git2::Repository::path)
    }

    /// Path to the working directory, if the session is valid and not bare.
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.as_ref().and_then(git2::Repository::workdir)
    }

    pub(crate) fn repo(&self) -> Result<&git2::Repository> {
        self.repo.as_ref().ok_or(Error::RepositoryInvalid)
    }

    /// Commit id HEAD points at, or `None` when HEAD is unborn.
    ///
    /// # Errors
    /// Returns error if the session is invalid or HEAD is unreadable.
    pub fn head_oid(&self) -> Result<Option<Oid>> {
        let repo = self.repo()?;
        match repo.head() {
            Ok(head) => Ok(head.target()),
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    // === Working tree state ===

    /// Full path-to-flag status map, recomputed on every call.
    ///
    /// # Errors
    /// Returns error if the session is invalid or the status scan fails.
    pub fn status(&self) -> Result<BTreeMap<String, FileStatus>> {
        let repo = self.repo()?;
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true).recurse_untracked_dirs(true);

        let statuses = repo.statuses(Some(&mut opts))?;
        let mut map = BTreeMap::new();
        for entry in statuses.iter() {
            if let Some(path) = entry.path() {
                map.insert(path.to_string(), flag_for(entry.status()));
            }
        }
        Ok(map)
    }

    /// Paths whose status flag is anything other than unmodified.
    ///
    /// # Errors
    /// Returns error if the session is invalid or the status scan fails.
    pub fn modified_files(&self) -> Result<Vec<String>> {
        Ok(self.status()?.into_keys().collect())
    }

    // === Branch operations ===

    /// Name of the branch HEAD points at, or `None` when HEAD is unborn.
    ///
    /// # Errors
    /// Returns error if the session is invalid or HEAD is unreadable.
    pub fn current_branch(&self) -> Result<Option<String>> {
        let repo = self.repo()?;
        match repo.head() {
            Ok(head) => Ok(head.shorthand().map(String::from)),
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List branch names in the given scope.
    ///
    /// # Errors
    /// Returns error if the session is invalid or branch listing fails.
    pub fn branches(&self, scope: BranchScope) -> Result<Vec<String>> {
        let repo = self.repo()?;
        let branch_type = match scope {
            BranchScope::Local => BranchType::Local,
            BranchScope::Remote => BranchType::Remote,
        };

        let names: Vec<String> = repo
            .branches(Some(branch_type))?
            .filter_map(std::result::Result::ok)
            .filter_map(|(b, _)| b.name().ok().flatten().map(String::from))
            .collect();

        Ok(names)
    }

    /// Checkout a local branch: update the working tree and point HEAD at it.
    ///
    /// Uncommitted changes the checkout would overwrite make the engine
    /// refuse the operation; that error is surfaced, not discarded.
    ///
    /// # Errors
    /// Returns [`Error::ReferenceNotFound`] if the branch does not exist.
    pub fn checkout(&self, branch_name: &str) -> Result<()> {
        let repo = self.repo()?;
        let branch = repo
            .find_branch(branch_name, BranchType::Local)
            .map_err(|_| Error::ReferenceNotFound(branch_name.to_string()))?;

        let object = branch.get().peel(git2::ObjectType::Commit)?;
        repo.checkout_tree(&object, None)?;
        repo.set_head(&format!("refs/heads/{branch_name}"))?;

        Ok(())
    }

    /// Create a branch at `start_point` (commit id, branch, or tag), or at
    /// the current HEAD tip when no start point is given.
    ///
    /// # Errors
    /// Returns [`Error::ReferenceNotFound`] if the start point does not
    /// resolve, or if HEAD is unborn and no start point was given.
    pub fn create_branch(&self, name: &str, start_point: Option<&str>) -> Result<Oid> {
        let repo = self.repo()?;

        let commit = match start_point {
            Some(spec) => repo
                .revparse_single(spec)
                .and_then(|obj| obj.peel_to_commit())
                .map_err(|_| Error::ReferenceNotFound(spec.to_string()))?,
            None => {
                let oid = self
                    .head_oid()?
                    .ok_or_else(|| Error::ReferenceNotFound("HEAD".to_string()))?;
                repo.find_commit(oid)?
            }
        };

        let branch = repo.branch(name, &commit, false)?;
        branch
            .get()
            .target()
            .ok_or_else(|| Error::ReferenceNotFound(name.to_string()))
    }

    // === Remotes ===

    /// List configured remote names.
    ///
    /// # Errors
    /// Returns error if the session is invalid.
    pub fn remotes(&self) -> Result<Vec<String>> {
        let repo = self.repo()?;
        Ok(repo
            .remotes()?
            .iter()
            .flatten()
            .map(String::from)
            .collect())
    }

    /// URL of the named remote, or `None` if the remote does not exist.
    ///
    /// # Errors
    /// Returns error if the session is invalid.
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        let repo = self.repo()?;
        match repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(String::from)),
            Err(_) => Ok(None),
        }
    }

    // === Signature resolution ===

    /// Resolve commit authorship from repository configuration.
    ///
    /// Fallback chain: merged repository config (local then global) for
    /// `user.name` / `user.email`, then the constant defaults. Total -
    /// an invalid session yields the defaults rather than an error.
    #[must_use]
    pub fn user_info(&self) -> UserInfo {
        let mut info = UserInfo::default();

        let Ok(repo) = self.repo() else {
            return info;
        };
        let Ok(mut config) = repo.config() else {
            return info;
        };
        let Ok(snapshot) = config.snapshot() else {
            return info;
        };

        if let Some(name) = snapshot.get_string("user.name").ok().filter(|n| !n.is_empty()) {
            info.name = name;
        }
        if let Some(email) = snapshot
            .get_string("user.email")
            .ok()
            .filter(|e| !e.is_empty())
        {
            info.email = email;
        }

        info
    }
}

impl std::fmt::Debug for RepositorySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositorySession")
            .field("path", &self.path)
            .field("valid", &self.is_valid())
            .finish()
    }
}

/// Collapse the engine's status bitflags into one flag per path.
fn flag_for(status: git2::Status) -> FileStatus {
    if status.is_conflicted() {
        FileStatus::Conflicted
    } else if status.is_wt_new() {
        FileStatus::Untracked
    } else if status.is_index_new() {
        FileStatus::Added
    } else if status.is_index_renamed() || status.is_wt_renamed() {
        FileStatus::Renamed
    } else if status.is_index_deleted() || status.is_wt_deleted() {
        FileStatus::Deleted
    } else if status.is_index_modified()
        || status.is_wt_modified()
        || status.is_index_typechange()
        || status.is_wt_typechange()
    {
        FileStatus::Modified
    } else {
        FileStatus::Unmodified
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    //! Shared repository fixtures for core unit tests.

    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::RepositorySession;

    pub(crate) fn test_signature() -> git2::Signature<'static> {
        git2::Signature::now("Test User", "test@example.com").unwrap()
    }

    /// Init an empty repository (unborn HEAD) and open a session over it.
    pub(crate) fn init_empty_repo() -> (TempDir, RepositorySession) {
        let temp = TempDir::new().unwrap();
        git2::Repository::init(temp.path()).unwrap();
        let session = RepositorySession::open(temp.path());
        (temp, session)
    }

    /// Init a repository with one commit containing `README.md`.
    pub(crate) fn init_repo_with_commit() -> (TempDir, RepositorySession) {
        let temp = TempDir::new().unwrap();
        let repo = git2::Repository::init(temp.path()).unwrap();
        fs::write(temp.path().join("README.md"), "# test\n").unwrap();
        commit_file(&repo, "README.md", "Initial commit");
        drop(repo);

        let session = RepositorySession::open(temp.path());
        (temp, session)
    }

    /// Stage one path and commit it on HEAD with a fixed signature.
    pub(crate) fn commit_file(repo: &git2::Repository, path: &str, message: &str) -> git2::Oid {
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(path)).unwrap();
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = test_signature();

        let parents = match repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => vec![],
        };
        let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::testutil::{init_empty_repo, init_repo_with_commit};
    use super::*;

    #[test]
    fn open_on_non_repository_yields_invalid_session() {
        let temp = tempfile::TempDir::new().unwrap();
        let session = RepositorySession::open(temp.path().join("missing"));
        assert!(!session.is_valid());
    }

    #[test]
    fn invalid_session_reports_repository_invalid_everywhere() {
        let session = RepositorySession::open("/definitely/not/a/repo");

        assert!(matches!(session.status(), Err(Error::RepositoryInvalid)));
        assert!(matches!(
            session.modified_files(),
            Err(Error::RepositoryInvalid)
        ));
        assert!(matches!(
            session.current_branch(),
            Err(Error::RepositoryInvalid)
        ));
        assert!(matches!(
            session.branches(BranchScope::Local),
            Err(Error::RepositoryInvalid)
        ));
        assert!(matches!(
            session.checkout("main"),
            Err(Error::RepositoryInvalid)
        ));
        assert!(matches!(
            session.create_branch("b", None),
            Err(Error::RepositoryInvalid)
        ));
        assert!(matches!(session.remotes(), Err(Error::RepositoryInvalid)));
    }

    #[test]
    fn invalid_session_user_info_falls_back_to_defaults() {
        let session = RepositorySession::open("/definitely/not/a/repo");
        let info = session.user_info();
        assert_eq!(info.name, DEFAULT_USER_NAME);
        assert_eq!(info.email, DEFAULT_USER_EMAIL);
    }

    #[test]
    fn unborn_head_has_no_current_branch() {
        let (_temp, session) = init_empty_repo();
        assert!(session.is_valid());
        assert_eq!(session.current_branch().unwrap(), None);
        assert_eq!(session.head_oid().unwrap(), None);
    }

    #[test]
    fn current_branch_after_commit() {
        let (_temp, session) = init_repo_with_commit();
        let branch = session.current_branch().unwrap().unwrap();
        assert!(branch == "main" || branch == "master");
    }

    #[test]
    fn status_flags_untracked_and_modified() {
        let (temp, session) = init_repo_with_commit();

        fs::write(temp.path().join("new.txt"), "new\n").unwrap();
        fs::write(temp.path().join("README.md"), "# changed\n").unwrap();

        let status = session.status().unwrap();
        assert_eq!(status.get("new.txt"), Some(&FileStatus::Untracked));
        assert_eq!(status.get("README.md"), Some(&FileStatus::Modified));

        let mut modified = session.modified_files().unwrap();
        modified.sort();
        assert_eq!(modified, vec!["README.md", "new.txt"]);
    }

    #[test]
    fn status_flags_deleted() {
        let (temp, session) = init_repo_with_commit();
        fs::remove_file(temp.path().join("README.md")).unwrap();

        let status = session.status().unwrap();
        assert_eq!(status.get("README.md"), Some(&FileStatus::Deleted));
    }

    #[test]
    fn clean_repository_has_empty_status() {
        let (_temp, session) = init_repo_with_commit();
        assert!(session.status().unwrap().is_empty());
        assert!(session.modified_files().unwrap().is_empty());
    }

    #[test]
    fn create_and_checkout_branch() {
        let (_temp, session) = init_repo_with_commit();

        session.create_branch("feature/test", None).unwrap();
        let locals = session.branches(BranchScope::Local).unwrap();
        assert!(locals.iter().any(|b| b == "feature/test"));

        session.checkout("feature/test").unwrap();
        assert_eq!(
            session.current_branch().unwrap().as_deref(),
            Some("feature/test")
        );
    }

    #[test]
    fn create_branch_from_start_point() {
        let (_temp, session) = init_repo_with_commit();
        let head = session.head_oid().unwrap().unwrap();

        let oid = session
            .create_branch("from-sha", Some(&head.to_string()))
            .unwrap();
        assert_eq!(oid, head);
    }

    #[test]
    fn create_branch_on_unborn_head_fails() {
        let (_temp, session) = init_empty_repo();
        assert!(matches!(
            session.create_branch("b", None),
            Err(Error::ReferenceNotFound(_))
        ));
    }

    #[test]
    fn create_branch_with_bad_start_point_fails() {
        let (_temp, session) = init_repo_with_commit();
        assert!(matches!(
            session.create_branch("b", Some("no-such-rev")),
            Err(Error::ReferenceNotFound(_))
        ));
    }

    #[test]
    fn checkout_missing_branch_fails() {
        let (_temp, session) = init_repo_with_commit();
        assert!(matches!(
            session.checkout("no-such-branch"),
            Err(Error::ReferenceNotFound(_))
        ));
    }

    #[test]
    fn remotes_and_urls() {
        let (_temp, session) = init_repo_with_commit();
        {
            let repo = session.repo().unwrap();
            repo.remote("origin", "https://example.com/repo.git")
                .unwrap();
        }

        assert_eq!(session.remotes().unwrap(), vec!["origin"]);
        assert_eq!(
            session.remote_url("origin").unwrap().as_deref(),
            Some("https://example.com/repo.git")
        );
        assert_eq!(session.remote_url("upstream").unwrap(), None);
    }

    #[test]
    fn user_info_reads_repository_config() {
        let (_temp, session) = init_repo_with_commit();
        {
            let repo = session.repo().unwrap();
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Config User").unwrap();
            config.set_str("user.email", "config@example.com").unwrap();
        }

        let info = session.user_info();
        assert_eq!(info.name, "Config User");
        assert_eq!(info.email, "config@example.com");
    }
}
