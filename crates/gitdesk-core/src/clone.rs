//! Network clone producing a fresh session, with progress reporting.

use std::path::Path;
use std::sync::mpsc::Sender;

use crate::error::{Error, Result};
use crate::session::RepositorySession;

/// One progress sample from an in-flight clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloneProgress {
    /// Objects received so far.
    pub received_objects: usize,
    /// Total objects the transfer will deliver.
    pub total_objects: usize,
}

impl CloneProgress {
    /// Completion percentage, 0 when the total is still unknown.
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.total_objects == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let ratio = self.received_objects as f64 / self.total_objects as f64;
            ratio * 100.0
        }
    }
}

/// Clones repositories. Independent of any existing session - a
/// successful clone yields a new one.
pub struct CloneService;

impl CloneService {
    /// Clone `url` into `dest`, emitting progress samples on `progress`.
    ///
    /// Samples are sent from the transfer thread; callers drain the
    /// channel from wherever suits them (the receiving side of the
    /// channel is the thread-safety boundary). A dropped receiver never
    /// fails the clone. Cancellation of an in-flight clone is not
    /// supported.
    ///
    /// # Errors
    /// Returns [`Error::Network`] / [`Error::Auth`] for classified
    /// transfer failures, and engine or IO errors otherwise. Partially
    /// written directory contents are not cleaned up here.
    pub fn clone(
        url: &str,
        dest: &Path,
        progress: Option<Sender<CloneProgress>>,
    ) -> Result<RepositorySession> {
        let mut callbacks = git2::RemoteCallbacks::new();
        if let Some(tx) = progress {
            callbacks.transfer_progress(move |stats| {
                let _ = tx.send(CloneProgress {
                    received_objects: stats.received_objects(),
                    total_objects: stats.total_objects(),
                });
                true
            });
        }

        let mut fetch_opts = git2::FetchOptions::new();
        fetch_opts.remote_callbacks(callbacks);

        let mut builder = git2::build::RepoBuilder::new();
        builder.fetch_options(fetch_opts);
        builder.clone(url, dest)?;

        let session = RepositorySession::open(dest);
        if session.is_valid() {
            Ok(session)
        } else {
            Err(Error::RepositoryInvalid)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::mpsc;

    use tempfile::TempDir;

    use super::*;
    use crate::session::testutil::{commit_file, init_repo_with_commit};

    #[test]
    fn percent_is_zero_when_total_unknown() {
        let p = CloneProgress {
            received_objects: 0,
            total_objects: 0,
        };
        assert!((p.percent() - 0.0).abs() < f64::EPSILON);

        let half = CloneProgress {
            received_objects: 5,
            total_objects: 10,
        };
        assert!((half.percent() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn clone_yields_a_valid_session() {
        let (origin_dir, _origin) = init_repo_with_commit();
        let dest = TempDir::new().unwrap();
        let dest_path = dest.path().join("clone");

        let session =
            CloneService::clone(origin_dir.path().to_str().unwrap(), &dest_path, None).unwrap();

        assert!(session.is_valid());
        assert!(session.current_branch().unwrap().is_some());
        assert!(dest_path.join("README.md").exists());
    }

    #[test]
    fn clone_progress_is_monotonic_and_completes() {
        let (origin_dir, _session) = init_repo_with_commit();
        let origin = git2::Repository::open(origin_dir.path()).unwrap();
        for i in 0..5 {
            let name = format!("file{i}.txt");
            fs::write(origin_dir.path().join(&name), format!("content {i}\n")).unwrap();
            commit_file(&origin, &name, &format!("commit {i}"));
        }
        drop(origin);

        let dest = TempDir::new().unwrap();
        let dest_path = dest.path().join("clone");
        let (tx, rx) = mpsc::channel();

        // A file:// URL goes through the fetch path, which is what
        // reports transfer progress; a bare local path is copied.
        let url = format!("file://{}", origin_dir.path().display());
        CloneService::clone(&url, &dest_path, Some(tx)).unwrap();

        let samples: Vec<CloneProgress> = rx.iter().collect();
        assert!(!samples.is_empty());

        let mut last = 0;
        for sample in &samples {
            assert!(sample.received_objects >= last);
            last = sample.received_objects;
        }

        let final_sample = samples.last().unwrap();
        assert_eq!(final_sample.received_objects, final_sample.total_objects);
    }

    #[test]
    fn clone_from_missing_source_fails() {
        let dest = TempDir::new().unwrap();
        let result = CloneService::clone(
            "/definitely/not/a/repo",
            &dest.path().join("clone"),
            None,
        );
        assert!(result.is_err());
    }
}
