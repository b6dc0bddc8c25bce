//! Error types for gitdesk-core.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during repository operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The session's repository failed to open and every operation on it
    /// reports this instead of panicking.
    #[error("repository is not valid - open failed or metadata is missing")]
    RepositoryInvalid,

    /// Remote not found.
    #[error("remote not found: {0}")]
    RemoteNotFound(String),

    /// HEAD is unborn where a current branch is required.
    #[error("no active branch - the repository has no commits yet")]
    NoActiveBranch,

    /// No remote-tracking reference exists for the current branch.
    #[error("no tracking reference: {0}")]
    NoTrackingRef(String),

    /// A merge stopped on conflicts. The working tree is left mid-merge
    /// for manual resolution; HEAD is untouched.
    #[error("merge conflicts detected in: {}", files.join(", "))]
    MergeConflict {
        /// Paths with conflict entries in the index.
        files: Vec<String>,
    },

    /// A branch, commit, or revspec did not resolve.
    #[error("reference not found: {0}")]
    ReferenceNotFound(String),

    /// Network-level failure (transfer, DNS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// Authentication against the remote failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Underlying git engine error that fits no other variant.
    #[error("git error: {0}")]
    Git(git2::Error),
}

impl From<git2::Error> for Error {
    fn from(e: git2::Error) -> Self {
        match (e.class(), e.code()) {
            (_, git2::ErrorCode::Auth) => Self::Auth(e.message().to_string()),
            (git2::ErrorClass::Net | git2::ErrorClass::Http, _) => {
                Self::Network(e.message().to_string())
            }
            _ => Self::Git(e),
        }
    }
}
