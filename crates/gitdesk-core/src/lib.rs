//! # gitdesk-core
//!
//! Local-repository orchestration layer for gitdesk, built on git2-rs.
//! Provides sessions over on-disk repositories, staging and commit
//! creation, fetch+merge pull with conflict detection, clone with
//! progress reporting, and read-only history/diff views.
//!
//! Mutating operations (stage, commit, checkout, branch creation, pull,
//! push) on the same repository path must be serialized by the caller;
//! read operations may run concurrently with each other.

pub mod clone;
pub mod commit;
pub mod config;
pub mod diff;
mod error;
pub mod history;
pub mod pull;
pub mod session;

pub use clone::{CloneProgress, CloneService};
pub use commit::CommitBuilder;
pub use config::Config;
pub use diff::DiffGenerator;
pub use error::{Error, Result};
pub use git2::Oid;
pub use history::{CommitRecord, HistoryReader};
pub use pull::{PullController, PullOutcome};
pub use session::{
    BranchScope, DEFAULT_USER_EMAIL, DEFAULT_USER_NAME, FileStatus, RepositorySession, UserInfo,
};
