//! Shared helpers for command implementations.

use std::path::Path;

use anyhow::{Result, bail};
use gitdesk_core::{Config, RepositorySession};

/// Open a session at `path`, rejecting invalid repositories up front.
pub fn open_session(path: &Path) -> Result<RepositorySession> {
    let session = RepositorySession::open(path);
    if !session.is_valid() {
        bail!("not a git repository: {}", path.display());
    }
    Ok(session)
}

/// Load the gitdesk config stored under the session's git directory.
pub fn load_config(session: &RepositorySession) -> Result<Config> {
    session.git_dir().map_or_else(
        || Ok(Config::default()),
        |git_dir| Ok(Config::load(git_dir.join("gitdesk").join("config.toml"))?),
    )
}
