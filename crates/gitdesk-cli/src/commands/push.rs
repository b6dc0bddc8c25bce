//! `gitdesk push` command - push the current branch.

use std::path::Path;

use anyhow::Result;
use gitdesk_core::PullController;

use super::utils::{load_config, open_session};
use crate::output;

/// Run the push command.
pub fn run(repo_path: &Path, remote: Option<&str>) -> Result<()> {
    let session = open_session(repo_path)?;
    let config = load_config(&session)?;

    let remote = remote.unwrap_or(&config.general.default_remote);
    PullController::new(&session, remote).push()?;

    let branch = session.current_branch()?.unwrap_or_default();
    output::success(&format!("pushed {branch} to {remote}"));

    Ok(())
}
