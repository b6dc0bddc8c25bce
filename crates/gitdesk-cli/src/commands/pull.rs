//! `gitdesk pull` command - fetch and fast-forward or merge.

use std::path::Path;

use anyhow::Result;
use gitdesk_core::{PullController, PullOutcome};

use super::utils::{load_config, open_session};
use crate::output;

/// Run the pull command.
pub fn run(repo_path: &Path, remote: Option<&str>) -> Result<()> {
    let session = open_session(repo_path)?;
    let config = load_config(&session)?;

    let remote = remote.unwrap_or(&config.general.default_remote);
    let outcome = PullController::new(&session, remote).pull()?;

    match outcome {
        PullOutcome::AlreadyUpToDate => output::info("already up to date"),
        PullOutcome::FastForwarded { target } => {
            output::success(&format!("fast-forwarded to {}", &target.to_string()[..7]));
        }
        PullOutcome::Merged { commit } => {
            output::success(&format!(
                "merged remote changes as {}",
                &commit.to_string()[..7]
            ));
        }
    }

    Ok(())
}
