//! `gitdesk stage` command - stage paths for the next commit.

use std::path::Path;

use anyhow::{Result, bail};
use gitdesk_core::CommitBuilder;

use super::utils::open_session;
use crate::output;

/// Run the stage command.
pub fn run(repo_path: &Path, paths: &[String], all: bool) -> Result<()> {
    let session = open_session(repo_path)?;
    let builder = CommitBuilder::new(&session);

    if all {
        builder.stage_all()?;
        output::success("staged all changes");
        return Ok(());
    }

    if paths.is_empty() {
        bail!("nothing to stage - pass paths or use --all");
    }

    builder.stage(paths)?;
    output::success(&format!("staged {} path(s)", paths.len()));

    Ok(())
}
