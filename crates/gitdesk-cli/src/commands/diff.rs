//! `gitdesk diff` command - show a unified patch.

use std::path::Path;

use anyhow::Result;
use gitdesk_core::DiffGenerator;

use super::utils::open_session;
use crate::output;

/// Run the diff command.
pub fn run(repo_path: &Path, commit: Option<&str>) -> Result<()> {
    let session = open_session(repo_path)?;

    let patch = DiffGenerator::new(&session).diff(commit)?;
    if patch.is_empty() {
        output::info("no changes");
    } else {
        output::essential(&patch);
    }

    Ok(())
}
