//! `gitdesk checkout` command - switch to a branch.

use std::path::Path;

use anyhow::Result;

use super::utils::open_session;
use crate::output;

/// Run the checkout command.
pub fn run(repo_path: &Path, name: &str) -> Result<()> {
    let session = open_session(repo_path)?;

    session.checkout(name)?;
    output::success(&format!("switched to branch {name}"));

    Ok(())
}
