//! `gitdesk remote` command - list remotes or show a remote URL.

use std::path::Path;

use anyhow::Result;

use super::utils::open_session;
use crate::output;

/// Run the remote command.
pub fn run(repo_path: &Path, url_of: Option<&str>) -> Result<()> {
    let session = open_session(repo_path)?;

    if let Some(name) = url_of {
        match session.remote_url(name)? {
            Some(url) => output::essential(&url),
            None => output::warn(&format!("no such remote: {name}")),
        }
        return Ok(());
    }

    let remotes = session.remotes()?;
    if remotes.is_empty() {
        output::info("no remotes configured");
        return Ok(());
    }

    for remote in &remotes {
        output::essential(remote);
    }

    Ok(())
}
