//! `gitdesk commit` command - record the staged snapshot.

use std::path::Path;

use anyhow::Result;
use gitdesk_core::CommitBuilder;

use super::utils::{load_config, open_session};
use crate::output;

/// Run the commit command.
pub fn run(repo_path: &Path, message: &str, all: bool) -> Result<()> {
    let session = open_session(repo_path)?;
    let config = load_config(&session)?;
    let builder = CommitBuilder::new(&session);

    if all {
        builder.stage_all()?;
    }

    if !builder.has_staged_changes()? {
        output::warn("no staged changes - recording an empty commit");
    }

    let user = config.resolve_user(session.user_info());
    let oid = builder.commit(message, &user.name, &user.email)?;

    let sha = oid.to_string();
    output::success(&format!("committed {}", &sha[..7]));
    output::essential(&sha);

    Ok(())
}
