//! `gitdesk branch` command - list branches or create one.

use std::path::Path;

use anyhow::Result;
use gitdesk_core::BranchScope;

use super::utils::open_session;
use crate::output;

/// Run the branch command.
pub fn run(
    repo_path: &Path,
    name: Option<&str>,
    from: Option<&str>,
    remotes: bool,
) -> Result<()> {
    let session = open_session(repo_path)?;

    if let Some(name) = name {
        let oid = session.create_branch(name, from)?;
        output::success(&format!("created branch {name} at {oid}"));
        return Ok(());
    }

    let scope = if remotes {
        BranchScope::Remote
    } else {
        BranchScope::Local
    };
    let branches = session.branches(scope)?;

    if branches.is_empty() {
        output::info("no branches");
        return Ok(());
    }

    let current = session.current_branch()?;
    for branch in &branches {
        let is_current = !remotes && current.as_deref() == Some(branch.as_str());
        println!("{}", output::branch_name(branch, is_current));
    }

    Ok(())
}
