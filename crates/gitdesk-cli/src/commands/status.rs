//! `gitdesk status` command - show the working tree status.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::utils::open_session;
use crate::output;

/// Run the status command.
pub fn run(repo_path: &Path, json: bool) -> Result<()> {
    let session = open_session(repo_path)?;

    let status = session.status()?;
    let branch = session.current_branch()?;

    if json {
        let flags: BTreeMap<&str, &str> = status
            .iter()
            .map(|(path, flag)| (path.as_str(), output::status_name(*flag)))
            .collect();
        let payload = serde_json::json!({
            "branch": branch,
            "files": flags,
        });
        output::essential(&serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    match &branch {
        Some(name) => println!("On branch {}", name.cyan().bold()),
        None => println!("{}", "No commits yet".dimmed()),
    }

    if status.is_empty() {
        output::success("working tree clean");
        return Ok(());
    }

    println!();
    for (path, flag) in &status {
        println!("  {} {path}", output::status_glyph(*flag));
    }
    println!();
    output::info(&format!("{} file(s) changed", status.len()));

    Ok(())
}
