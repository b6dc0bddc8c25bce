//! `gitdesk log` command - show commit history, newest first.

use std::path::Path;

use anyhow::Result;
use chrono::DateTime;
use colored::Colorize;
use gitdesk_core::{CommitRecord, HistoryReader};

use super::utils::{load_config, open_session};
use crate::output;

/// Run the log command.
pub fn run(repo_path: &Path, limit: Option<usize>, json: bool) -> Result<()> {
    let session = open_session(repo_path)?;
    let config = load_config(&session)?;

    let limit = limit.unwrap_or(config.general.history_limit);
    let commits = HistoryReader::new(&session).history(limit)?;

    if json {
        output::essential(&serde_json::to_string_pretty(&commits)?);
        return Ok(());
    }

    if commits.is_empty() {
        output::info("no commits yet");
        return Ok(());
    }

    for commit in &commits {
        print_commit(commit);
    }

    Ok(())
}

/// Print one commit in human-readable format.
fn print_commit(commit: &CommitRecord) {
    let date = DateTime::from_timestamp(commit.timestamp, 0)
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();

    let summary = commit.message.lines().next().unwrap_or_default();
    let merge_marker = if commit.parent_shas.len() > 1 {
        " (merge)".dimmed().to_string()
    } else {
        String::new()
    };

    println!(
        "{} {} {}{} {}",
        commit.short_sha.yellow(),
        date.dimmed(),
        summary,
        merge_marker,
        format!("<{}>", commit.author_email).dimmed()
    );
}
