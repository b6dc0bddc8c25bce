//! Command-line surface: argument definitions and one module per command.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

pub mod branch;
pub mod checkout;
pub mod clone;
pub mod commit;
pub mod completions;
pub mod diff;
pub mod log;
pub mod pull;
pub mod push;
pub mod remote;
pub mod stage;
pub mod status;
mod utils;

/// Desktop-style git workflows in the terminal.
#[derive(Parser)]
#[command(name = "gitdesk", version, about)]
pub struct Cli {
    /// Repository path to operate on.
    #[arg(short = 'C', long = "repo", global = true, default_value = ".")]
    pub repo: PathBuf,

    /// Suppress informational output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show working tree status.
    Status {
        /// Emit machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show commit history, newest first.
    Log {
        /// Maximum number of commits to show.
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Emit machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show a patch for a commit, or for uncommitted changes.
    Diff {
        /// Commit to diff against its first parent; defaults to the
        /// working tree against HEAD.
        commit: Option<String>,
    },

    /// List branches, or create one.
    Branch {
        /// Branch to create; lists branches when omitted.
        name: Option<String>,

        /// Start point for the new branch (commit, branch, or tag).
        #[arg(long)]
        from: Option<String>,

        /// List remote-tracking branches instead of local ones.
        #[arg(short, long)]
        remotes: bool,
    },

    /// Switch HEAD and the working tree to a branch.
    Checkout {
        /// Branch to check out.
        name: String,
    },

    /// Stage paths for the next commit.
    Stage {
        /// Paths to stage.
        paths: Vec<String>,

        /// Stage every modified, added, deleted, and untracked path.
        #[arg(short, long)]
        all: bool,
    },

    /// Record the staged snapshot as a commit.
    Commit {
        /// Commit message.
        #[arg(short, long)]
        message: String,

        /// Stage all changes first.
        #[arg(short, long)]
        all: bool,
    },

    /// Fetch from a remote and fast-forward or merge.
    Pull {
        /// Remote to pull from (defaults to the configured remote).
        #[arg(long)]
        remote: Option<String>,
    },

    /// Push the current branch to a remote.
    Push {
        /// Remote to push to (defaults to the configured remote).
        #[arg(long)]
        remote: Option<String>,
    },

    /// Clone a repository with progress reporting.
    Clone {
        /// Source URL.
        url: String,

        /// Destination path.
        path: PathBuf,
    },

    /// List remotes or show a remote's URL.
    Remote {
        /// Show the URL of this remote instead of listing names.
        #[arg(long)]
        url: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}
