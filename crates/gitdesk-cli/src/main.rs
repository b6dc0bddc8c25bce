//! Gitdesk CLI - desktop-style git workflows in the terminal.

use clap::Parser;

mod commands;
mod output;

use commands::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    output::set_quiet(cli.quiet);

    let repo = cli.repo;
    let result = match cli.command {
        Commands::Status { json } => commands::status::run(&repo, json),
        Commands::Log { limit, json } => commands::log::run(&repo, limit, json),
        Commands::Diff { commit } => commands::diff::run(&repo, commit.as_deref()),
        Commands::Branch {
            name,
            from,
            remotes,
        } => commands::branch::run(&repo, name.as_deref(), from.as_deref(), remotes),
        Commands::Checkout { name } => commands::checkout::run(&repo, &name),
        Commands::Stage { paths, all } => commands::stage::run(&repo, &paths, all),
        Commands::Commit { message, all } => commands::commit::run(&repo, &message, all),
        Commands::Pull { remote } => commands::pull::run(&repo, remote.as_deref()),
        Commands::Push { remote } => commands::push::run(&repo, remote.as_deref()),
        Commands::Clone { url, path } => commands::clone::run(&url, &path),
        Commands::Remote { url } => commands::remote::run(&repo, url.as_deref()),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
