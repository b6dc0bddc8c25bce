//! Terminal output formatting utilities.

use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use gitdesk_core::FileStatus;

static QUIET_MODE: AtomicBool = AtomicBool::new(false);

/// Set quiet mode globally. Call once at startup.
pub fn set_quiet(quiet: bool) {
    QUIET_MODE.store(quiet, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET_MODE.load(Ordering::Relaxed)
}

/// Print a success message (suppressed in quiet mode).
pub fn success(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "✓".green(), msg);
    }
}

/// Print an error message (always prints to stderr).
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a warning message (always prints to stderr).
pub fn warn(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print an info message (suppressed in quiet mode).
pub fn info(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "→".blue(), msg);
    }
}

/// Print essential machine-readable output (always prints).
///
/// Use for results that should be available for piping, like patches
/// and JSON.
pub fn essential(msg: &str) {
    println!("{msg}");
}

/// Two-character indicator for a file status flag, in git's porcelain
/// spirit.
#[must_use]
pub fn status_glyph(status: FileStatus) -> String {
    match status {
        FileStatus::Unmodified => "  ".to_string(),
        FileStatus::Modified => " M".yellow().to_string(),
        FileStatus::Added => " A".green().to_string(),
        FileStatus::Deleted => " D".red().to_string(),
        FileStatus::Renamed => " R".cyan().to_string(),
        FileStatus::Untracked => "??".dimmed().to_string(),
        FileStatus::Conflicted => " U".red().bold().to_string(),
    }
}

/// Stable lowercase name for a status flag, for JSON output.
#[must_use]
pub const fn status_name(status: FileStatus) -> &'static str {
    match status {
        FileStatus::Unmodified => "unmodified",
        FileStatus::Modified => "modified",
        FileStatus::Added => "added",
        FileStatus::Deleted => "deleted",
        FileStatus::Renamed => "renamed",
        FileStatus::Untracked => "untracked",
        FileStatus::Conflicted => "conflicted",
    }
}

/// Get a colored branch name with current indicator.
#[must_use]
pub fn branch_name(name: &str, is_current: bool) -> String {
    if is_current {
        format!("{} {}", "▶".cyan(), name.cyan().bold())
    } else {
        format!("  {name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_glyph_untracked() {
        assert!(status_glyph(FileStatus::Untracked).contains("??"));
    }

    #[test]
    fn test_status_glyph_modified() {
        assert!(status_glyph(FileStatus::Modified).contains('M'));
    }

    #[test]
    fn test_status_name_covers_conflicts() {
        assert_eq!(status_name(FileStatus::Conflicted), "conflicted");
        assert_eq!(status_name(FileStatus::Untracked), "untracked");
    }

    #[test]
    fn test_branch_name_current() {
        let name = branch_name("feature/test", true);
        assert!(name.contains("feature/test"));
        assert!(name.contains('▶'));
    }

    #[test]
    fn test_branch_name_not_current() {
        let name = branch_name("feature/test", false);
        assert!(name.contains("feature/test"));
        assert!(!name.contains('▶'));
    }

    #[test]
    fn test_quiet_mode_toggle() {
        set_quiet(true);
        assert!(is_quiet());
        set_quiet(false);
        assert!(!is_quiet());
    }
}
