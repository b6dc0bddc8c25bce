//! `gitdesk clone` command - clone with a progress bar.

use std::path::Path;
use std::sync::mpsc;
use std::thread;

use anyhow::{Result, anyhow};
use gitdesk_core::CloneService;
use indicatif::{ProgressBar, ProgressStyle};

use crate::output;

/// Run the clone command.
///
/// The transfer runs on a worker thread; progress samples cross over a
/// channel and drive the bar from this thread.
pub fn run(url: &str, path: &Path) -> Result<()> {
    let (tx, rx) = mpsc::channel();

    let worker_url = url.to_string();
    let dest = path.to_path_buf();
    let worker = thread::spawn(move || CloneService::clone(&worker_url, &dest, Some(tx)));

    let bar = ProgressBar::new(0);
    bar.set_style(ProgressStyle::with_template(
        "{bar:40.cyan/blue} {pos}/{len} objects ({percent}%)",
    )?);

    for sample in rx {
        bar.set_length(sample.total_objects as u64);
        bar.set_position(sample.received_objects as u64);
    }
    bar.finish_and_clear();

    let session = worker
        .join()
        .map_err(|_| anyhow!("clone worker panicked"))??;

    let branch = session.current_branch()?.unwrap_or_default();
    output::success(&format!(
        "cloned {url} into {} (branch {branch})",
        path.display()
    ));

    Ok(())
}
