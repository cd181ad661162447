//! Progress bar management for synchronization runs

use anyhow::Result;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::config::{PROGRESS_CHARS, PROGRESS_TEMPLATE};

/// Creates the run-wide progress bar over `total` projects
///
/// Hidden bars accept every call but draw nothing, so callers never branch
/// on quiet mode.
pub fn create_progress_bar(total: usize, hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr());
    pb.set_style(create_progress_style()?);
    pb.set_prefix("🟡 syncing");
    Ok(pb)
}

/// Creates a progress bar style configuration
/// Returns a ProgressStyle configured with the application's visual styling
pub(crate) fn create_progress_style() -> Result<ProgressStyle> {
    Ok(ProgressStyle::default_bar()
        .template(PROGRESS_TEMPLATE)?
        .progress_chars(PROGRESS_CHARS))
}
