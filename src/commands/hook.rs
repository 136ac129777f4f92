use std::path::Path;

use crate::config::{ConfigOverrides, GitConfigSource};
use crate::driver::MessageDriver;
use crate::git_ops::GitHost;

/// Entry point for git's `prepare-commit-msg` hook
///
/// Merge and squash messages written by git are left alone.
/// Failures are reported but never abort the commit.
pub fn handle_hook(message_file: &Path, source: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!(file = %message_file.display(), ?source, "prepare-commit-msg");

    if matches!(source, Some("merge" | "squash")) {
        tracing::debug!(?source, "skipping generated message");
        return Ok(());
    }

    let result = GitHost::discover(Path::new("."), Some(message_file.to_path_buf())).and_then(|host| {
        let config = GitConfigSource::new(host.repo_dir(), ConfigOverrides::default());
        MessageDriver::new(host, config).update_message_field()
    });

    match result {
        Ok(outcome) => tracing::debug!(?outcome, "hook finished"),
        Err(e) => eprintln!("commitfmt: could not format commit message: {}", e),
    }

    Ok(())
}
