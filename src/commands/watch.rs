use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::TemplateArgs;
use crate::config::GitConfigSource;
use crate::driver::MessageDriver;
use crate::git_ops::GitHost;

pub async fn handle_watch(
    file: Option<PathBuf>,
    debounce_ms: u64,
    poll_ms: u64,
    template: &TemplateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let host = GitHost::discover(Path::new("."), file)?.with_poll_interval(Duration::from_millis(poll_ms));
    let config = GitConfigSource::new(host.repo_dir(), template.overrides());
    println!("Watching {} (press Ctrl-C to stop)", host.message_file().display());

    let driver = MessageDriver::new(host, config);
    driver
        .watch(Duration::from_millis(debounce_ms), async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("could not listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;

    Ok(())
}
