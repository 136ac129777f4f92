use std::path::Path;

use crate::cli::TemplateArgs;
use crate::commands::{read_message, resolve_branch};
use crate::config::GitConfigSource;
use crate::driver::{MessageDriver, UpdateOutcome};
use crate::git_ops::{join_comment_block, split_comment_block};
use crate::host::MemoryHost;

pub fn handle_format(
    file: Option<&Path>,
    branch: Option<String>,
    template: &TemplateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = read_message(file)?;
    let (body, comments) = split_comment_block(&content);
    let branch = resolve_branch(branch)?;

    let driver = MessageDriver::new(
        MemoryHost::new(branch.as_deref(), body),
        GitConfigSource::new(".", template.overrides()),
    );
    let outcome = driver.update_message_field()?;

    match file {
        Some(path) => {
            if outcome == UpdateOutcome::Rewritten {
                std::fs::write(path, join_comment_block(&driver.host().message(), comments))?;
                tracing::debug!(path = %path.display(), "message file rewritten");
            }
        }
        None => print!("{}", join_comment_block(&driver.host().message(), comments)),
    }

    Ok(())
}
