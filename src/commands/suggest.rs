use std::path::Path;
use std::time::Duration;

use crate::cli::TemplateArgs;
use crate::commands::resolve_branch;
use crate::config::GitConfigSource;
use crate::driver::MessageDriver;
use crate::git_ops::{join_comment_block, split_comment_block};
use crate::host::MemoryHost;
use crate::suggest::CommandSuggestionProvider;

pub async fn handle_suggest(
    file: Option<&Path>,
    branch: Option<String>,
    command: Option<String>,
    timeout_ms: Option<u64>,
    template: &TemplateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = GitConfigSource::new(".", template.overrides());
    let suggest_config = source.load_suggest()?;

    let command = command.or(suggest_config.command).ok_or(
        "No suggestion command configured. Set commitfmt.suggest.command or pass --command.",
    )?;
    let timeout = Duration::from_millis(timeout_ms.unwrap_or(suggest_config.timeout_ms));

    let content = match file {
        Some(path) if path.exists() => std::fs::read_to_string(path)?,
        _ => String::new(),
    };
    let (body, comments) = split_comment_block(&content);
    let branch = resolve_branch(branch)?;

    let driver = MessageDriver::new(MemoryHost::new(branch.as_deref(), body), source);
    let provider = CommandSuggestionProvider::new(command, ".");
    let message = driver.generate_with_suggestion(&provider, timeout).await?;

    match file {
        Some(path) => {
            std::fs::write(path, join_comment_block(&message, comments))?;
            println!("Wrote suggested message to {}", path.display());
        }
        None => println!("{}", message),
    }

    Ok(())
}
