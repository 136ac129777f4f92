use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{CommitFmtError, Result};

/// Trait for anything that can propose a commit message body
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn suggest(&self) -> Result<String>;
}

/// Runs a shell command and takes its stdout as the suggestion
#[derive(Debug, Clone)]
pub struct CommandSuggestionProvider {
    command: String,
    working_dir: PathBuf,
}

impl CommandSuggestionProvider {
    pub fn new(command: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            working_dir: working_dir.into(),
        }
    }
}

#[async_trait]
impl SuggestionProvider for CommandSuggestionProvider {
    async fn suggest(&self) -> Result<String> {
        tracing::debug!(command = %self.command, "requesting suggestion");

        let output = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .current_dir(&self.working_dir)
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(CommitFmtError::SuggestionFailed(format!(
                "'{}' exited with {}: {}",
                self.command,
                output.status,
                error.trim()
            )));
        }

        let suggestion = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if suggestion.is_empty() {
            return Err(CommitFmtError::SuggestionFailed(format!(
                "'{}' printed no message",
                self.command
            )));
        }

        Ok(suggestion)
    }
}
