use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by the host, driver and suggestion layers.
///
/// The template engine itself never fails.
#[derive(Debug, Error)]
pub enum CommitFmtError {
    #[error("not inside a git repository")]
    NotARepository,

    #[error("a prepare-commit-msg hook already exists at {} (use --force to replace it)", .0.display())]
    HookExists(PathBuf),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("suggestion timed out after {0:?}")]
    SuggestionTimeout(Duration),

    #[error("a suggestion request is already in flight")]
    SuggestionInFlight,

    #[error("suggestion command failed: {0}")]
    SuggestionFailed(String),

    #[error(transparent)]
    Git(#[from] git2::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Prompt(#[from] inquire::InquireError),
}

pub type Result<T> = std::result::Result<T, CommitFmtError>;
