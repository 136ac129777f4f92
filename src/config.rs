use std::path::{Path, PathBuf};
use std::process::Command;

use inquire::{Confirm, Text};
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_TEMPLATE: &str = "{b1}({b2}):\n{message}\n\n[{b3}]";
pub const DEFAULT_SEPARATOR: &str = "-";
pub const DEFAULT_SUGGEST_TIMEOUT_MS: u64 = 5000;

const TEMPLATE_KEY: &str = "commitfmt.template";
const SEPARATOR_KEY: &str = "commitfmt.separator";
const SUGGEST_COMMAND_KEY: &str = "commitfmt.suggest.command";
const SUGGEST_TIMEOUT_KEY: &str = "commitfmt.suggest.timeoutMs";

const TEMPLATE_ENV: &str = "COMMITFMT_TEMPLATE";
const SEPARATOR_ENV: &str = "COMMITFMT_SEPARATOR";
const SUGGEST_COMMAND_ENV: &str = "COMMITFMT_SUGGEST_COMMAND";

/// Settings consumed by the template engine
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageConfig {
    pub template: String,
    pub separator: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

/// Settings for the external suggestion flow
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SuggestConfig {
    pub command: Option<String>,
    pub timeout_ms: u64,
}

/// Somewhere a fresh `MessageConfig` can be read from
///
/// Implementations are consulted once per operation and never cached, so
/// edits made between two runs are always picked up.
pub trait ConfigSource: Send + Sync {
    fn load(&self) -> Result<MessageConfig>;
}

impl ConfigSource for MessageConfig {
    fn load(&self) -> Result<MessageConfig> {
        Ok(self.clone())
    }
}

/// Command-line values that win over every stored setting
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub template: Option<String>,
    pub separator: Option<String>,
}

/// Reads settings from git config, then the environment, then defaults
#[derive(Debug, Clone)]
pub struct GitConfigSource {
    repo_dir: PathBuf,
    overrides: ConfigOverrides,
}

impl GitConfigSource {
    pub fn new(repo_dir: impl Into<PathBuf>, overrides: ConfigOverrides) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            overrides,
        }
    }

    pub fn load_suggest(&self) -> Result<SuggestConfig> {
        let command = resolve_setting(&self.repo_dir, SUGGEST_COMMAND_KEY, Some(SUGGEST_COMMAND_ENV))?;
        let timeout_ms = match get_git_config(&self.repo_dir, SUGGEST_TIMEOUT_KEY)? {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                crate::error::CommitFmtError::Config(format!(
                    "{} must be a number of milliseconds, got '{}'",
                    SUGGEST_TIMEOUT_KEY, raw
                ))
            })?,
            None => DEFAULT_SUGGEST_TIMEOUT_MS,
        };

        Ok(SuggestConfig { command, timeout_ms })
    }
}

impl ConfigSource for GitConfigSource {
    fn load(&self) -> Result<MessageConfig> {
        let template = match &self.overrides.template {
            Some(template) => template.clone(),
            None => resolve_setting(&self.repo_dir, TEMPLATE_KEY, Some(TEMPLATE_ENV))?
                .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string()),
        };
        let separator = match &self.overrides.separator {
            Some(separator) => separator.clone(),
            None => resolve_setting(&self.repo_dir, SEPARATOR_KEY, Some(SEPARATOR_ENV))?
                .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
        };

        tracing::debug!(?template, ?separator, "loaded message config");
        Ok(MessageConfig { template, separator })
    }
}

/// Look a setting up in git config first, falling back to an environment variable
fn resolve_setting(repo_dir: &Path, key: &str, env: Option<&str>) -> Result<Option<String>> {
    if let Some(value) = get_git_config(repo_dir, key)? {
        return Ok(Some(value));
    }

    Ok(env
        .and_then(|name| std::env::var(name).ok())
        .filter(|value| !value.is_empty()))
}

/// Get a git config value (repository settings first, then global)
///
/// Only the line terminator git prints is removed, so templates keep their
/// own trailing newlines.
pub fn get_git_config(repo_dir: &Path, key: &str) -> Result<Option<String>> {
    let output = Command::new("git")
        .args(["config", "--get", key])
        .current_dir(repo_dir)
        .output()?;

    if !output.status.success() {
        return Ok(None);
    }

    let raw = String::from_utf8_lossy(&output.stdout);
    let value = raw.strip_suffix('\n').unwrap_or(&raw);
    if value.is_empty() {
        Ok(None)
    } else {
        Ok(Some(value.to_string()))
    }
}

/// Set a git config value for the repository at `repo_dir`
pub fn set_git_config(repo_dir: &Path, key: &str, value: &str) -> Result<()> {
    let output = Command::new("git")
        .args(["config", key, value])
        .current_dir(repo_dir)
        .output()?;

    if !output.status.success() {
        let error = String::from_utf8_lossy(&output.stderr);
        return Err(crate::error::CommitFmtError::Config(format!(
            "failed to set git config {}: {}",
            key,
            error.trim()
        )));
    }

    Ok(())
}

/// Show newlines as `\n` so a template fits on one prompt line
pub fn escape_template(template: &str) -> String {
    template.replace('\n', "\\n")
}

/// Turn `\n` escapes typed at a prompt back into newlines
pub fn unescape_template(input: &str) -> String {
    input.replace("\\n", "\n")
}

/// Answers collected by `interactive_init`
#[derive(Debug, Clone)]
pub struct InitAnswers {
    pub config: MessageConfig,
    pub suggest_command: Option<String>,
    pub install_hook: bool,
}

/// Ask for commitfmt settings and store them in the repository's git config
pub fn interactive_init(repo_dir: &Path) -> Result<InitAnswers> {
    println!("Welcome to commitfmt! Let's set up your commit message template.\n");

    let source = GitConfigSource::new(repo_dir, ConfigOverrides::default());
    let current = source.load()?;

    let template = Text::new("Commit message template:")
        .with_help_message("Use {message} for the body, {b1}, {b2}, ... for branch parts and \\n for newlines")
        .with_default(&escape_template(&current.template))
        .prompt()?;
    let template = unescape_template(&template);
    set_git_config(repo_dir, TEMPLATE_KEY, &template)?;
    println!("Template set");

    let separator = Text::new("Branch name separator:")
        .with_help_message("feat-login-123 split on '-' gives b1=feat, b2=login, b3=123")
        .with_default(&current.separator)
        .prompt()?;
    set_git_config(repo_dir, SEPARATOR_KEY, &separator)?;
    println!("Separator set to: {}", separator);

    let suggest_command = Text::new("Suggestion command (optional):")
        .with_help_message("A shell command that prints a commit message, used by 'commitfmt suggest'")
        .prompt()?;
    let suggest_command = if suggest_command.trim().is_empty() {
        None
    } else {
        set_git_config(repo_dir, SUGGEST_COMMAND_KEY, suggest_command.trim())?;
        println!("Suggestion command configured");
        Some(suggest_command.trim().to_string())
    };

    let install_hook = Confirm::new("Install the prepare-commit-msg hook?")
        .with_default(true)
        .with_help_message("The hook formats every commit message with your template")
        .prompt()?;

    Ok(InitAnswers {
        config: MessageConfig { template, separator },
        suggest_command,
        install_hook,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command as StdCommand;

    fn init_repo() -> tempfile::TempDir {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let status = StdCommand::new("git")
            .args(["init", "-q"])
            .current_dir(temp_dir.path())
            .status()
            .expect("Failed to run git init");
        assert!(status.success());
        temp_dir
    }

    #[test]
    fn test_default_config() {
        let config = MessageConfig::default();
        assert_eq!(config.template, "{b1}({b2}):\n{message}\n\n[{b3}]");
        assert_eq!(config.separator, "-");
    }

    #[test]
    fn test_template_escaping() {
        assert_eq!(escape_template(DEFAULT_TEMPLATE), "{b1}({b2}):\\n{message}\\n\\n[{b3}]");
        assert_eq!(unescape_template("{b1}:\\n{message}"), "{b1}:\n{message}");
        assert_eq!(unescape_template(&escape_template(DEFAULT_TEMPLATE)), DEFAULT_TEMPLATE);
    }

    #[test]
    fn test_overrides_win() {
        let temp_dir = init_repo();
        let source = GitConfigSource::new(
            temp_dir.path(),
            ConfigOverrides {
                template: Some("{b2}: {message}".to_string()),
                separator: Some("/".to_string()),
            },
        );

        let config = source.load().unwrap();
        assert_eq!(config.template, "{b2}: {message}");
        assert_eq!(config.separator, "/");
    }

    #[test]
    fn test_repository_config_is_read_fresh() {
        let temp_dir = init_repo();
        let source = GitConfigSource::new(temp_dir.path(), ConfigOverrides::default());

        set_git_config(temp_dir.path(), TEMPLATE_KEY, "{b1}:\n{message}\n").unwrap();
        set_git_config(temp_dir.path(), SEPARATOR_KEY, "/").unwrap();
        let first = source.load().unwrap();
        assert_eq!(first.template, "{b1}:\n{message}\n");
        assert_eq!(first.separator, "/");

        set_git_config(temp_dir.path(), SEPARATOR_KEY, "_").unwrap();
        assert_eq!(source.load().unwrap().separator, "_");
    }

    #[test]
    fn test_suggest_config() {
        let temp_dir = init_repo();
        let source = GitConfigSource::new(temp_dir.path(), ConfigOverrides::default());

        set_git_config(temp_dir.path(), SUGGEST_COMMAND_KEY, "echo hello").unwrap();
        set_git_config(temp_dir.path(), SUGGEST_TIMEOUT_KEY, "250").unwrap();
        let suggest = source.load_suggest().unwrap();
        assert_eq!(suggest.command.as_deref(), Some("echo hello"));
        assert_eq!(suggest.timeout_ms, 250);

        set_git_config(temp_dir.path(), SUGGEST_TIMEOUT_KEY, "soon").unwrap();
        assert!(source.load_suggest().is_err());
    }

    #[test]
    fn test_missing_key_is_none() {
        let temp_dir = init_repo();
        assert_eq!(get_git_config(temp_dir.path(), "commitfmt.nothing").unwrap(), None);
    }
}
