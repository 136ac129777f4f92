use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{ConfigOverrides, unescape_template};

#[derive(Parser)]
#[command(name = "commitfmt")]
#[command(about = "Shape commit messages from the current branch name")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// One-off replacements for the configured template settings
#[derive(Args, Debug, Clone, Default)]
pub struct TemplateArgs {
    /// Template to use instead of the configured one (`\n` is a newline)
    #[arg(long)]
    pub template: Option<String>,
    /// Branch name separator to use instead of the configured one
    #[arg(long)]
    pub separator: Option<String>,
}

impl TemplateArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            template: self.template.as_deref().map(unescape_template),
            separator: self.separator.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Format a commit message file in place, or stdin to stdout
    Format {
        /// Message file to rewrite (reads stdin when omitted)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Branch name to use instead of the checked-out branch
        #[arg(long)]
        branch: Option<String>,
        #[command(flatten)]
        template: TemplateArgs,
    },
    /// Check whether a commit message already matches the template
    Check {
        /// Message file to check (reads stdin when omitted)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Branch name to use instead of the checked-out branch
        #[arg(long)]
        branch: Option<String>,
        #[command(flatten)]
        template: TemplateArgs,
    },
    /// Show how a branch name is split into template parts
    Parse {
        /// Branch name (defaults to the checked-out branch)
        branch: Option<String>,
        /// Separator to use instead of the configured one
        #[arg(long)]
        separator: Option<String>,
    },
    /// Format the commit message file (prepare-commit-msg hook entry point)
    Hook {
        /// Path to the commit message file
        message_file: PathBuf,
        /// Source of the message, as passed by git
        source: Option<String>,
        /// Commit object name, as passed by git
        sha: Option<String>,
    },
    /// Install the prepare-commit-msg hook in this repository
    Install {
        /// Replace an existing hook not written by commitfmt
        #[arg(long)]
        force: bool,
    },
    /// Generate a message with the suggestion command, then format it
    Suggest {
        /// Message file to write (prints to stdout when omitted)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Branch name to use instead of the checked-out branch
        #[arg(long)]
        branch: Option<String>,
        /// Shell command that prints a message, instead of the configured one
        #[arg(long)]
        command: Option<String>,
        /// Give up on the suggestion after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
        #[command(flatten)]
        template: TemplateArgs,
    },
    /// Keep a commit message file formatted while it is being edited
    Watch {
        /// Message file to watch (defaults to .git/COMMIT_EDITMSG)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Quiet period after an edit before formatting
        #[arg(long, default_value_t = 1000)]
        debounce_ms: u64,
        /// Interval between checks for branch and file changes
        #[arg(long, default_value_t = 250, value_parser = clap::value_parser!(u64).range(1..))]
        poll_ms: u64,
        #[command(flatten)]
        template: TemplateArgs,
    },
    /// Initialize commitfmt configuration for this repository
    Init,
    /// Show the effective configuration
    Config {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}
