use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use git2::{ErrorCode, Repository};
use tokio::sync::broadcast;

use crate::error::{CommitFmtError, Result};
use crate::host::{CHANGE_CHANNEL_CAPACITY, MessageHost, StateChange};

/// Default interval between two checks of the repository and message file
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Marks hooks written by `install_hook`
const HOOK_MARKER: &str = "# Installed by commitfmt";

/// Message host backed by a git repository and a commit message file
#[derive(Debug, Clone)]
pub struct GitHost {
    repo_dir: PathBuf,
    message_file: PathBuf,
    poll_interval: Duration,
}

impl GitHost {
    /// Discover the repository containing `start`
    ///
    /// Without an explicit message file the host edits `.git/COMMIT_EDITMSG`.
    pub fn discover(start: &Path, message_file: Option<PathBuf>) -> Result<Self> {
        let repo = open_repository(start)?;
        let repo_dir = repo
            .workdir()
            .unwrap_or_else(|| repo.path())
            .to_path_buf();
        let message_file = message_file.unwrap_or_else(|| repo.path().join("COMMIT_EDITMSG"));

        Ok(Self {
            repo_dir,
            message_file,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Set the watcher interval; zero is raised to one millisecond
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval.max(MIN_POLL_INTERVAL);
        self
    }

    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    pub fn message_file(&self) -> &Path {
        &self.message_file
    }

    fn read_message_file(&self) -> Result<String> {
        match fs::read_to_string(&self.message_file) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl MessageHost for GitHost {
    fn current_branch_name(&self) -> Result<Option<String>> {
        let repo = Repository::open(&self.repo_dir)?;
        Ok(current_branch_name(&repo)?)
    }

    fn current_message(&self) -> Result<String> {
        let content = self.read_message_file()?;
        let (body, _) = split_comment_block(&content);
        Ok(body.to_string())
    }

    fn set_current_message(&self, message: &str) -> Result<()> {
        let content = self.read_message_file()?;
        let (_, comments) = split_comment_block(&content);

        fs::write(&self.message_file, join_comment_block(message, comments))?;
        Ok(())
    }

    /// Start watching the repository and message file
    ///
    /// Must be called from within a tokio runtime. The watcher stops once
    /// every receiver has been dropped.
    fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        let (sender, receiver) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        let host = self.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(host.poll_interval);
            let mut last_branch = host.current_branch_name().ok().flatten();
            let mut last_message = host.read_message_file().ok();

            loop {
                interval.tick().await;
                if sender.receiver_count() == 0 {
                    tracing::debug!("no subscribers left, stopping repository watcher");
                    break;
                }

                let branch = host.current_branch_name().ok().flatten();
                if branch != last_branch {
                    tracing::debug!(?branch, "branch changed");
                    last_branch = branch;
                    let _ = sender.send(StateChange::Repository);
                }

                let message = host.read_message_file().ok();
                if message != last_message {
                    last_message = message;
                    let _ = sender.send(StateChange::Message);
                }
            }
        });

        receiver
    }
}

fn open_repository(start: &Path) -> Result<Repository> {
    Repository::discover(start).map_err(|e| match e.code() {
        ErrorCode::NotFound => CommitFmtError::NotARepository,
        _ => CommitFmtError::Git(e),
    })
}

/// Name of the branch `HEAD` points at
///
/// Works on an unborn branch (a fresh repository with no commits yet).
/// A detached `HEAD` has no branch name.
pub fn current_branch_name(repo: &Repository) -> std::result::Result<Option<String>, git2::Error> {
    match repo.head() {
        Ok(head) => {
            if head.is_branch() {
                Ok(head.shorthand().map(str::to_string))
            } else {
                Ok(None)
            }
        }
        Err(e) if e.code() == ErrorCode::UnbornBranch => {
            let head = repo.find_reference("HEAD")?;
            Ok(head
                .symbolic_target()
                .and_then(|target| target.strip_prefix("refs/heads/"))
                .map(str::to_string))
        }
        Err(e) => Err(e),
    }
}

/// Split a message file into the editable body and git's comment block
///
/// The comment block starts at the first line that is `#` alone or starts
/// with `# `, and runs to the end of the file.
pub fn split_comment_block(content: &str) -> (&str, &str) {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let text = line.trim_end_matches(['\n', '\r']);
        if text == "#" || text.starts_with("# ") {
            return content.split_at(offset);
        }
        offset += line.len();
    }
    (content, "")
}

/// Put a comment block back under an edited body
pub fn join_comment_block(body: &str, comments: &str) -> String {
    let mut joined = body.to_string();
    if !comments.is_empty() && !joined.ends_with('\n') {
        joined.push('\n');
    }
    joined.push_str(comments);
    joined
}

/// Write a `prepare-commit-msg` hook that runs `commitfmt hook`
///
/// Honors `core.hooksPath`. An existing hook not written by commitfmt is only
/// replaced when `force` is set.
pub fn install_hook(start: &Path, force: bool) -> Result<PathBuf> {
    let repo = open_repository(start)?;
    let hooks_dir = match repo.config()?.get_path("core.hooksPath") {
        Ok(path) if path.is_absolute() => path,
        Ok(path) => repo.workdir().unwrap_or_else(|| repo.path()).join(path),
        Err(_) => repo.path().join("hooks"),
    };
    let hook_path = hooks_dir.join("prepare-commit-msg");

    if hook_path.exists() && !force {
        let existing = fs::read_to_string(&hook_path).unwrap_or_default();
        if !existing.contains(HOOK_MARKER) {
            return Err(CommitFmtError::HookExists(hook_path));
        }
    }

    fs::create_dir_all(&hooks_dir)?;
    let script = format!("#!/bin/sh\n{}\nexec commitfmt hook \"$@\"\n", HOOK_MARKER);
    fs::write(&hook_path, script)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&hook_path, fs::Permissions::from_mode(0o755))?;
    }

    tracing::info!(path = %hook_path.display(), "installed prepare-commit-msg hook");
    Ok(hook_path)
}
