#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::process::Command as StdCommand;

/// A test repository wrapper that provides convenient methods for testing commitfmt
///
/// # Builder-Style API Examples
///
/// ```rust
/// // For non-git scenarios
/// let repo = TestRepo::empty();
///
/// // Most common: git repository on a branch
/// let repo = TestRepo::on_branch("feat-login-123");
///
/// // Branch with one commit (hooks and amend tests)
/// let repo = TestRepo::on_branch("feat-login-123").with_initial_commit();
/// ```
pub struct TestRepo {
    pub temp_dir: assert_fs::TempDir,
}

impl TestRepo {
    /// Create an empty temporary directory (not a git repository)
    pub fn empty() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().unwrap(),
        }
    }

    /// Create a git repository with basic configuration
    pub fn with_git() -> Self {
        let repo = Self::empty();
        repo.init_git_internal();
        repo
    }

    /// Create a git repository whose HEAD points at `branch` (no commits yet)
    pub fn on_branch(branch: &str) -> Self {
        let repo = Self::with_git();
        repo.git(&["checkout", "-q", "-b", branch]);
        repo
    }

    /// Add a first commit so HEAD is born
    pub fn with_initial_commit(self) -> Self {
        self.add_and_commit("README.md", "# Test Project", "Initial commit");
        self
    }

    /// Initialize this directory as a git repository (internal method)
    fn init_git_internal(&self) {
        self.git(&["init", "-q"]);

        // Configure basic git settings for the test repo
        self.set_git_config("user.name", "Test User")
            .expect("Failed to set git user.name");
        self.set_git_config("user.email", "test@example.com")
            .expect("Failed to set git user.email");
        self.set_git_config("commit.gpgsign", "false")
            .expect("Failed to disable commit signing");
    }

    /// Run a git command in the repository and assert it succeeds
    pub fn git(&self, args: &[&str]) -> String {
        let output = StdCommand::new("git")
            .args(args)
            .current_dir(&self.temp_dir)
            .output()
            .expect("Failed to run git");

        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Add a file with content to the repository
    pub fn add_file(&self, filename: &str, content: &str) -> &Self {
        self.temp_dir.child(filename).write_str(content).unwrap();
        self
    }

    /// Stage files for commit
    pub fn git_add(&self, files: &[&str]) -> &Self {
        let mut args = vec!["add"];
        args.extend(files);
        self.git(&args);
        self
    }

    /// Create a commit with the given message
    pub fn git_commit(&self, message: &str) -> &Self {
        self.git(&["commit", "-q", "-m", message]);
        self
    }

    /// Add a file and commit it in one step
    pub fn add_and_commit(&self, filename: &str, content: &str, commit_message: &str) -> &Self {
        self.add_file(filename, content)
            .git_add(&[filename])
            .git_commit(commit_message)
    }

    /// Message of the latest commit
    pub fn last_commit_message(&self) -> String {
        self.git(&["log", "-1", "--format=%B"]).trim_end().to_string()
    }

    /// Set a git config value
    pub fn set_git_config(&self, key: &str, value: &str) -> Result<&Self, String> {
        let output = StdCommand::new("git")
            .args(["config", key, value])
            .current_dir(&self.temp_dir)
            .output()
            .expect("Failed to run git config");

        if output.status.success() {
            Ok(self)
        } else {
            Err(String::from_utf8_lossy(&output.stderr).to_string())
        }
    }

    /// The commitfmt binary, running inside this repository
    pub fn commitfmt(&self) -> Command {
        let mut cmd = Command::cargo_bin("commitfmt").unwrap();
        cmd.current_dir(&self.temp_dir)
            .env_remove("COMMITFMT_TEMPLATE")
            .env_remove("COMMITFMT_SEPARATOR")
            .env_remove("COMMITFMT_SUGGEST_COMMAND");
        cmd
    }

    /// Read a file from the repository
    pub fn read_file(&self, filename: &str) -> String {
        std::fs::read_to_string(self.temp_dir.child(filename).path()).unwrap()
    }

    /// Get the path to the temporary directory
    pub fn path(&self) -> &std::path::Path {
        self.temp_dir.path()
    }

    /// Assert that a file exists
    pub fn assert_file_exists(&self, filename: &str) -> &Self {
        self.temp_dir.child(filename).assert(predicate::path::exists());
        self
    }

    /// Assert that a file has specific content
    pub fn assert_file_content(&self, filename: &str, expected_content: &str) -> &Self {
        self.temp_dir.child(filename).assert(expected_content);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_directory() {
        let repo = TestRepo::empty();

        assert!(repo.temp_dir.path().exists());
        assert!(!repo.temp_dir.child(".git").path().exists());
    }

    #[test]
    fn test_on_branch() {
        let repo = TestRepo::on_branch("feat-login-123");

        repo.assert_file_exists(".git/HEAD");
        assert_eq!(repo.read_file(".git/HEAD").trim(), "ref: refs/heads/feat-login-123");
    }

    #[test]
    fn test_initial_commit() {
        let repo = TestRepo::on_branch("main").with_initial_commit();

        repo.assert_file_content("README.md", "# Test Project");
        assert_eq!(repo.last_commit_message(), "Initial commit");
    }
}
