use predicates::prelude::*;

mod test_utils;
use test_utils::TestRepo;

#[test]
fn test_suggest_formats_command_output() {
    let repo = TestRepo::on_branch("feat-login-123");

    repo.commitfmt()
        .args(["suggest", "--command", "echo 'Add login form'"])
        .assert()
        .success()
        .stdout("feat(login):\nAdd login form\n\n[123]\n");
}

#[test]
fn test_suggest_uses_configured_command_and_writes_file() {
    let repo = TestRepo::on_branch("fix-logout-456");
    repo.set_git_config("commitfmt.suggest.command", "printf 'Fix logout issue'")
        .unwrap();
    repo.add_file("MSG", "\n# Please enter the commit message\n");

    repo.commitfmt()
        .args(["suggest", "--file", "MSG"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote suggested message"));

    repo.assert_file_content("MSG", "fix(logout):\nFix logout issue\n\n[456]\n# Please enter the commit message\n");
}

#[test]
fn test_suggest_timeout() {
    let repo = TestRepo::on_branch("feat-login-123");

    repo.commitfmt()
        .args(["suggest", "--command", "sleep 5; echo late", "--timeout-ms", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("suggestion timed out"));
}

#[test]
fn test_suggest_without_command() {
    let repo = TestRepo::with_git();

    repo.commitfmt()
        .arg("suggest")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No suggestion command configured"));
}

#[test]
fn test_suggest_command_failure() {
    let repo = TestRepo::on_branch("feat-login-123");

    repo.commitfmt()
        .args(["suggest", "--command", "echo broken >&2; exit 2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("suggestion command failed"))
        .stderr(predicate::str::contains("broken"));
}
