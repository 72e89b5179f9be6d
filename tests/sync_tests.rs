//! Integration tests for the local sync orchestrator.

mod common;

use std::fs;

use common::RecordingGit;
use hubman::audit::ActionLog;
use hubman::error::HubmanError;
use hubman::ui::ScriptedPrompter;
use hubman::vcs::{PushOutcome, SyncManager};
use tempfile::TempDir;

fn action_log(dir: &TempDir) -> ActionLog {
    ActionLog::new(dir.path().join("actions.log"))
}

#[test]
fn ensure_checkout_is_idempotent_on_a_valid_checkout() {
    let dir = TempDir::new().unwrap();
    let checkout = dir.path().join("repo");
    fs::create_dir_all(checkout.join(".git")).unwrap();

    let git = RecordingGit::new();
    let log = action_log(&dir);
    let manager = SyncManager::new(&git, &log);
    let mut prompt = ScriptedPrompter::default();

    manager
        .ensure_checkout(&mut prompt, &checkout, None, None)
        .unwrap();
    manager
        .ensure_checkout(&mut prompt, &checkout, None, None)
        .unwrap();

    assert_eq!(git.calls.borrow().len(), 0, "no git invocation expected");
}

#[test]
fn declined_clone_prompt_cancels_and_creates_nothing() {
    let dir = TempDir::new().unwrap();
    let checkout = dir.path().join("missing").join("checkout");

    let git = RecordingGit::new();
    let log = action_log(&dir);
    let manager = SyncManager::new(&git, &log);
    let mut prompt = ScriptedPrompter::new(Vec::<String>::new(), [false]);

    let err = manager
        .ensure_checkout(&mut prompt, &checkout, None, Some("tok"))
        .unwrap_err();

    assert!(matches!(err, HubmanError::UserCancelled));
    assert!(!dir.path().join("missing").exists(), "no directories created");
    assert_eq!(git.invocations_of("clone"), 0);
}

#[test]
fn clone_uses_a_credentialed_url_without_displaying_it() {
    let dir = TempDir::new().unwrap();
    let checkout = dir.path().join("nested").join("checkout");

    let git = RecordingGit::new();
    let log = action_log(&dir);
    let manager = SyncManager::new(&git, &log);
    let mut prompt = ScriptedPrompter::new(["https://github.com/o/r.git"], [true]);

    manager
        .ensure_checkout(&mut prompt, &checkout, None, Some("tok"))
        .unwrap();

    let clone = git.first_invocation_of("clone").unwrap();
    assert_eq!(clone[1], "https://tok@github.com/o/r.git");
    assert!(checkout.parent().unwrap().exists(), "parent directories created");

    // The action log must never carry the token.
    let logged = fs::read_to_string(log.path()).unwrap();
    assert!(logged.contains("Cloned repository"));
    assert!(!logged.contains("tok@"));
}

#[test]
fn empty_clone_url_answer_is_cancelled() {
    let dir = TempDir::new().unwrap();
    let checkout = dir.path().join("checkout");

    let git = RecordingGit::new();
    let log = action_log(&dir);
    let manager = SyncManager::new(&git, &log);
    let mut prompt = ScriptedPrompter::new(Vec::<String>::new(), [true]);

    let err = manager
        .ensure_checkout(&mut prompt, &checkout, None, None)
        .unwrap_err();
    assert!(matches!(err, HubmanError::UserCancelled));
    assert_eq!(git.invocations_of("clone"), 0);
}

#[test]
fn failed_clone_surfaces_clone_failed_without_the_token() {
    let dir = TempDir::new().unwrap();
    let checkout = dir.path().join("checkout");

    let git = RecordingGit::new().with_exit("clone", 128);
    let log = action_log(&dir);
    let manager = SyncManager::new(&git, &log);
    let mut prompt = ScriptedPrompter::new(["https://github.com/o/r.git"], [true]);

    let err = manager
        .ensure_checkout(&mut prompt, &checkout, None, Some("tok"))
        .unwrap_err();

    match err {
        HubmanError::CloneFailed { url, .. } => assert!(!url.contains("tok")),
        other => panic!("expected CloneFailed, got {other:?}"),
    }
}

#[test]
fn repair_remote_rewrites_a_plain_https_origin() {
    let dir = TempDir::new().unwrap();
    let checkout = dir.path().join("repo");
    fs::create_dir_all(checkout.join(".git")).unwrap();

    let git = RecordingGit::new().with_stdout("remote", "https://github.com/o/r.git\n");
    let log = action_log(&dir);
    let manager = SyncManager::new(&git, &log);

    manager.repair_remote(&checkout, "tok").unwrap();

    let calls = git.calls.borrow();
    let set_url = calls
        .iter()
        .find(|args| args.get(1).map(String::as_str) == Some("set-url"))
        .expect("set-url invoked");
    assert_eq!(set_url[3], "https://tok@github.com/o/r.git");
}

#[test]
fn repair_remote_leaves_credentialed_origin_untouched() {
    let dir = TempDir::new().unwrap();
    let checkout = dir.path().join("repo");
    fs::create_dir_all(checkout.join(".git")).unwrap();

    let git = RecordingGit::new().with_stdout("remote", "https://existing@github.com/o/r.git\n");
    let log = action_log(&dir);
    let manager = SyncManager::new(&git, &log);

    manager.repair_remote(&checkout, "tok").unwrap();

    let calls = git.calls.borrow();
    assert!(
        !calls.iter().any(|args| args.get(1).map(String::as_str) == Some("set-url")),
        "a credentialed URL must never be rewritten"
    );
}

#[test]
fn push_on_a_clean_tree_is_a_no_op_and_never_pushes() {
    let dir = TempDir::new().unwrap();
    let checkout = dir.path().join("repo");
    fs::create_dir_all(checkout.join(".git")).unwrap();

    // Commit exits non-zero: nothing to commit, by exit status alone.
    let git = RecordingGit::new().with_exit("commit", 1);
    let log = action_log(&dir);
    let manager = SyncManager::new(&git, &log);

    let outcome = manager.push(&checkout, "fix").unwrap();

    assert_eq!(outcome, PushOutcome::NothingToCommit);
    assert_eq!(git.invocations_of("push"), 0, "no push process launched");
}

#[test]
fn push_on_a_dirty_tree_stages_commits_and_pushes_once() {
    let dir = TempDir::new().unwrap();
    let checkout = dir.path().join("repo");
    fs::create_dir_all(checkout.join(".git")).unwrap();

    let git = RecordingGit::new();
    let log = action_log(&dir);
    let manager = SyncManager::new(&git, &log);

    let outcome = manager.push(&checkout, "fix").unwrap();

    assert_eq!(outcome, PushOutcome::Pushed);
    assert_eq!(git.invocations_of("add"), 1);
    assert_eq!(git.invocations_of("commit"), 1);
    assert_eq!(git.invocations_of("push"), 1);

    let commit = git.first_invocation_of("commit").unwrap();
    assert_eq!(commit, vec!["commit", "-m", "fix"]);
    let push = git.first_invocation_of("push").unwrap();
    assert_eq!(push, vec!["push"], "push invoked with defaults only");
}

#[test]
fn push_failure_keeps_the_local_commit() {
    let dir = TempDir::new().unwrap();
    let checkout = dir.path().join("repo");
    fs::create_dir_all(checkout.join(".git")).unwrap();

    let git = RecordingGit::new().with_exit("push", 1);
    let log = action_log(&dir);
    let manager = SyncManager::new(&git, &log);

    let err = manager.push(&checkout, "fix").unwrap_err();
    assert!(matches!(err, HubmanError::PushFailed { .. }));
    // The commit ran; no reset or revert follows the failed push.
    assert_eq!(git.invocations_of("commit"), 1);
    assert_eq!(git.invocations_of("reset"), 0);
}

#[test]
fn sync_aborts_on_pull_failure_before_any_commit_work() {
    let dir = TempDir::new().unwrap();
    let checkout = dir.path().join("repo");
    fs::create_dir_all(checkout.join(".git")).unwrap();

    let git = RecordingGit::new().with_exit("pull", 1);
    let log = action_log(&dir);
    let manager = SyncManager::new(&git, &log);

    let err = manager.sync(&checkout, "sync").unwrap_err();

    assert!(matches!(err, HubmanError::PullFailed { .. }));
    assert_eq!(git.invocations_of("add"), 0);
    assert_eq!(git.invocations_of("commit"), 0);
    assert_eq!(git.invocations_of("push"), 0);
}

#[test]
fn sync_on_a_clean_tree_pulls_but_never_pushes() {
    let dir = TempDir::new().unwrap();
    let checkout = dir.path().join("repo");
    fs::create_dir_all(checkout.join(".git")).unwrap();

    let git = RecordingGit::new().with_exit("commit", 1);
    let log = action_log(&dir);
    let manager = SyncManager::new(&git, &log);

    let outcome = manager.sync(&checkout, "sync").unwrap();

    assert_eq!(outcome, PushOutcome::NothingToCommit);
    assert_eq!(git.invocations_of("pull"), 1);
    assert_eq!(git.invocations_of("push"), 0);
}
