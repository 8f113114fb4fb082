#![allow(clippy::unwrap_used)]

use super::{Answer, FakeVcs, ScriptedPrompter, history, loaded, loaded_with, summary};
use crate::commands::{RevertArgs, RevertOutcome, revert_message, run_revert};
use crate::config::CommitType;
use crate::config::defaults::fallback_config;

fn args() -> RevertArgs {
    RevertArgs {
        limit: 20,
        ..RevertArgs::default()
    }
}

#[test]
fn test_revert_by_hash_prefix() {
    let vcs = history();
    let mut prompter = ScriptedPrompter::new(vec![Answer::Yes]);
    let args = RevertArgs {
        commit: Some("0912".to_string()),
        ..args()
    };

    let outcome = run_revert(&loaded(), &vcs, &mut prompter, &args).unwrap();

    assert_eq!(outcome, Some(RevertOutcome::Reverted("c0ffee1".to_string())));
    assert_eq!(*vcs.reverted.borrow(), [("0912abc".to_string(), None)]);
    let committed = vcs.committed.borrow();
    assert_eq!(committed[0].0, "Revert \"fix: typo\"");
    assert_eq!(committed[0].1.as_deref(), Some("This reverts commit 0912abc."));
}

#[test]
fn test_unknown_hash_is_an_error() {
    let vcs = history();
    let mut prompter = ScriptedPrompter::default();
    let args = RevertArgs {
        commit: Some("ffff".to_string()),
        ..args()
    };

    let err = run_revert(&loaded(), &vcs, &mut prompter, &args).unwrap_err();

    assert!(err.to_string().contains("not among the last 20 commits"));
}

#[test]
fn test_merge_commit_asks_for_parent() {
    let vcs = history();
    let mut prompter = ScriptedPrompter::new(vec![Answer::Pick(1), Answer::Pick(1), Answer::Yes]);

    run_revert(&loaded(), &vcs, &mut prompter, &args()).unwrap();

    assert_eq!(
        prompter.asked,
        [
            "Select commit to revert:",
            "Merge commit: which parent is the mainline?",
            "Revert e4f5a6b \"Merge branch 'topic'\"?",
        ]
    );
    assert_eq!(*vcs.reverted.borrow(), [("e4f5a6b".to_string(), Some(2))]);
}

#[test]
fn test_declined_confirmation_cancels() {
    let vcs = history();
    let mut prompter = ScriptedPrompter::new(vec![Answer::Pick(0), Answer::No]);

    let result = run_revert(&loaded(), &vcs, &mut prompter, &args()).unwrap();

    assert_eq!(result, None);
    assert!(vcs.reverted.borrow().is_empty());
}

#[test]
fn test_conflict_can_be_aborted() {
    let vcs = FakeVcs {
        fail_revert: true,
        ..history()
    };
    let mut prompter = ScriptedPrompter::new(vec![Answer::Pick(0), Answer::Yes, Answer::Yes]);

    let err = run_revert(&loaded(), &vcs, &mut prompter, &args()).unwrap_err();

    assert!(err.to_string().contains("conflict"));
    assert!(*vcs.aborted.borrow());
    assert!(vcs.committed.borrow().is_empty());
}

#[test]
fn test_conflict_left_in_place_explains_continue() {
    let vcs = FakeVcs {
        fail_revert: true,
        ..history()
    };
    let mut prompter = ScriptedPrompter::new(vec![Answer::Pick(0), Answer::Yes, Answer::No]);

    assert!(run_revert(&loaded(), &vcs, &mut prompter, &args()).is_err());

    assert!(!*vcs.aborted.borrow());
    assert!(prompter.notes.iter().any(|n| n.contains("revert --continue")));
}

#[test]
fn test_abort_and_continue_flags() {
    let vcs = history();
    let mut prompter = ScriptedPrompter::default();

    let aborted = RevertArgs {
        abort: true,
        ..args()
    };
    assert_eq!(
        run_revert(&loaded(), &vcs, &mut prompter, &aborted).unwrap(),
        Some(RevertOutcome::Aborted)
    );
    assert!(*vcs.aborted.borrow());

    let continued = RevertArgs {
        r#continue: true,
        ..args()
    };
    assert_eq!(
        run_revert(&loaded(), &vcs, &mut prompter, &continued).unwrap(),
        Some(RevertOutcome::Continued)
    );
    assert!(prompter.asked.is_empty());
    assert!(vcs.committed.borrow().is_empty());
}

#[test]
fn test_empty_history() {
    let vcs = FakeVcs::default();
    let mut prompter = ScriptedPrompter::default();

    let err = run_revert(&loaded(), &vcs, &mut prompter, &args()).unwrap_err();

    assert_eq!(err.to_string(), "No commits to revert");
}

#[test]
fn test_revert_message_uses_configured_type() {
    let mut config = fallback_config();
    config
        .types
        .push(CommitType::new("revert", "Reverts a previous commit", Some("⏪")));
    let mut loaded = loaded_with(config);
    loaded.emoji_mode_active = true;

    let (header, body) = revert_message(&loaded, &summary("a1b2c3d", "feat: add login", 1));

    assert_eq!(header, "⏪ revert: \"feat: add login\"");
    assert_eq!(body, "This reverts commit a1b2c3d.");
}

#[test]
fn test_revert_message_truncates_long_subjects() {
    let mut config = fallback_config();
    config.types.push(CommitType::new("revert", "Reverts", None));
    config.format.subject_max_length = 20;

    let (header, _) = revert_message(
        &loaded_with(config),
        &summary("a1b2c3d", "feat: a very long subject line indeed", 1),
    );

    let subject = header.trim_start_matches("revert: ");
    assert!(subject.chars().count() <= 20, "{subject}");
}
