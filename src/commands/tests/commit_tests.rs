#![allow(clippy::unwrap_used)]

use super::{Answer, FakeVcs, ScriptedPrompter, loaded, loaded_with};
use crate::commands::{CommitArgs, file_summary, run_commit};
use crate::config::EditorPreference;
use crate::config::defaults::fallback_config;
use crate::git::{ChangedFile, FileStatus};

fn flags(type_id: &str, subject: &str) -> CommitArgs {
    CommitArgs {
        type_id: Some(type_id.to_string()),
        subject: Some(subject.to_string()),
        ..CommitArgs::default()
    }
}

#[test]
fn test_scripted_commit_asks_nothing() {
    let vcs = FakeVcs::with_staged(&["src/lib.rs"]);
    let mut prompter = ScriptedPrompter::default();
    let args = CommitArgs {
        scope: Some("api".to_string()),
        ..flags("feat", "add login endpoint")
    };

    let hash = run_commit(&loaded(), &vcs, &mut prompter, &args).unwrap();

    assert_eq!(hash.as_deref(), Some("c0ffee1"));
    let committed = vcs.committed.borrow();
    assert_eq!(committed[0].0, "feat(api): add login endpoint");
    assert_eq!(committed[0].1, None);
    assert!(prompter.asked.is_empty());
    assert_eq!(prompter.notes[0], "1 staged file(s):");
}

#[test]
fn test_type_and_subject_flags_skip_scope_and_body() {
    let vcs = FakeVcs::with_staged(&["src/lib.rs"]);
    let mut prompter = ScriptedPrompter::default();

    run_commit(&loaded(), &vcs, &mut prompter, &flags("fix", "handle empty input")).unwrap();

    assert!(prompter.asked.is_empty());
    assert_eq!(
        *vcs.committed.borrow(),
        [("fix: handle empty input".to_string(), None, false, false)]
    );
}

#[test]
fn test_scripted_commit_still_enforces_required_scope() {
    let mut config = fallback_config();
    config.validation.require_scope_for = vec!["fix".to_string()];
    let vcs = FakeVcs::with_staged(&["a.rs"]);
    let mut prompter = ScriptedPrompter::default();

    let err = run_commit(&loaded_with(config), &vcs, &mut prompter, &flags("fix", "fix it"))
        .unwrap_err();

    assert!(prompter.asked.is_empty());
    assert!(err.to_string().starts_with("Commit message is invalid"));
    assert!(vcs.committed.borrow().is_empty());
}

#[test]
fn test_type_flag_resolves_alias() {
    let mut config = fallback_config();
    config
        .advanced
        .aliases
        .insert("feature".to_string(), "feat".to_string());
    let vcs = FakeVcs::with_staged(&["a.rs"]);
    let mut prompter = ScriptedPrompter::default();

    run_commit(&loaded_with(config), &vcs, &mut prompter, &flags("feature", "add thing")).unwrap();

    assert_eq!(vcs.committed.borrow()[0].0, "feat: add thing");
}

#[test]
fn test_unknown_type_flag_is_an_error() {
    let vcs = FakeVcs::with_staged(&["a.rs"]);
    let mut prompter = ScriptedPrompter::default();

    let err = run_commit(&loaded(), &vcs, &mut prompter, &flags("feet", "add thing")).unwrap_err();

    assert!(err.to_string().contains("Unknown commit type 'feet'"));
    assert!(vcs.committed.borrow().is_empty());
}

#[test]
fn test_invalid_subject_flag_is_rejected_before_commit() {
    let vcs = FakeVcs::with_staged(&["a.rs"]);
    let mut prompter = ScriptedPrompter::default();

    let err = run_commit(&loaded(), &vcs, &mut prompter, &flags("fix", "ok")).unwrap_err();

    assert!(format!("{err:#}").contains("at least 3 characters"));
    assert!(vcs.committed.borrow().is_empty());
}

#[test]
fn test_interactive_commit_with_shortcuts() {
    let vcs = FakeVcs::with_staged(&["src/auth.rs", "README.md"]);
    let mut prompter = ScriptedPrompter::new(vec![
        // "fix" gets 'i' because 'f' belongs to "feat"
        Answer::Key('i'),
        Answer::Text("auth"),
        Answer::Text("handle expired tokens"),
        Answer::Key('s'),
        Answer::Key('c'),
    ]);

    let hash = run_commit(&loaded(), &vcs, &mut prompter, &CommitArgs::default()).unwrap();

    assert_eq!(hash.as_deref(), Some("c0ffee1"));
    assert_eq!(
        prompter.asked,
        ["Select commit type:", "Scope:", "Subject:", "Add a body?", "Ready to commit?"]
    );
    assert_eq!(vcs.committed.borrow()[0].0, "fix(auth): handle expired tokens");
    assert!(prompter.notes.iter().any(|n| n.contains("fix(auth): handle expired tokens")));
}

#[test]
fn test_configured_type_shortcut_wins() {
    let mut config = fallback_config();
    config
        .advanced
        .shortcuts
        .prompts
        .type_prompt
        .mapping
        .insert("x".to_string(), "fix".to_string());
    let vcs = FakeVcs::with_staged(&["a.rs"]);
    let mut prompter = ScriptedPrompter::new(vec![
        Answer::Key('X'),
        Answer::Text(""),
        Answer::Text("stop the crash"),
        Answer::Key('s'),
        Answer::Pick(0),
    ]);

    run_commit(&loaded_with(config), &vcs, &mut prompter, &CommitArgs::default()).unwrap();

    assert_eq!(vcs.committed.borrow()[0].0, "fix: stop the crash");
}

#[test]
fn test_inline_body_and_edit_subject_from_review() {
    let mut config = fallback_config();
    config.format.body.editor_preference = EditorPreference::Inline;
    let vcs = FakeVcs::with_staged(&["a.rs"]);
    let mut prompter = ScriptedPrompter::new(vec![
        Answer::Pick(2),
        Answer::Text(""),
        Answer::Text("fix typo"),
        Answer::Text("The readme had a typo."),
        Answer::Key('s'),
        Answer::Text("fix typo in readme"),
        Answer::Key('c'),
    ]);

    run_commit(&loaded_with(config), &vcs, &mut prompter, &CommitArgs::default()).unwrap();

    let committed = vcs.committed.borrow();
    assert_eq!(committed[0].0, "docs: fix typo in readme");
    assert_eq!(committed[0].1.as_deref(), Some("The readme had a typo."));
    assert_eq!(prompter.remaining(), 0);
}

#[test]
fn test_editor_body_retries_until_valid() {
    let mut config = fallback_config();
    config.format.body.editor_preference = EditorPreference::Editor;
    config.format.body.min_length = 10;
    let vcs = FakeVcs::with_staged(&["a.rs"]);
    let mut prompter = ScriptedPrompter::new(vec![
        Answer::Pick(0),
        Answer::Text(""),
        Answer::Text("add export"),
        Answer::Edited("short"),
        Answer::Yes,
        Answer::Edited("Adds CSV export to reports."),
        Answer::Pick(0),
    ]);

    run_commit(&loaded_with(config), &vcs, &mut prompter, &CommitArgs::default()).unwrap();

    assert_eq!(
        vcs.committed.borrow()[0].1.as_deref(),
        Some("Adds CSV export to reports.")
    );
    assert!(prompter.notes.iter().any(|n| n.contains("at least 10 characters")));
}

#[test]
fn test_allowed_scopes_are_offered_as_a_list() {
    let mut config = fallback_config();
    config.validation.allowed_scopes = vec!["api".to_string(), "ui".to_string()];
    let vcs = FakeVcs::with_staged(&["a.rs"]);
    let mut prompter = ScriptedPrompter::new(vec![
        Answer::Pick(0),
        Answer::Pick(1),
        Answer::Text("new button"),
        Answer::Key('s'),
        Answer::Key('c'),
    ]);

    run_commit(&loaded_with(config), &vcs, &mut prompter, &CommitArgs::default()).unwrap();

    assert_eq!(prompter.asked[1], "Select scope:");
    assert_eq!(vcs.committed.borrow()[0].0, "feat(ui): new button");
}

#[test]
fn test_cancel_returns_none() {
    let vcs = FakeVcs::with_staged(&["a.rs"]);
    let mut prompter = ScriptedPrompter::new(vec![Answer::Pick(0), Answer::Cancel]);

    let result = run_commit(&loaded(), &vcs, &mut prompter, &CommitArgs::default()).unwrap();

    assert_eq!(result, None);
    assert!(vcs.committed.borrow().is_empty());
}

#[test]
fn test_cancel_from_review() {
    let vcs = FakeVcs::with_staged(&["a.rs"]);
    let mut prompter = ScriptedPrompter::new(vec![
        Answer::Pick(0),
        Answer::Text(""),
        Answer::Text("add thing"),
        Answer::Key('s'),
        // "cancel" gets 'a' since 'c' belongs to "commit"
        Answer::Key('a'),
    ]);

    let result = run_commit(&loaded(), &vcs, &mut prompter, &CommitArgs::default()).unwrap();

    assert_eq!(result, None);
    assert!(vcs.committed.borrow().is_empty());
}

#[test]
fn test_emoji_is_prefixed_when_active() {
    let mut loaded = loaded();
    loaded.emoji_mode_active = true;
    let vcs = FakeVcs::with_staged(&["a.rs"]);
    let mut prompter = ScriptedPrompter::default();

    run_commit(&loaded, &vcs, &mut prompter, &flags("feat", "add thing")).unwrap();

    assert_eq!(vcs.committed.borrow()[0].0, "✨ feat: add thing");
}

#[test]
fn test_sign_and_no_verify_are_forwarded() {
    let mut config = fallback_config();
    config.advanced.git.sign_commits = true;
    let vcs = FakeVcs::with_staged(&["a.rs"]);
    let mut prompter = ScriptedPrompter::default();
    let args = CommitArgs {
        no_verify: true,
        ..flags("chore", "bump deps")
    };

    run_commit(&loaded_with(config), &vcs, &mut prompter, &args).unwrap();

    let committed = vcs.committed.borrow();
    assert!(committed[0].2);
    assert!(committed[0].3);
}

#[test]
fn test_auto_stage_stages_tracked_changes() {
    let mut config = fallback_config();
    config.advanced.git.auto_stage = true;
    let vcs = FakeVcs::default();
    vcs.unstaged.replace(vec!["src/main.rs".to_string()]);
    let mut prompter = ScriptedPrompter::default();

    run_commit(&loaded_with(config), &vcs, &mut prompter, &flags("fix", "fix main")).unwrap();

    assert!(vcs.unstaged.borrow().is_empty());
    assert_eq!(vcs.staged.borrow()[0].path, "src/main.rs");
    assert_eq!(vcs.committed.borrow().len(), 1);
}

#[test]
fn test_unstaged_files_can_be_picked() {
    let vcs = FakeVcs::default();
    vcs.unstaged
        .replace(vec!["a.rs".to_string(), "b.rs".to_string(), "c.rs".to_string()]);
    let mut prompter = ScriptedPrompter::new(vec![Answer::Toggle(vec![0, 2])]);

    run_commit(&loaded(), &vcs, &mut prompter, &flags("fix", "fix both")).unwrap();

    let staged: Vec<String> = vcs.staged.borrow().iter().map(|f| f.path.clone()).collect();
    assert_eq!(staged, ["a.rs", "c.rs"]);
    assert_eq!(*vcs.unstaged.borrow(), ["b.rs"]);
}

#[test]
fn test_nothing_to_commit() {
    let vcs = FakeVcs::default();
    let mut prompter = ScriptedPrompter::default();

    let err = run_commit(&loaded(), &vcs, &mut prompter, &flags("fix", "fix it")).unwrap_err();

    assert!(err.to_string().starts_with("Nothing to commit"));
}

#[test]
fn test_outside_repository() {
    let vcs = FakeVcs {
        not_a_repo: true,
        ..FakeVcs::default()
    };
    let mut prompter = ScriptedPrompter::default();

    let err = run_commit(&loaded(), &vcs, &mut prompter, &flags("fix", "fix it")).unwrap_err();

    assert_eq!(err.to_string(), "Not inside a git repository");
}

#[test]
fn test_file_summary_lines() {
    let files = vec![
        ChangedFile {
            path: "src/new.rs".to_string(),
            status: FileStatus::Added,
            additions: Some(12),
            deletions: Some(0),
        },
        ChangedFile {
            path: "logo.png".to_string(),
            status: FileStatus::Modified,
            additions: None,
            deletions: None,
        },
    ];

    assert_eq!(
        file_summary(&files),
        ["  A src/new.rs (+12 -0)", "  M logo.png"]
    );
}
