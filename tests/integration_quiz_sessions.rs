use std::time::{Duration, Instant};

use assert_matches::assert_matches;

use memokeys::catalog::{Catalog, ShortcutSource};
use memokeys::chord::{normalize, KeyPress};
use memokeys::error::QuizError;
use memokeys::platform::Platform;
use memokeys::quiz::{Feedback, Quiz, QuizState, FEEDBACK_DELAY, JUDGE_DEBOUNCE};
use memokeys::report::Performance;
use memokeys::session::{ShortcutRecord, SKIPPED};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn started(records: Vec<ShortcutRecord>) -> Quiz {
    let mut quiz = Quiz::new();
    quiz.start(records).unwrap();
    quiz
}

/// Presses `press`, waits out the debounce and the feedback, returns the new clock
fn answer(quiz: &mut Quiz, press: KeyPress, now: Instant) -> Instant {
    quiz.on_key_down(&press, now);
    quiz.on_key_up(&press);
    let judged = now + JUDGE_DEBOUNCE;
    quiz.on_tick(judged);
    let advanced = judged + FEEDBACK_DELAY;
    quiz.on_tick(advanced);
    advanced
}

#[test]
fn mac_answers_from_catalog_accept_cmd_or_ctrl() {
    let catalog = Catalog::embedded().unwrap();
    let records = catalog.shortcuts("system", Platform::Mac).unwrap();
    assert_eq!(records[0].keys, "Cmd+C");

    // Cmd folds onto Ctrl, so a Ctrl chord satisfies a Cmd answer
    let mut quiz = started(records);
    let now = Instant::now();
    quiz.on_key_down(&KeyPress::new("c").ctrl(), now);
    quiz.on_tick(now + JUDGE_DEBOUNCE);

    assert_eq!(quiz.state(), QuizState::Feedback);
    assert_eq!(quiz.session().score, 1);
}

#[test]
fn full_session_mixed_answers_report() {
    let mut quiz = started(vec![
        ShortcutRecord::new("Copy", "Ctrl+C"),
        ShortcutRecord::new("Paste", "Ctrl+V"),
        ShortcutRecord::new("Undo", "Ctrl+Z"),
        ShortcutRecord::new("Redo", "Ctrl+Shift+Z"),
    ]);

    let mut now = Instant::now();
    now = answer(&mut quiz, KeyPress::new("c").ctrl(), now);
    now = answer(&mut quiz, KeyPress::new("x").ctrl(), now);
    quiz.skip(now);
    now += FEEDBACK_DELAY;
    quiz.on_tick(now);
    answer(&mut quiz, KeyPress::new("z").ctrl().shift(), now);

    assert!(quiz.has_finished());
    let report = quiz.report().unwrap();
    assert_eq!(report.score, 2);
    assert_eq!(report.total, 4);
    assert_eq!(report.percentage, 50);
    assert_eq!(report.performance(), Performance::Good);

    let users: Vec<&str> = report.results.iter().map(|r| r.user_keys.as_str()).collect();
    assert_eq!(users, vec!["Ctrl+C", "Ctrl+X", SKIPPED, "Ctrl+Shift+Z"]);
    assert_eq!(report.missed().count(), 2);
}

#[test]
fn late_modifier_within_debounce_is_judged_as_one_chord() {
    let mut quiz = started(vec![ShortcutRecord::new("Redo", "Ctrl+Shift+Z")]);
    let now = Instant::now();

    // Ctrl+Z lands first, then Shift joins before the window closes
    quiz.on_key_down(&KeyPress::new("z").ctrl(), now);
    quiz.on_key_down(&KeyPress::new("z").ctrl().shift(), now + ms(40));
    quiz.on_tick(now + ms(140));

    assert_eq!(quiz.session().results.len(), 1);
    assert_eq!(quiz.session().results[0].user_keys, "Ctrl+Shift+Z");
    assert!(quiz.session().results[0].correct);
}

#[test]
fn one_judgment_per_question() {
    let mut quiz = started(vec![
        ShortcutRecord::new("Copy", "Ctrl+C"),
        ShortcutRecord::new("Paste", "Ctrl+V"),
    ]);
    let now = Instant::now();

    quiz.on_key_down(&KeyPress::new("c").ctrl(), now);
    quiz.on_tick(now + JUDGE_DEBOUNCE);
    // pressed again while feedback is showing
    quiz.on_key_down(&KeyPress::new("v").ctrl(), now + ms(500));
    quiz.on_tick(now + ms(700));

    assert_eq!(quiz.session().results.len(), 1);
    assert_eq!(quiz.session().index, 0);
}

#[test]
fn reset_mid_feedback_never_advances() {
    let mut quiz = started(vec![
        ShortcutRecord::new("Copy", "Ctrl+C"),
        ShortcutRecord::new("Paste", "Ctrl+V"),
    ]);
    let now = Instant::now();
    quiz.skip(now);
    quiz.reset();

    assert!(!quiz.on_tick(now + FEEDBACK_DELAY * 2));
    assert_eq!(quiz.state(), QuizState::Idle);
    assert_eq!(quiz.session().index, 0);
}

#[test]
fn restart_discards_previous_timers() {
    let mut quiz = started(vec![ShortcutRecord::new("Copy", "Ctrl+C")]);
    let now = Instant::now();
    quiz.on_key_down(&KeyPress::new("x").ctrl(), now);

    quiz.start(vec![ShortcutRecord::new("Paste", "Ctrl+V")]).unwrap();
    quiz.on_tick(now + JUDGE_DEBOUNCE);

    assert_eq!(quiz.state(), QuizState::Listening);
    assert!(quiz.session().results.is_empty());
}

#[test]
fn empty_start_is_rejected() {
    let mut quiz = Quiz::new();
    assert_matches!(quiz.start(vec![]), Err(QuizError::EmptySet));
    assert_eq!(quiz.state(), QuizState::Idle);
}

#[test]
fn feedback_names_the_expected_chord() {
    let mut quiz = started(vec![ShortcutRecord::new("Close window", "Alt+F4")]);
    let now = Instant::now();
    quiz.on_key_down(&KeyPress::new("w").ctrl(), now);
    quiz.on_tick(now + JUDGE_DEBOUNCE);

    let snapshot = quiz.snapshot();
    assert_matches!(
        snapshot.feedback,
        Some(Feedback::Incorrect { ref correct_keys }) if correct_keys == "Alt+F4"
    );
    assert_eq!(
        snapshot.feedback.unwrap().message(),
        "Correct answer: Alt+F4"
    );
}

#[test]
fn normalization_is_order_and_case_insensitive() {
    assert_eq!(normalize("Shift+Ctrl+Z"), normalize("ctrl + shift + z"));
    assert_eq!(normalize("Cmd+K"), normalize("Ctrl+K"));
    assert_ne!(normalize("Ctrl+K"), normalize("Alt+K"));
}
