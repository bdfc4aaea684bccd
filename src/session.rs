use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Questions per quiz; longer shortcut lists are truncated
pub const MAX_QUESTIONS: usize = 5;

/// User answer recorded for a skipped question. Never normalizes equal to a real chord.
pub const SKIPPED: &str = "Skipped";

/// One question: an action prompt and its answer in display form (e.g. `Ctrl+Shift+S`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutRecord {
    pub action: String,
    pub keys: String,
}

impl ShortcutRecord {
    pub fn new(action: impl Into<String>, keys: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            keys: keys.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionResult {
    pub action: String,
    pub correct_keys: String,
    /// What the user pressed, verbatim, or [`SKIPPED`]
    pub user_keys: String,
    pub correct: bool,
}

impl QuestionResult {
    pub fn was_skipped(&self) -> bool {
        self.user_keys == SKIPPED
    }
}

/// Mutable state of one quiz attempt
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub shortcuts: Vec<ShortcutRecord>,
    pub index: usize,
    pub score: usize,
    pub results: Vec<QuestionResult>,
    pub listening: bool,
    /// Keys currently held, for the live display only
    pub pressed_keys: BTreeSet<String>,
    /// Chord shown while listening
    pub live_chord: Option<String>,
}

impl Session {
    pub fn new(mut shortcuts: Vec<ShortcutRecord>) -> Self {
        shortcuts.truncate(MAX_QUESTIONS);
        Self {
            shortcuts,
            ..Self::default()
        }
    }

    pub fn total(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn current(&self) -> Option<&ShortcutRecord> {
        self.shortcuts.get(self.index)
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.shortcuts.len()
    }

    /// Appends the result for the current question and updates the score
    pub fn record(&mut self, user_keys: String, correct: bool) -> Option<&QuestionResult> {
        let shortcut = self.shortcuts.get(self.index)?;
        self.results.push(QuestionResult {
            action: shortcut.action.clone(),
            correct_keys: shortcut.keys.clone(),
            user_keys,
            correct,
        });
        if correct {
            self.score += 1;
        }
        self.results.last()
    }

    pub fn clear_transient(&mut self) {
        self.listening = false;
        self.pressed_keys.clear();
        self.live_chord = None;
    }
}
