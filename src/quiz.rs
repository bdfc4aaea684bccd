use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::chord::{self, normalize, ChordString, KeyPress};
use crate::error::QuizError;
use crate::report::Report;
use crate::session::{Session, ShortcutRecord, SKIPPED};
use crate::timers::{Task, Timer, TimerQueue, TimerTag};

/// Wait after a qualifying key-down so late modifiers still make it into the chord
pub const JUDGE_DEBOUNCE: Duration = Duration::from_millis(100);

/// How long the outcome of a question stays on screen
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum_macros::Display)]
pub enum QuizState {
    #[default]
    Idle,
    Listening,
    Feedback,
    Completed,
}

/// Outcome of the most recently judged question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect { correct_keys: String },
}

impl Feedback {
    pub fn is_correct(&self) -> bool {
        matches!(self, Feedback::Correct)
    }

    pub fn message(&self) -> String {
        match self {
            Feedback::Correct => "Correct!".to_string(),
            Feedback::Incorrect { correct_keys } => format!("Correct answer: {correct_keys}"),
        }
    }
}

/// Read-only view of the quiz for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub state: QuizState,
    pub index: usize,
    pub total: usize,
    pub score: usize,
    pub action: Option<String>,
    pub live_chord: Option<String>,
    pub feedback: Option<Feedback>,
    pub progress: f64,
}

impl Snapshot {
    pub fn progress_label(&self) -> String {
        format!(
            "Question {} of {}",
            (self.index + 1).min(self.total.max(1)),
            self.total
        )
    }
}

/// Drives one quiz at a time through listening, feedback and completion.
///
/// Time never passes on its own: callers hand in `now` with every event and
/// call [`Quiz::on_tick`] to fire deferred judgments and question advances.
#[derive(Debug, Default)]
pub struct Quiz {
    state: QuizState,
    session: Session,
    generation: u64,
    timers: TimerQueue,
    last_feedback: Option<Feedback>,
}

impl Quiz {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn has_finished(&self) -> bool {
        self.state == QuizState::Completed
    }

    /// Begins a new quiz. At most [`crate::session::MAX_QUESTIONS`] shortcuts are used.
    pub fn start(&mut self, shortcuts: Vec<ShortcutRecord>) -> Result<(), QuizError> {
        if shortcuts.is_empty() {
            return Err(QuizError::EmptySet);
        }

        self.generation += 1;
        self.session = Session::new(shortcuts);
        self.last_feedback = None;
        info!(
            generation = self.generation,
            total = self.session.total(),
            "quiz started"
        );
        self.listen();
        Ok(())
    }

    pub fn on_key_down(&mut self, press: &KeyPress, now: Instant) {
        if self.state != QuizState::Listening {
            return;
        }

        if !press.key.is_empty() {
            self.session.pressed_keys.insert(press.key.clone());
        }

        let shown = chord::build_chord(press);
        if !shown.is_empty() {
            self.session.live_chord = Some(shown.to_string());
        }

        // a held chord must be pressed afresh to be judged
        if press.repeat {
            return;
        }

        if let Some(candidate) = chord::judgeable(press) {
            let tag = self.tag();
            if self
                .timers
                .schedule_judgment(now, JUDGE_DEBOUNCE, tag, candidate.clone())
            {
                debug!(chord = %candidate, question = tag.question, "judgment scheduled");
            }
        }
    }

    pub fn on_key_up(&mut self, press: &KeyPress) {
        if self.state != QuizState::Listening {
            return;
        }

        self.session.pressed_keys.remove(&press.key);
        if !press.has_modifier() {
            self.session.pressed_keys.clear();
        }
    }

    /// Judges `chord` against the current question. Ignored unless listening.
    pub fn check_answer(&mut self, chord: &ChordString, now: Instant) {
        if self.state != QuizState::Listening {
            return;
        }
        let Some(current) = self.session.current() else {
            return;
        };

        let correct = normalize(&current.keys) == normalize(chord.as_str());
        self.conclude(chord.to_string(), correct, now);
    }

    pub fn skip(&mut self, now: Instant) {
        if self.state != QuizState::Listening {
            return;
        }
        self.conclude(SKIPPED.to_string(), false, now);
    }

    /// Abandons the quiz. Score and results stay readable until the next start.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = QuizState::Idle;
        self.last_feedback = None;
        self.session.clear_transient();
        debug!(generation = self.generation, "quiz reset");
    }

    /// Fires every timer due at `now`. Returns true if anything changed.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while let Some(timer) = self.timers.pop_due(now) {
            changed |= self.fire(timer, now);
        }
        changed
    }

    /// Earliest pending deadline, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_due()
    }

    pub fn snapshot(&self) -> Snapshot {
        let total = self.session.total();
        let active = matches!(self.state, QuizState::Listening | QuizState::Feedback);

        Snapshot {
            state: self.state,
            index: self.session.index,
            total,
            score: self.session.score,
            action: active
                .then(|| self.session.current().map(|s| s.action.clone()))
                .flatten(),
            live_chord: self.session.live_chord.clone(),
            feedback: self.last_feedback.clone(),
            progress: if total == 0 {
                0.0
            } else {
                self.session.index as f64 / total as f64
            },
        }
    }

    /// Final report, available once every question has been answered or skipped
    pub fn report(&self) -> Option<Report> {
        if self.state != QuizState::Completed {
            return None;
        }
        Some(Report::new(
            self.session.score,
            self.session.total(),
            self.session.results.clone(),
        ))
    }

    fn tag(&self) -> TimerTag {
        TimerTag {
            generation: self.generation,
            question: self.session.index,
        }
    }

    fn listen(&mut self) {
        self.session.clear_transient();
        self.session.listening = true;
        self.last_feedback = None;
        self.state = QuizState::Listening;
    }

    fn conclude(&mut self, user_keys: String, correct: bool, now: Instant) {
        let question = self.session.index;
        let Some(result) = self.session.record(user_keys, correct) else {
            return;
        };
        debug!(question, user_keys = %result.user_keys, correct, "question judged");
        let feedback = if correct {
            Feedback::Correct
        } else {
            Feedback::Incorrect {
                correct_keys: result.correct_keys.clone(),
            }
        };

        self.session.listening = false;
        self.last_feedback = Some(feedback);
        self.state = QuizState::Feedback;
        self.timers.schedule(now, FEEDBACK_DELAY, self.tag(), Task::Advance);
    }

    fn advance(&mut self) {
        self.session.index += 1;
        if self.session.is_exhausted() {
            self.session.clear_transient();
            self.state = QuizState::Completed;
            info!(
                score = self.session.score,
                total = self.session.total(),
                "quiz completed"
            );
        } else {
            self.listen();
        }
    }

    fn fire(&mut self, timer: Timer, now: Instant) -> bool {
        if timer.tag != self.tag() {
            debug!(tag = ?timer.tag, current = ?self.tag(), "dropping stale timer");
            return false;
        }

        match timer.task {
            Task::Judge(chord) if self.state == QuizState::Listening => {
                self.check_answer(&chord, now);
                true
            }
            Task::Advance if self.state == QuizState::Feedback => {
                self.advance();
                true
            }
            task => {
                debug!(?task, state = %self.state, "timer no longer applies");
                false
            }
        }
    }
}
