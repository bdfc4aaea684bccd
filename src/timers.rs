use std::time::{Duration, Instant};

use crate::chord::ChordString;

/// Work the quiz defers until later
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Judge the chord captured for the current question
    Judge(ChordString),
    /// Leave feedback and move to the next question
    Advance,
}

/// Identifies which session and question a timer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTag {
    pub generation: u64,
    pub question: usize,
}

#[derive(Debug, Clone)]
pub struct Timer {
    pub due: Instant,
    pub tag: TimerTag,
    pub task: Task,
}

/// Pending deferred tasks, fired in deadline order by the owner's tick.
///
/// Timers are never cancelled in place; the owner compares each fired tag
/// against its current generation and drops stale ones.
#[derive(Debug, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, tag: TimerTag, task: Task) {
        self.timers.push(Timer {
            due: now + delay,
            tag,
            task,
        });
    }

    /// Schedules a judgment, replacing any judgment already pending for the same tag.
    ///
    /// Returns false when the pending judgment already holds this chord, in which
    /// case the original deadline is kept.
    pub fn schedule_judgment(
        &mut self,
        now: Instant,
        delay: Duration,
        tag: TimerTag,
        chord: ChordString,
    ) -> bool {
        if let Some(existing) = self
            .timers
            .iter_mut()
            .find(|t| t.tag == tag && matches!(t.task, Task::Judge(_)))
        {
            if existing.task == Task::Judge(chord.clone()) {
                return false;
            }
            existing.task = Task::Judge(chord);
            existing.due = now + delay;
            return true;
        }

        self.schedule(now, delay, tag, Task::Judge(chord));
        true
    }

    /// Removes and returns the earliest timer due at or before `now`
    pub fn pop_due(&mut self, now: Instant) -> Option<Timer> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by_key(|(_, t)| t.due)
            .map(|(i, _)| i)?;
        Some(self.timers.remove(idx))
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.timers.iter().map(|t| t.due).min()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
