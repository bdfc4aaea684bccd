use serde::Serialize;

use crate::session::QuestionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Performance {
    Outstanding,
    Great,
    Good,
    KeepLearning,
}

impl Performance {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Performance::Outstanding,
            70..=89 => Performance::Great,
            50..=69 => Performance::Good,
            _ => Performance::KeepLearning,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Performance::Outstanding => "Outstanding! You're a keyboard shortcut master!",
            Performance::Great => "Great job! You know your shortcuts well.",
            Performance::Good => "Good effort! Keep practicing to improve.",
            Performance::KeepLearning => "Keep learning! Shortcuts will save you time.",
        }
    }
}

/// Final outcome of a completed quiz
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub results: Vec<QuestionResult>,
}

impl Report {
    pub fn new(score: usize, total: usize, results: Vec<QuestionResult>) -> Self {
        Self {
            score,
            total,
            percentage: percentage(score, total),
            results,
        }
    }

    pub fn performance(&self) -> Performance {
        Performance::from_percentage(self.percentage)
    }

    pub fn missed(&self) -> impl Iterator<Item = &QuestionResult> {
        self.results.iter().filter(|r| !r.correct)
    }
}

/// `round(score / total * 100)`, or 0 for an empty quiz
pub fn percentage(score: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((score as f64 / total as f64) * 100.0).round() as u32
}
