use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};

use crate::platform::Platform;
use crate::quiz::{Feedback, QuizState, Snapshot};
use crate::theme::Palette;
use crate::ui::{bold, dim, italic, HORIZONTAL_MARGIN, VERTICAL_MARGIN};

pub const WAITING_PROMPT: &str = "Press the shortcut...";
const LEGEND: &str = "(tab) skip / (esc) back to menu";

pub struct QuizView<'a> {
    snapshot: &'a Snapshot,
    platform: Platform,
    set_name: Option<&'a str>,
    palette: Palette,
}

impl<'a> QuizView<'a> {
    pub fn new(snapshot: &'a Snapshot, platform: Platform, set_name: Option<&'a str>) -> Self {
        Self {
            snapshot,
            platform,
            set_name,
            palette: Palette::default(),
        }
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    fn chord_span(&self) -> Span<'static> {
        match &self.snapshot.live_chord {
            Some(chord) if !chord.is_empty() => {
                Span::styled(chord.clone(), bold().fg(self.palette.accent))
            }
            _ => Span::styled(WAITING_PROMPT, dim().add_modifier(Modifier::ITALIC)),
        }
    }

    fn feedback_span(&self) -> Option<Span<'static>> {
        if self.snapshot.state != QuizState::Feedback {
            return None;
        }
        let feedback = self.snapshot.feedback.as_ref()?;
        let color = match feedback {
            Feedback::Correct => self.palette.good,
            Feedback::Incorrect { .. } => self.palette.bad,
        };
        Some(Span::styled(feedback.message(), bold().fg(color)))
    }
}

impl Widget for QuizView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // set and platform
                Constraint::Length(1), // progress gauge
                Constraint::Min(1),    // spacer
                Constraint::Length(2), // action
                Constraint::Length(1), // live chord
                Constraint::Length(1), // padding
                Constraint::Length(1), // feedback
                Constraint::Min(1),    // spacer
                Constraint::Length(1), // score
                Constraint::Length(1), // legend
            ])
            .split(area);

        let header = format!(
            "{}  ·  {}",
            self.set_name.unwrap_or("Shortcut quiz"),
            self.platform.display_name()
        );
        Paragraph::new(Span::styled(header, dim()))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        Gauge::default()
            .gauge_style(
                Style::default()
                    .fg(self.palette.heading)
                    .bg(self.palette.background),
            )
            .ratio(self.snapshot.progress.clamp(0.0, 1.0))
            .label(self.snapshot.progress_label())
            .render(chunks[1], buf);

        if let Some(action) = &self.snapshot.action {
            Paragraph::new(Line::from(Span::styled(action.clone(), bold())))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(chunks[3], buf);
        }

        Paragraph::new(self.chord_span())
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        if let Some(feedback) = self.feedback_span() {
            Paragraph::new(feedback)
                .alignment(Alignment::Center)
                .render(chunks[6], buf);
        }

        Paragraph::new(Span::styled(
            format!("Score: {}", self.snapshot.score),
            bold(),
        ))
        .alignment(Alignment::Center)
        .render(chunks[8], buf);

        Paragraph::new(Span::styled(LEGEND, italic())).render(chunks[9], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::KeyPress;
    use crate::quiz::{Quiz, JUDGE_DEBOUNCE};
    use crate::session::ShortcutRecord;
    use crate::theme::Theme;
    use crate::ui::test_support::rendered;
    use ratatui::style::Color;
    use std::time::Instant;

    fn quiz() -> Quiz {
        let mut quiz = Quiz::new();
        quiz.start(vec![
            ShortcutRecord::new("Copy", "Ctrl+C"),
            ShortcutRecord::new("Paste", "Ctrl+V"),
        ])
        .unwrap();
        quiz
    }

    fn render(snapshot: &Snapshot) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        QuizView::new(snapshot, Platform::Windows, Some("System Basics")).render(area, &mut buffer);
        rendered(&buffer)
    }

    #[test]
    fn test_waiting_for_input() {
        let screen = render(&quiz().snapshot());

        assert!(screen.contains("Question 1 of 2"));
        assert!(screen.contains("Copy"));
        assert!(screen.contains(WAITING_PROMPT));
        assert!(screen.contains("Score: 0"));
        assert!(screen.contains("System Basics"));
    }

    #[test]
    fn test_live_chord_replaces_prompt() {
        let mut quiz = quiz();
        quiz.on_key_down(&KeyPress::new("Control").ctrl(), Instant::now());

        let screen = render(&quiz.snapshot());
        assert!(screen.contains("Ctrl"));
        assert!(!screen.contains(WAITING_PROMPT));
    }

    #[test]
    fn test_feedback_after_judgment() {
        let now = Instant::now();
        let mut quiz = quiz();
        quiz.on_key_down(&KeyPress::new("v").ctrl(), now);
        quiz.on_tick(now + JUDGE_DEBOUNCE);

        let screen = render(&quiz.snapshot());
        assert!(screen.contains("Correct answer: Ctrl+C"));
    }

    #[test]
    fn test_correct_feedback() {
        let now = Instant::now();
        let mut quiz = quiz();
        quiz.on_key_down(&KeyPress::new("c").ctrl(), now);
        quiz.on_tick(now + JUDGE_DEBOUNCE);

        let screen = render(&quiz.snapshot());
        assert!(screen.contains("Correct!"));
        assert!(screen.contains("Score: 1"));
    }

    #[test]
    fn test_feedback_uses_palette() {
        let now = Instant::now();
        let mut quiz = quiz();
        quiz.on_key_down(&KeyPress::new("v").ctrl(), now);
        quiz.on_tick(now + JUDGE_DEBOUNCE);

        let snapshot = quiz.snapshot();
        let palette = Theme::Light.palette();
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        QuizView::new(&snapshot, Platform::Windows, None)
            .palette(palette)
            .render(area, &mut buffer);

        let screen = rendered(&buffer);
        let row = screen.lines().position(|l| l.contains("Correct answer")).unwrap() as u16;
        let line = screen.lines().nth(row as usize).unwrap();
        let col = line.chars().position(|c| c == 'C').unwrap() as u16;
        assert_eq!(buffer[(col, row)].fg, palette.bad);
        assert_ne!(palette.bad, Color::Red);
    }

    #[test]
    fn test_small_area() {
        let snapshot = quiz().snapshot();
        let area = Rect::new(0, 0, 12, 4);
        let mut buffer = Buffer::empty(area);
        QuizView::new(&snapshot, Platform::Mac, None).render(area, &mut buffer);
        assert_eq!(buffer.area, area);
    }
}
