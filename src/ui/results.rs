use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

use crate::report::{Performance, Report};
use crate::session::QuestionResult;
use crate::theme::Palette;
use crate::ui::{bold, dim, italic, HORIZONTAL_MARGIN, VERTICAL_MARGIN};

const LEGEND: &str = "(r)etry / (m)enu / (q)uit";

pub struct ResultsView<'a> {
    report: &'a Report,
    palette: Palette,
}

impl<'a> ResultsView<'a> {
    pub fn new(report: &'a Report) -> Self {
        Self {
            report,
            palette: Palette::default(),
        }
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}

fn performance_color(performance: Performance, palette: &Palette) -> Color {
    match performance {
        Performance::Outstanding => palette.good,
        Performance::Great => palette.accent,
        Performance::Good => palette.warning,
        Performance::KeepLearning => palette.bad,
    }
}

fn result_row(result: &QuestionResult, palette: &Palette) -> Row<'static> {
    let (mark, color) = if result.correct {
        ("✓", palette.good)
    } else {
        ("✗", palette.bad)
    };
    let answer_style = if result.was_skipped() {
        dim()
    } else {
        Style::default().fg(color)
    };

    Row::new(vec![
        Cell::from(mark).style(Style::default().fg(color)),
        Cell::from(result.action.clone()),
        Cell::from(result.correct_keys.clone()).style(bold()),
        Cell::from(result.user_keys.clone()).style(answer_style),
    ])
}

impl Widget for ResultsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let report = self.report;
        let performance = report.performance();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // score
                Constraint::Length(1), // performance
                Constraint::Length(1), // padding
                Constraint::Min(3),    // breakdown
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Line::from(vec![
            Span::styled(format!("{} / {}", report.score, report.total), bold()),
            Span::raw("   "),
            Span::styled(format!("{}%", report.percentage), bold()),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        Paragraph::new(Span::styled(
            performance.message(),
            bold().fg(performance_color(performance, &self.palette)),
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        let header = Row::new(vec!["", "Action", "Shortcut", "You pressed"])
            .style(bold().fg(self.palette.title));
        let rows: Vec<Row> = report
            .results
            .iter()
            .map(|r| result_row(r, &self.palette))
            .collect();

        Table::new(
            rows,
            [
                Constraint::Length(2),
                Constraint::Percentage(50),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Results"))
        .render(chunks[3], buf);

        Paragraph::new(Span::styled(LEGEND, italic())).render(chunks[4], buf);
    }
}
