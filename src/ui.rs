pub mod menu;
pub mod quiz;
pub mod results;
pub mod screen;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::theme::Palette;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

pub fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub fn italic() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

/// Draws whichever screen is active plus any pending notice
pub fn draw(app: &App, f: &mut Frame) {
    let palette = app.theme.palette();
    f.render_widget(Block::default().style(palette.base()), f.area());

    screen::current_screen(&app.state).render(app, f);

    if let Some(notice) = &app.notice {
        render_notice(&notice.text, palette, f);
    }
}

fn render_notice(text: &str, palette: Palette, f: &mut Frame) {
    let area = f.area();
    let height = 3.min(area.height);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(height)])
        .split(area);
    let popup = centered(chunks[1], 80);

    let widget = Paragraph::new(Span::styled(
        text.to_string(),
        Style::default().fg(palette.warning).add_modifier(Modifier::BOLD),
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("(x) dismiss")
            .style(palette.base()),
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    f.render_widget(Clear, popup);
    f.render_widget(widget, popup);
}

/// Horizontally centered slice of `area`, `percent` wide
fn centered(area: Rect, percent: u16) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent) / 2),
            Constraint::Percentage(percent),
            Constraint::Percentage((100 - percent) / 2),
        ])
        .split(area)[1]
}
